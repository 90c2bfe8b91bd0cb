//! Regional crop advisory endpoints. An optional `?region=` narrows the
//! listing to regions whose name contains the filter.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState, CropAdvisory, NewCropAdvisory};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/crop-advisories", post(create_advisory))
        .route("/api/crop-advisories", get(list_advisories))
}

#[derive(Debug, Deserialize)]
struct AdvisoryQuery {
    region: Option<String>,
}

async fn create_advisory(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewCropAdvisory>, JsonRejection>,
) -> ApiResult<Json<CropAdvisory>> {
    // ---
    let Json(new_advisory) =
        payload.map_err(|_| ApiError::Validation("Invalid crop advisory data"))?;
    Ok(Json(store.create_crop_advisory(new_advisory).await))
}

async fn list_advisories(
    Query(params): Query<AdvisoryQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<CropAdvisory>>> {
    // ---
    // An empty filter means no filter
    let region = params.region.as_deref().filter(|r| !r.is_empty());
    Ok(Json(store.get_crop_advisories(region).await))
}
