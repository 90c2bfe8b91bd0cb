//! Soil report endpoints, sharing the weather module's location keying.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::{ApiError, ApiResult, AppState, NewSoilReport, SoilReport};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/soil/{location}", get(get_soil))
        .route("/api/soil", post(create_soil))
}

async fn get_soil(
    Path(location): Path<String>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<SoilReport>> {
    // ---
    let report = store
        .get_soil(&location)
        .await
        .ok_or_else(|| ApiError::not_found("Soil data not found for this location"))?;
    Ok(Json(report))
}

async fn create_soil(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewSoilReport>, JsonRejection>,
) -> ApiResult<Json<SoilReport>> {
    // ---
    let Json(new_report) = payload.map_err(|_| ApiError::Validation("Invalid soil data"))?;
    Ok(Json(store.create_soil(new_report).await))
}
