//! Disease detection endpoints.
//!
//! POST takes the upload metadata and returns the record with its
//! synthesized diagnosis attached; GET lists one farmer's history.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{require_user_id, OwnerQuery};
use crate::{ApiError, ApiResult, AppState, DiseaseDetection, NewDiseaseDetection};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/disease-detections", post(create_detection))
        .route("/api/disease-detections", get(list_detections))
}

async fn create_detection(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewDiseaseDetection>, JsonRejection>,
) -> ApiResult<Json<DiseaseDetection>> {
    // ---
    let Json(new_detection) =
        payload.map_err(|_| ApiError::Validation("Invalid disease detection data"))?;
    Ok(Json(store.create_disease_detection(new_detection).await))
}

async fn list_detections(
    Query(params): Query<OwnerQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<DiseaseDetection>>> {
    // ---
    let user_id = require_user_id(&params)?;
    Ok(Json(store.get_disease_detections_by_user(user_id).await))
}
