//! Fertilizer recommendation endpoints: synthesized advice per request,
//! history per farmer.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{require_user_id, OwnerQuery};
use crate::{ApiError, ApiResult, AppState, FertilizerRecommendation, NewFertilizerRecommendation};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/fertilizer-recommendations", post(create_recommendation))
        .route("/api/fertilizer-recommendations", get(list_recommendations))
}

async fn create_recommendation(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewFertilizerRecommendation>, JsonRejection>,
) -> ApiResult<Json<FertilizerRecommendation>> {
    // ---
    let Json(new_recommendation) =
        payload.map_err(|_| ApiError::Validation("Invalid fertilizer recommendation data"))?;
    Ok(Json(
        store
            .create_fertilizer_recommendation(new_recommendation)
            .await,
    ))
}

async fn list_recommendations(
    Query(params): Query<OwnerQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<FertilizerRecommendation>>> {
    // ---
    let user_id = require_user_id(&params)?;
    Ok(Json(
        store.get_fertilizer_recommendations_by_user(user_id).await,
    ))
}
