//! Expert directory endpoints. Listing is sorted best-rated first.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::{ApiError, ApiResult, AppState, Expert, NewExpert};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/experts", post(create_expert))
        .route("/api/experts", get(list_experts))
}

async fn create_expert(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewExpert>, JsonRejection>,
) -> ApiResult<Json<Expert>> {
    // ---
    let Json(new_expert) = payload.map_err(|_| ApiError::Validation("Invalid expert data"))?;
    Ok(Json(store.create_expert(new_expert).await))
}

async fn list_experts(State((store, _)): State<AppState>) -> ApiResult<Json<Vec<Expert>>> {
    // ---
    Ok(Json(store.get_experts().await))
}
