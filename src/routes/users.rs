//! User profile endpoints: fetch by id and partial update.
//!
//! The update path accepts a `password` key for wire compatibility but the
//! store drops it; password changes are not a profile concern.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::{ApiError, ApiResult, AppState, User, UserUpdate};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", patch(update_user))
}

async fn get_user(
    Path(id): Path<String>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<User>> {
    // ---
    let user = store
        .get_user(&id)
        .await
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}

async fn update_user(
    Path(id): Path<String>,
    State((store, _)): State<AppState>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> ApiResult<Json<User>> {
    // ---
    let Json(update) = payload.map_err(|_| ApiError::Validation("Failed to update user"))?;
    let user = store.update_user(&id, update).await?;
    Ok(Json(user))
}
