//! Broadcast alert endpoints. Listing only ever shows active alerts.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::{Alert, ApiError, ApiResult, AppState, NewAlert};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/alerts", get(get_alerts))
        .route("/api/alerts", post(create_alert))
}

async fn get_alerts(State((store, _)): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    // ---
    Ok(Json(store.get_active_alerts().await))
}

async fn create_alert(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewAlert>, JsonRejection>,
) -> ApiResult<Json<Alert>> {
    // ---
    let Json(new_alert) = payload.map_err(|_| ApiError::Validation("Invalid alert data"))?;
    Ok(Json(store.create_alert(new_alert).await))
}
