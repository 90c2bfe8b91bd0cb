//! Irrigation schedule endpoints, scoped per farmer.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{require_user_id, OwnerQuery};
use crate::{ApiError, ApiResult, AppState, IrrigationSchedule, NewIrrigationSchedule};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/irrigation-schedules", post(create_schedule))
        .route("/api/irrigation-schedules", get(list_schedules))
}

async fn create_schedule(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewIrrigationSchedule>, JsonRejection>,
) -> ApiResult<Json<IrrigationSchedule>> {
    // ---
    let Json(new_schedule) =
        payload.map_err(|_| ApiError::Validation("Invalid irrigation schedule data"))?;
    Ok(Json(store.create_irrigation_schedule(new_schedule).await))
}

async fn list_schedules(
    Query(params): Query<OwnerQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<IrrigationSchedule>>> {
    // ---
    let user_id = require_user_id(&params)?;
    Ok(Json(store.get_irrigation_schedules_by_user(user_id).await))
}
