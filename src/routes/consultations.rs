//! Consultation endpoints: ask an expert, list a farmer's threads, and
//! record the expert's side via PATCH.
//!
//! A PATCH carrying a `response` also stamps `responseTimestamp`, which the
//! client uses to show answer latency.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::{require_user_id, OwnerQuery};
use crate::{ApiError, ApiResult, AppState, Consultation, ConsultationUpdate, NewConsultation};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/consultations", post(create_consultation))
        .route("/api/consultations", get(list_consultations))
        .route("/api/consultations/{id}", patch(update_consultation))
}

async fn create_consultation(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewConsultation>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    // ---
    let Json(new_consultation) =
        payload.map_err(|_| ApiError::Validation("Invalid consultation data"))?;
    Ok(Json(store.create_consultation(new_consultation).await))
}

async fn list_consultations(
    Query(params): Query<OwnerQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<Consultation>>> {
    // ---
    let user_id = require_user_id(&params)?;
    Ok(Json(store.get_consultations_by_user(user_id).await))
}

async fn update_consultation(
    Path(id): Path<String>,
    State((store, _)): State<AppState>,
    payload: Result<Json<ConsultationUpdate>, JsonRejection>,
) -> ApiResult<Json<Consultation>> {
    // ---
    let Json(update) = payload.map_err(|_| ApiError::Validation("Failed to update consultation"))?;
    let consultation = store.update_consultation(&id, update).await?;
    Ok(Json(consultation))
}
