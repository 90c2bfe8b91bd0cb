//! Farm income and expense tracking endpoints, scoped per farmer.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{require_user_id, OwnerQuery};
use crate::{ApiError, ApiResult, AppState, FinancialRecord, NewFinancialRecord};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/financial-records", post(create_record))
        .route("/api/financial-records", get(list_records))
}

async fn create_record(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewFinancialRecord>, JsonRejection>,
) -> ApiResult<Json<FinancialRecord>> {
    // ---
    let Json(new_record) =
        payload.map_err(|_| ApiError::Validation("Invalid financial record data"))?;
    Ok(Json(store.create_financial_record(new_record).await))
}

async fn list_records(
    Query(params): Query<OwnerQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<FinancialRecord>>> {
    // ---
    let user_id = require_user_id(&params)?;
    Ok(Json(store.get_financial_records_by_user(user_id).await))
}
