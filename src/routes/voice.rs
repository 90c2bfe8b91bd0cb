//! Voice assistant endpoints.
//!
//! The client sends the transcribed query and its language; the server
//! generates the reply, logs the exchange, and returns the stored record so
//! the app can render both sides of the conversation.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::{assistant, ApiError, ApiResult, AppState, NewVoiceQuery, VoiceQuery};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/voice-query", post(create_voice_query))
        .route("/api/voice-queries/recent", get(recent_voice_queries))
}

/// Wire shape for a new query. The generated `response` is server-side
/// only, so a client supplying one is rejected as unknown.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct VoiceQueryRequest {
    // ---
    user_id: Option<String>,
    query: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn create_voice_query(
    State((store, _)): State<AppState>,
    payload: Result<Json<VoiceQueryRequest>, JsonRejection>,
) -> ApiResult<Json<VoiceQuery>> {
    // ---
    let Json(request) = payload.map_err(|_| ApiError::Validation("Invalid voice query data"))?;

    let response = assistant::generate_response(&request.query, &request.language);
    let record = store
        .create_voice_query(NewVoiceQuery {
            user_id: request.user_id,
            query: request.query,
            response: response.to_string(),
            language: request.language,
        })
        .await;

    Ok(Json(record))
}

async fn recent_voice_queries(
    params: Result<Query<RecentQuery>, QueryRejection>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<VoiceQuery>>> {
    // ---
    let Query(params) = params.map_err(|_| ApiError::Validation("Invalid limit"))?;
    let limit = params.limit.unwrap_or(10);
    Ok(Json(store.get_recent_voice_queries(limit).await))
}
