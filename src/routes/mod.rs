//! Route gateway: merges every feature subrouter and installs the shared
//! state. `main.rs` sees one `router()` call and no individual endpoints.

use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use crate::{ApiError, Config, Store};

mod advisories;
mod alerts;
mod auth;
mod community;
mod consultations;
mod detections;
mod experts;
mod fertilizer;
mod finance;
mod health;
mod irrigation;
mod market;
mod soil;
mod users;
mod voice;
mod weather;

// ---

pub fn router(store: Arc<Store>, config: Config) -> Router {
    // ---
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(weather::router())
        .merge(soil::router())
        .merge(alerts::router())
        .merge(voice::router())
        .merge(detections::router())
        .merge(fertilizer::router())
        .merge(market::router())
        .merge(experts::router())
        .merge(consultations::router())
        .merge(community::router())
        .merge(finance::router())
        .merge(irrigation::router())
        .merge(advisories::router())
        .with_state((store, config))
}

/// Query shape for user-scoped listings (`?userId=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerQuery {
    pub(crate) user_id: Option<String>,
}

/// Reject a scoped listing before any storage access when the owner id is
/// missing or empty.
pub(crate) fn require_user_id(params: &OwnerQuery) -> Result<&str, ApiError> {
    // ---
    params
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::Validation("User ID is required"))
}
