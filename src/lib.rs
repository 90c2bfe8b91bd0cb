//! Backend service for Krishi Sahayi, a farming assistant for Kerala
//! smallholders.
//!
//! The crate is a single process with no external dependencies at runtime:
//! an in-memory [`store::Store`] holds every entity family, the
//! [`assistant`] module answers voice queries from a fixed rule table, and
//! [`simulation`] synthesizes disease diagnoses and fertilizer advice in
//! place of real models. The [`routes`] gateway exposes it all as a JSON
//! API over axum.

use std::sync::Arc;

pub mod assistant;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod simulation;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult, StoreError};
pub use store::Store;

// Entity types are re-exported at the crate root for routes/*.rs and the
// integration tests, that way refactoring is easier since those modules
// depend only on their parent crate root, not on models.rs directly.
pub use models::*;

/// Shared application state installed by the routes gateway.
pub type AppState = (Arc<Store>, Config);
