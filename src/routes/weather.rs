//! Weather endpoints, keyed by normalized location.
//!
//! The path parameter accepts anything the client has ("Ernakulam, Kerala",
//! "ernakulam"); the store reduces it to the shared location key.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::{ApiError, ApiResult, AppState, NewWeatherReport, WeatherReport};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/weather/{location}", get(get_weather))
        .route("/api/weather", post(create_weather))
}

async fn get_weather(
    Path(location): Path<String>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<WeatherReport>> {
    // ---
    let report = store
        .get_weather(&location)
        .await
        .ok_or_else(|| ApiError::not_found("Weather data not found for this location"))?;
    Ok(Json(report))
}

async fn create_weather(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewWeatherReport>, JsonRejection>,
) -> ApiResult<Json<WeatherReport>> {
    // ---
    let Json(new_report) = payload.map_err(|_| ApiError::Validation("Invalid weather data"))?;
    Ok(Json(store.create_weather(new_report).await))
}
