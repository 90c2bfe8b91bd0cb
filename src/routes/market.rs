//! Market price endpoints. Listing is open to all users; an optional
//! `?location=` narrows to markets whose name contains the filter.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState, MarketPrice, NewMarketPrice};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/market-prices", post(create_price))
        .route("/api/market-prices", get(list_prices))
}

#[derive(Debug, Deserialize)]
struct PriceQuery {
    location: Option<String>,
}

async fn create_price(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewMarketPrice>, JsonRejection>,
) -> ApiResult<Json<MarketPrice>> {
    // ---
    let Json(new_price) = payload.map_err(|_| ApiError::Validation("Invalid market price data"))?;
    Ok(Json(store.create_market_price(new_price).await))
}

async fn list_prices(
    Query(params): Query<PriceQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<MarketPrice>>> {
    // ---
    // An empty filter means no filter
    let location = params.location.as_deref().filter(|l| !l.is_empty());
    Ok(Json(store.get_market_prices(location).await))
}
