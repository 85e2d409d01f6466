//! JSON HTTP API exposing quotes and simulations.

use crate::state::SharedService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use braitsure_core::{ExchangeQuote, SimulationResult};
use braitsure_engine::best_option;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/prices", get(prices))
        .route("/api/simulate", post(simulate))
        .route("/api/resale-price", put(set_resale_price).get(resale_price))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> &'static str {
    "ok"
}

/// One quote per supported exchange; failed sources appear with a null
/// buy price, never as missing entries.
async fn prices(State(service): State<SharedService>) -> Json<Vec<ExchangeQuote>> {
    Json(service.quotes().await)
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    amount: f64,
}

#[derive(Debug, Serialize)]
struct SimulateResponse {
    #[serde(rename = "resalePrice")]
    resale_price: f64,
    results: Vec<SimulationResult>,
    /// Index of the best row in `results`, when any row is profitable.
    best: Option<usize>,
}

async fn simulate(
    State(service): State<SharedService>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, (StatusCode, String)> {
    let results = service
        .simulate(request.amount)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(SimulateResponse {
        resale_price: service.resale_price(),
        best: best_option(&results),
        results,
    }))
}

#[derive(Debug, Serialize)]
struct ResalePriceResponse {
    price: f64,
}

async fn resale_price(State(service): State<SharedService>) -> Json<ResalePriceResponse> {
    Json(ResalePriceResponse {
        price: service.resale_price(),
    })
}

#[derive(Debug, Deserialize)]
struct ResalePriceRequest {
    price: f64,
}

async fn set_resale_price(
    State(service): State<SharedService>,
    Json(request): Json<ResalePriceRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    service
        .set_resale_price(request.price)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
