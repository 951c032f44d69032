//! HTTP handlers for the dashboard endpoints
//!
//! - `GET /currency?amount=&currency=` converts INR into another currency
//! - `GET /weather?city=&days=` current conditions plus a daily forecast
//! - `GET /quote` one random quote
//!
//! Currency and weather answer with a fallback body when their upstream
//! fails; such responses carry the [`FALLBACK_HEADER`] header.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::InfoHubError;
use crate::config::UpstreamConfig;
use crate::currency::{self, ConversionRequest, CurrencyProvider, frankfurter::FrankfurterClient};
use crate::fallback::Served;
use crate::quote;
use crate::weather::{self, ForecastProvider, WeatherRequest, open_meteo::OpenMeteoClient};

/// Set to `true` on responses served from a fallback payload
pub const FALLBACK_HEADER: &str = "x-infohub-fallback";

const CURRENCY_CACHE_CONTROL: &str = "public, max-age=3600";
const WEATHER_CACHE_CONTROL: &str = "public, max-age=600";
const NO_STORE: &str = "no-store";

/// Upstream clients shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub currency: Arc<dyn CurrencyProvider>,
    pub weather: Arc<dyn ForecastProvider>,
}

impl AppState {
    pub fn new(currency: Arc<dyn CurrencyProvider>, weather: Arc<dyn ForecastProvider>) -> Self {
        Self { currency, weather }
    }

    /// Build HTTP-backed providers from configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        info!(
            "Upstreams: currency={} weather={} (timeout {}s)",
            config.currency_base_url, config.weather_base_url, config.timeout_seconds
        );

        Ok(Self::new(
            Arc::new(FrankfurterClient::new(
                client.clone(),
                config.currency_base_url.as_str(),
            )),
            Arc::new(OpenMeteoClient::new(client, config.weather_base_url.as_str())),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrencyQuery {
    pub amount: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub days: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/currency", get(get_currency))
        .route("/weather", get(get_weather))
        .route("/quote", get(get_quote))
        .with_state(state)
}

fn respond<T: Serialize>(served: Served<T>, cache_control: &'static str) -> Response {
    match served {
        Served::Live(body) => ([(CACHE_CONTROL.as_str(), cache_control)], Json(body)).into_response(),
        Served::Fallback(body) => (
            [(CACHE_CONTROL.as_str(), NO_STORE), (FALLBACK_HEADER, "true")],
            Json(body),
        )
            .into_response(),
    }
}

async fn get_currency(
    State(state): State<AppState>,
    Query(query): Query<CurrencyQuery>,
) -> Result<Response, InfoHubError> {
    let request = ConversionRequest::parse(query.amount.as_deref(), query.currency.as_deref())?;
    let served = currency::convert(state.currency.as_ref(), &request).await?;
    Ok(respond(served, CURRENCY_CACHE_CONTROL))
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Response {
    let request = WeatherRequest::parse(query.city.as_deref(), query.days.as_deref());
    let served = weather::snapshot(state.weather.as_ref(), &request).await;
    respond(served, WEATHER_CACHE_CONTROL)
}

async fn get_quote() -> Result<Response, InfoHubError> {
    let quote = quote::random_quote()?;
    Ok(([(CACHE_CONTROL, NO_STORE)], Json(quote)).into_response())
}
