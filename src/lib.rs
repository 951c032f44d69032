//! `InfoHub` - backend of a small multi-tab information dashboard
//!
//! This library aggregates an exchange-rate service, a weather forecast
//! service and a static quote list behind uniform JSON endpoints. Upstream
//! failures are replaced by fixed fallback payloads so the front end always
//! receives a renderable response.

pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod models;
pub mod quote;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::InfoHubConfig;
pub use currency::CurrencyProvider;
pub use error::InfoHubError;
pub use fallback::Served;
pub use models::{ConversionResult, CurrencyOption, ForecastDay, Quote, WeatherSnapshot};
pub use weather::ForecastProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, InfoHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
