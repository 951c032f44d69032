//! Currency conversion from the domestic currency (INR)
//!
//! Combines the upstream currency-name table and the INR-based rate table
//! into a single [`ConversionResult`]. Upstream failures never reach the
//! caller: they are logged and replaced by [`fallback::conversion`].

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::fallback::{self, Served};
use crate::models::{ConversionResult, CurrencyOption};
use crate::{InfoHubError, Result};

pub mod frankfurter;

/// Currency every conversion starts from
pub const SOURCE_CURRENCY: &str = "INR";

/// Currency converted into when the request names none
pub const DEFAULT_TARGET_CURRENCY: &str = "USD";

const DEFAULT_AMOUNT: f64 = 1.0;

/// Beyond this magnitude an f64 carries no fractional cents
const WHOLE_UNITS_ONLY: f64 = 1e15;

/// Source of currency names and exchange rates
#[async_trait]
pub trait CurrencyProvider: Send + Sync {
    /// All supported currencies, in upstream order
    async fn currencies(&self) -> Result<Vec<CurrencyOption>>;

    /// Rates of every supported currency against `base`
    async fn latest_rates(&self, base: &str) -> Result<HashMap<String, f64>>;
}

/// Validated conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub currency: String,
}

impl ConversionRequest {
    /// Parse raw query values. Empty values fall back to the defaults.
    pub fn parse(amount: Option<&str>, currency: Option<&str>) -> Result<Self> {
        Ok(Self {
            amount: parse_amount(amount)?,
            currency: normalize_code(currency),
        })
    }
}

fn parse_amount(raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Ok(DEFAULT_AMOUNT);
    };

    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(InfoHubError::invalid_input("Invalid amount")),
    }
}

fn normalize_code(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_TARGET_CURRENCY)
        .to_ascii_uppercase()
}

/// Round to 2 decimals, half away from zero
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    if value.abs() >= WHOLE_UNITS_ONLY {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Build the response for `request` from already fetched upstream tables
pub fn build_conversion(
    request: &ConversionRequest,
    currencies: Vec<CurrencyOption>,
    mut rates: HashMap<String, f64>,
) -> Result<ConversionResult> {
    // The rate table is keyed against the base, which therefore never lists itself
    rates.entry(SOURCE_CURRENCY.to_string()).or_insert(1.0);

    let rate = *rates
        .get(&request.currency)
        .ok_or_else(|| InfoHubError::unsupported_currency(&request.currency))?;

    let converted = request.amount * rate;
    if !converted.is_finite() {
        return Err(InfoHubError::invalid_input("Invalid amount"));
    }

    Ok(ConversionResult {
        amount: request.amount,
        source_currency: SOURCE_CURRENCY.to_string(),
        target_currency: request.currency.clone(),
        converted_amount: round_cents(converted),
        rate: format!("{rate:.4}"),
        available_currencies: currencies,
    })
}

/// Convert `request.amount` INR into `request.currency`.
///
/// Returns an error only for an unsupported currency; upstream failures
/// yield the fallback payload.
#[instrument(skip(provider))]
pub async fn convert(
    provider: &dyn CurrencyProvider,
    request: &ConversionRequest,
) -> Result<Served<ConversionResult>> {
    let fetched = tokio::try_join!(provider.currencies(), provider.latest_rates(SOURCE_CURRENCY));

    let (currencies, rates) = match fetched {
        Ok(tables) => tables,
        Err(e) => {
            warn!("Currency upstream failed, serving fallback conversion: {}", e);
            return Ok(Served::Fallback(fallback::conversion()));
        }
    };

    debug!(
        "Fetched {} currencies and {} rates",
        currencies.len(),
        rates.len()
    );
    build_conversion(request, currencies, rates).map(Served::Live)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tables() -> (Vec<CurrencyOption>, HashMap<String, f64>) {
        let currencies = vec![
            CurrencyOption::new("EUR", "Euro"),
            CurrencyOption::new("INR", "Indian Rupee"),
            CurrencyOption::new("JPY", "Japanese Yen"),
            CurrencyOption::new("USD", "United States Dollar"),
        ];
        let rates = HashMap::from([
            ("EUR".to_string(), 0.01034),
            ("JPY".to_string(), 1.7712),
            ("USD".to_string(), 0.011987),
        ]);
        (currencies, rates)
    }

    #[rstest]
    #[case(None, 1.0)]
    #[case(Some(""), 1.0)]
    #[case(Some("250"), 250.0)]
    #[case(Some(" 12.5 "), 12.5)]
    fn test_parse_amount_accepts_positive_numbers(#[case] raw: Option<&str>, #[case] expected: f64) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("abc")]
    #[case("12abc")]
    #[case("NaN")]
    #[case("inf")]
    fn test_parse_amount_rejects_invalid(#[case] raw: &str) {
        let err = parse_amount(Some(raw)).unwrap_err();
        assert!(matches!(err, InfoHubError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "Invalid amount");
    }

    #[test]
    fn test_currency_code_is_normalized() {
        assert_eq!(normalize_code(None), "USD");
        assert_eq!(normalize_code(Some("  ")), "USD");
        assert_eq!(normalize_code(Some(" eur ")), "EUR");
    }

    #[test]
    fn test_build_conversion_rounds_amount_and_formats_rate() {
        let (currencies, rates) = tables();
        let request = ConversionRequest::parse(Some("100"), Some("USD")).unwrap();

        let result = build_conversion(&request, currencies.clone(), rates).unwrap();

        assert_eq!(result.source_currency, "INR");
        assert_eq!(result.target_currency, "USD");
        assert_eq!(result.converted_amount, 1.2);
        assert_eq!(result.rate, "0.0120");
        assert_eq!(result.available_currencies, currencies);
    }

    #[test]
    fn test_build_conversion_keeps_four_decimals_for_large_rates() {
        let (currencies, rates) = tables();
        let request = ConversionRequest::parse(Some("3"), Some("JPY")).unwrap();

        let result = build_conversion(&request, currencies, rates).unwrap();

        assert_eq!(result.rate, "1.7712");
        assert_eq!(result.converted_amount, 5.31);
    }

    #[test]
    fn test_build_conversion_rejects_unknown_currency() {
        let (currencies, rates) = tables();
        let request = ConversionRequest::parse(None, Some("XYZ")).unwrap();

        let err = build_conversion(&request, currencies, rates).unwrap_err();

        assert!(matches!(err, InfoHubError::UnsupportedCurrency { ref code } if code == "XYZ"));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_every_listed_currency_converts() {
        let (currencies, rates) = tables();
        for option in &currencies {
            let request = ConversionRequest::parse(Some("10"), Some(&option.code)).unwrap();
            let result = build_conversion(&request, currencies.clone(), rates.clone()).unwrap();
            let rate: f64 = result.rate.parse().unwrap();
            assert!((result.converted_amount - round_cents(10.0 * rates.get(&option.code).copied().unwrap_or(1.0))).abs() < 1e-9);
            assert!(rate > 0.0);
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.236), 1.24);
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(-2.345_1), -2.35);
    }

    #[rstest]
    #[case(1e15)]
    #[case(1e307)]
    #[case(f64::MAX)]
    fn test_round_cents_keeps_huge_values_finite(#[case] value: f64) {
        assert_eq!(round_cents(value), value);
    }

    #[test]
    fn test_build_conversion_of_huge_amount_stays_numeric() {
        let (currencies, rates) = tables();
        let request = ConversionRequest::parse(Some("1e307"), Some("INR")).unwrap();

        let result = build_conversion(&request, currencies, rates).unwrap();

        assert!(result.converted_amount.is_finite());
        assert_eq!(result.converted_amount, 1e307);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["convertedAmount"].is_number());
    }

    #[test]
    fn test_build_conversion_rejects_overflowing_product() {
        let (currencies, rates) = tables();
        let request = ConversionRequest::parse(Some("1.5e308"), Some("JPY")).unwrap();

        let err = build_conversion(&request, currencies, rates).unwrap_err();

        assert!(matches!(err, InfoHubError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "Invalid amount");
    }
}
