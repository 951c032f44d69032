//! Fixed payloads served when an upstream service is unavailable
//!
//! Both aggregation endpoints answer with these instead of an error, so the
//! front end always receives a renderable body. The same values back the
//! tests that validate the fallback schema.

use chrono::NaiveDate;

use crate::models::{ConversionResult, CurrencyOption, ForecastDay, WeatherSnapshot};

/// A response body together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub enum Served<T> {
    /// Built from upstream data
    Live(T),
    /// Substituted after an upstream failure
    Fallback(T),
}

impl<T> Served<T> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Served::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Served::Live(value) | Served::Fallback(value) => value,
        }
    }
}

/// Currency the fallback conversion targets
pub const FALLBACK_TARGET_CURRENCY: &str = "USD";

/// INR to USD rate used by the fallback conversion
pub const FALLBACK_RATE: f64 = 0.012;

/// Location reported by the fallback forecast
pub const FALLBACK_LOCATION: &str = "London";

const FALLBACK_CURRENCIES: [(&str, &str); 5] = [
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("AUD", "Australian Dollar"),
];

/// First day of the fallback forecast, the rest follow consecutively
const FALLBACK_FIRST_DAY: NaiveDate = match NaiveDate::from_ymd_opt(2025, 11, 5) {
    Some(date) => date,
    None => panic!("invalid fallback forecast date"),
};

// (max, min, condition, precipitation mm, probability %)
const FALLBACK_FORECAST: [(i64, i64, &str, f64, u8); 5] = [
    (22, 16, "Partly cloudy", 0.0, 10),
    (20, 14, "Overcast", 0.0, 20),
    (19, 13, "Slight rain", 2.0, 60),
    (18, 12, "Moderate rain", 5.0, 80),
    (21, 15, "Clear sky", 0.0, 5),
];

/// Fallback list of selectable currencies
#[must_use]
pub fn currencies() -> Vec<CurrencyOption> {
    FALLBACK_CURRENCIES
        .iter()
        .map(|(code, name)| CurrencyOption::new(*code, *name))
        .collect()
}

/// Conversion of 1 INR into USD at a fixed rate
#[must_use]
pub fn conversion() -> ConversionResult {
    ConversionResult {
        amount: 1.0,
        source_currency: crate::currency::SOURCE_CURRENCY.to_string(),
        target_currency: FALLBACK_TARGET_CURRENCY.to_string(),
        converted_amount: FALLBACK_RATE,
        rate: format!("{FALLBACK_RATE:.4}"),
        available_currencies: currencies(),
    }
}

/// Five-day London forecast
#[must_use]
pub fn weather() -> WeatherSnapshot {
    let forecast = FALLBACK_FIRST_DAY
        .iter_days()
        .zip(FALLBACK_FORECAST)
        .map(
            |(date, (max_temp, min_temp, condition, precipitation, probability))| ForecastDay {
                date,
                max_temp,
                min_temp,
                condition: condition.to_string(),
                precipitation,
                precipitation_probability: probability,
            },
        )
        .collect();

    WeatherSnapshot {
        temperature: 22,
        apparent_temperature: 20,
        condition: "Partly cloudy".to_string(),
        humidity: 65,
        wind_speed: "8.5".to_string(),
        location: FALLBACK_LOCATION.to_string(),
        sunrise: "2025-11-05T07:15:00".to_string(),
        sunset: "2025-11-05T16:45:00".to_string(),
        daylight_duration: "9.5".to_string(),
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_conversion_is_consistent() {
        let conversion = conversion();
        assert_eq!(conversion.source_currency, "INR");
        assert_eq!(conversion.target_currency, "USD");
        assert_eq!(conversion.rate, "0.0120");
        assert_eq!(conversion.converted_amount, 0.012);
        assert_eq!(conversion.available_currencies.len(), 5);
        assert!(
            conversion
                .available_currencies
                .iter()
                .any(|c| c.code == conversion.target_currency)
        );
    }

    #[test]
    fn test_fallback_weather_has_five_chronological_days() {
        let weather = weather();
        assert_eq!(weather.location, "London");
        assert_eq!(weather.forecast.len(), 5);
        assert!(weather.forecast.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(weather.forecast[3].condition, "Moderate rain");
    }

    #[test]
    fn test_fallback_weather_days_are_consecutive() {
        let dates: Vec<String> = weather()
            .forecast
            .iter()
            .map(|day| day.date.to_string())
            .collect();
        assert_eq!(
            dates,
            ["2025-11-05", "2025-11-06", "2025-11-07", "2025-11-08", "2025-11-09"]
        );
    }
}
