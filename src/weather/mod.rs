//! Weather snapshot aggregation
//!
//! Resolves a city name against a fixed table, asks a [`ForecastProvider`]
//! for current conditions and daily aggregates, and derives the display
//! fields of a [`WeatherSnapshot`]. Unknown cities resolve to London and any
//! upstream failure yields [`fallback::weather`].

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{instrument, warn};

use crate::fallback::{self, Served};
use crate::models::{ForecastDay, Location, WeatherSnapshot};
use crate::{InfoHubError, Result};

pub mod open_meteo;

pub const DEFAULT_DAYS: u8 = 5;
pub const MIN_DAYS: u8 = 1;
pub const MAX_DAYS: u8 = 7;

/// Cities the dashboard knows coordinates for. The first entry is the default.
pub const CITIES: [Location; 10] = [
    Location::new("London", 51.5074, -0.1278),
    Location::new("New York", 40.7128, -74.006),
    Location::new("Tokyo", 35.6762, 139.6503),
    Location::new("Paris", 48.8566, 2.3522),
    Location::new("Sydney", -33.8688, 151.2093),
    Location::new("Dubai", 25.2048, 55.2708),
    Location::new("Singapore", 1.3521, 103.8198),
    Location::new("Mumbai", 19.076, 72.8777),
    Location::new("Bangkok", 13.7563, 100.5018),
    Location::new("Toronto", 43.6532, -79.3832),
];

/// Current conditions as reported upstream
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub relative_humidity: f64,
    pub weather_code: Option<u16>,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

/// One day of upstream daily aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub weather_code: Option<u16>,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub sunrise: String,
    pub sunset: String,
    /// Daylight in seconds
    pub daylight_duration: f64,
    /// Precipitation total in mm
    pub precipitation: f64,
    pub precipitation_probability: f64,
}

/// Upstream forecast, chronological
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecast {
    pub current: CurrentConditions,
    pub daily: Vec<DailyAggregate>,
}

/// Source of current conditions and daily forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch `days` days of forecast for `location`, in UTC
    async fn forecast(&self, location: &Location, days: u8) -> Result<RawForecast>;
}

/// Validated weather request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub location: Location,
    pub days: u8,
}

impl WeatherRequest {
    /// Parse raw query values. Never fails: unknown input resolves to defaults.
    #[must_use]
    pub fn parse(city: Option<&str>, days: Option<&str>) -> Self {
        Self {
            location: resolve_city(city),
            days: clamp_days(days),
        }
    }
}

/// Look up `name` in the city table, case-insensitively. Unknown names resolve to London.
#[must_use]
pub fn resolve_city(name: Option<&str>) -> Location {
    let default = CITIES[0];
    let Some(name) = name.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name))
        .copied()
        .unwrap_or_else(|| {
            tracing::debug!("Unknown city '{}', using {}", name, default.name);
            default
        })
}

/// Parse the day count and clamp it to `MIN_DAYS..=MAX_DAYS`
#[must_use]
pub fn clamp_days(raw: Option<&str>) -> u8 {
    let days = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(i64::from(DEFAULT_DAYS));

    // Clamped into u8 range first, so the cast cannot truncate
    days.clamp(i64::from(MIN_DAYS), i64::from(MAX_DAYS)) as u8
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: Option<u16>) -> &'static str {
    match code {
        Some(0) => "Clear sky",
        Some(1) => "Mainly clear",
        Some(2) => "Partly cloudy",
        Some(3) => "Overcast",
        Some(45) => "Foggy",
        Some(48) => "Depositing rime fog",
        Some(51) => "Light drizzle",
        Some(53) => "Moderate drizzle",
        Some(55) => "Dense drizzle",
        Some(61) => "Slight rain",
        Some(63) => "Moderate rain",
        Some(65) => "Heavy rain",
        Some(71) => "Slight snow",
        Some(73) => "Moderate snow",
        Some(75) => "Heavy snow",
        Some(77) => "Snow grains",
        Some(80) => "Slight rain showers",
        Some(81) => "Moderate rain showers",
        Some(82) => "Violent rain showers",
        Some(85) => "Slight snow showers",
        Some(86) => "Heavy snow showers",
        Some(95) => "Thunderstorm",
        Some(96) => "Thunderstorm with slight hail",
        Some(99) => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Round to the nearest integer, halves towards positive infinity
#[must_use]
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn percentage(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Derive the display snapshot from an upstream forecast
pub fn derive_snapshot(request: &WeatherRequest, raw: RawForecast) -> Result<WeatherSnapshot> {
    let days = usize::from(request.days.max(MIN_DAYS));
    if raw.daily.len() < days {
        return Err(InfoHubError::upstream(
            "open-meteo",
            format!("expected {} daily entries, got {}", days, raw.daily.len()),
        ));
    }

    let first = &raw.daily[0];
    let current = &raw.current;

    let forecast = raw
        .daily
        .iter()
        .take(days)
        .map(|day| ForecastDay {
            date: day.date,
            max_temp: round_temperature(day.temperature_max),
            min_temp: round_temperature(day.temperature_min),
            condition: weather_code_to_description(day.weather_code).to_string(),
            precipitation: day.precipitation,
            precipitation_probability: percentage(day.precipitation_probability),
        })
        .collect();

    Ok(WeatherSnapshot {
        temperature: round_temperature(current.temperature),
        apparent_temperature: round_temperature(current.apparent_temperature),
        condition: weather_code_to_description(current.weather_code).to_string(),
        humidity: percentage(current.relative_humidity),
        wind_speed: format!("{:.1}", current.wind_speed),
        location: request.location.name.to_string(),
        sunrise: first.sunrise.clone(),
        sunset: first.sunset.clone(),
        daylight_duration: format!("{:.1}", first.daylight_duration / 3600.0),
        forecast,
    })
}

/// Current conditions and forecast for `request`, or the fallback forecast
#[instrument(skip(provider))]
pub async fn snapshot(
    provider: &dyn ForecastProvider,
    request: &WeatherRequest,
) -> Served<WeatherSnapshot> {
    let derived = provider
        .forecast(&request.location, request.days)
        .await
        .and_then(|raw| derive_snapshot(request, raw));

    match derived {
        Ok(snapshot) => Served::Live(snapshot),
        Err(e) => {
            warn!("Weather upstream failed, serving fallback forecast: {}", e);
            Served::Fallback(fallback::weather())
        }
    }
}
