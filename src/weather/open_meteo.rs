//! `OpenMeteo` forecast API client and response structures

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{CurrentConditions, DailyAggregate, ForecastProvider, RawForecast};
use crate::models::Location;
use crate::{InfoHubError, Result};

const SERVICE: &str = "open-meteo";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m,apparent_temperature";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,daylight_duration,precipitation_sum,precipitation_probability_max";

/// Current weather and forecast response from `OpenMeteo` API
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// Current weather block
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    pub weather_code: Option<u16>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
}

/// Daily weather data, one column per variable
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<u16>>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub daylight_duration: Vec<Option<f64>>,
    #[serde(rename = "precipitation_sum", default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(rename = "precipitation_probability_max", default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

fn required<T: Clone>(column: &[Option<T>], index: usize, name: &str) -> Result<T> {
    column
        .get(index)
        .cloned()
        .flatten()
        .ok_or_else(|| InfoHubError::upstream(SERVICE, format!("missing daily {name} for day {index}")))
}

fn optional<T: Clone + Default>(column: &[Option<T>], index: usize) -> T {
    column.get(index).cloned().flatten().unwrap_or_default()
}

impl DailyData {
    /// Transpose the columns into one aggregate per day
    fn into_days(self) -> Result<Vec<DailyAggregate>> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                    InfoHubError::upstream(SERVICE, format!("invalid date '{date}': {e}"))
                })?;

                Ok(DailyAggregate {
                    date,
                    weather_code: self.weather_code.get(i).copied().flatten(),
                    temperature_max: required(&self.temperature_max, i, "temperature_2m_max")?,
                    temperature_min: required(&self.temperature_min, i, "temperature_2m_min")?,
                    sunrise: required(&self.sunrise, i, "sunrise")?,
                    sunset: required(&self.sunset, i, "sunset")?,
                    daylight_duration: required(&self.daylight_duration, i, "daylight_duration")?,
                    precipitation: optional(&self.precipitation, i),
                    precipitation_probability: optional(&self.precipitation_probability, i),
                })
            })
            .collect()
    }
}

impl TryFrom<ForecastResponse> for RawForecast {
    type Error = InfoHubError;

    fn try_from(response: ForecastResponse) -> Result<Self> {
        let current = response
            .current
            .ok_or_else(|| InfoHubError::upstream(SERVICE, "no current weather block"))?;
        let daily = response
            .daily
            .ok_or_else(|| InfoHubError::upstream(SERVICE, "no daily forecast block"))?;

        Ok(RawForecast {
            current: CurrentConditions {
                temperature: current.temperature,
                apparent_temperature: current.apparent_temperature,
                relative_humidity: current.relative_humidity,
                weather_code: current.weather_code,
                wind_speed: current.wind_speed,
            },
            daily: daily.into_days()?,
        })
    }
}

/// Forecast client for the `OpenMeteo` API (no API key required)
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn forecast_url(&self, location: &Location, days: u8) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&daily={}&timezone=GMT&forecast_days={}&wind_speed_unit=ms",
            self.base_url, location.latitude, location.longitude, CURRENT_FIELDS, DAILY_FIELDS, days
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(city = location.name))]
    async fn forecast(&self, location: &Location, days: u8) -> Result<RawForecast> {
        info!(
            "Getting {}-day forecast for {} ({})",
            days,
            location.name,
            location.format_coordinates()
        );
        let start_time = Instant::now();

        let url = self.forecast_url(location, days);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| InfoHubError::upstream(SERVICE, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("OpenMeteo answered with HTTP {}", status);
            return Err(InfoHubError::upstream(SERVICE, format!("HTTP {status}")));
        }

        let forecast_response: ForecastResponse = response
            .json()
            .await
            .map_err(|e| InfoHubError::upstream(SERVICE, format!("invalid body: {e}")))?;

        let forecast = RawForecast::try_from(forecast_response)?;

        info!(
            "Retrieved forecast with {} days in {:.3}s",
            forecast.daily.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(forecast)
    }
}
