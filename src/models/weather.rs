//! Weather snapshot and forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the daily forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub max_temp: i64,
    /// Minimum temperature in Celsius
    pub min_temp: i64,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Precipitation total in mm
    pub precipitation: f64,
    /// Precipitation probability in percent (0-100)
    pub precipitation_probability: u8,
}

/// Current conditions plus a chronological daily forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature: i64,
    /// Perceived temperature in Celsius
    pub apparent_temperature: i64,
    pub condition: String,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Wind speed in m/s, 1 decimal
    pub wind_speed: String,
    pub location: String,
    /// Local sunrise of the first forecast day
    pub sunrise: String,
    /// Local sunset of the first forecast day
    pub sunset: String,
    /// Daylight of the first forecast day in hours, 1 decimal
    pub daylight_duration: String,
    pub forecast: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_day_serializes_iso_date() {
        let day = ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            max_temp: 22,
            min_temp: 16,
            condition: "Partly cloudy".to_string(),
            precipitation: 0.4,
            precipitation_probability: 10,
        };

        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2025-11-05");
        assert_eq!(json["maxTemp"], 22);
        assert_eq!(json["precipitationProbability"], 10);
    }
}
