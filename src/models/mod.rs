//! Data models for the `InfoHub` service
//!
//! This module contains the response DTOs organized by concern:
//! - Currency: conversion results and selectable currencies
//! - Weather: current conditions and daily forecast entries
//! - Quote: a single quote with its author
//! - Location: named coordinates used to query the forecast service

pub mod currency;
pub mod location;
pub mod quote;
pub mod weather;

// Re-export all public types for convenient access
pub use currency::{ConversionResult, CurrencyOption};
pub use location::Location;
pub use quote::Quote;
pub use weather::{ForecastDay, WeatherSnapshot};
