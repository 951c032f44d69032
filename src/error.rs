//! Error types and handling for the `InfoHub` service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `InfoHub` service
#[derive(Error, Debug)]
pub enum InfoHubError {
    /// Malformed or out-of-range request parameter
    #[error("{message}")]
    InvalidInput { message: String },

    /// Requested currency code is absent from the rate table
    #[error("Currency {code} not supported")]
    UnsupportedCurrency { code: String },

    /// Network failure, non-success status or malformed body from an upstream call
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable { service: String, message: String },

    /// Unexpected runtime fault
    #[error("{message}")]
    Internal { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl InfoHubError {
    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unsupported_currency<S: Into<String>>(code: S) -> Self {
        Self::UnsupportedCurrency { code: code.into() }
    }

    /// Create a new upstream error for the named service
    pub fn upstream<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error is surfaced with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            InfoHubError::InvalidInput { .. } | InfoHubError::UnsupportedCurrency { .. } => {
                StatusCode::BAD_REQUEST
            }
            InfoHubError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            InfoHubError::Internal { .. } | InfoHubError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to API consumers
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            InfoHubError::UpstreamUnavailable { .. } => {
                "Unable to reach an external service".to_string()
            }
            InfoHubError::Config { .. } => "Service misconfigured".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for InfoHubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}
