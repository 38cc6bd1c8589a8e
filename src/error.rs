use crate::aggregation::error::AggregationError;
use crate::source::error::SourceError;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherOddsError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Invalid {field} {value}: expected a value in [{min}, {max}]")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid date '{0}': expected an ISO-8601 date or timestamp")]
    InvalidDate(String),

    #[error("Malformed prediction request")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("No historical window of {years} years before {reference_year} for {date}")]
    InvalidWindow {
        date: NaiveDate,
        reference_year: i32,
        years: u32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WeatherOddsError {
    /// Whether the caller sent something the engine cannot work with.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WeatherOddsError::InvalidCoordinate { .. }
                | WeatherOddsError::InvalidDate(_)
                | WeatherOddsError::MalformedRequest(_)
                | WeatherOddsError::InvalidWindow { .. }
        )
    }

    /// Status a transport layer should answer with.
    ///
    /// Input errors map to 400, upstream HTTP failures keep the archive's status,
    /// anything else is a 500.
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            return StatusCode::BAD_REQUEST;
        }
        let upstream = match self {
            WeatherOddsError::Aggregation(e) => e.status(),
            WeatherOddsError::Source(e) => e.status(),
            _ => None,
        };
        upstream
            .filter(|status| !status.is_success())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Error body returned to callers instead of a `PredictionResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&WeatherOddsError> for ErrorResponse {
    fn from(err: &WeatherOddsError) -> Self {
        // Flatten the source chain so the upstream status and message survive.
        let mut error = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            error.push_str(": ");
            error.push_str(&cause.to_string());
            source = cause.source();
        }
        ErrorResponse { error }
    }
}
