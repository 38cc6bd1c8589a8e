//! The validated, immutable query the engine works on, and the inbound
//! request shape it is built from.

use crate::error::WeatherOddsError;
use crate::types::grid::LatLon;
use crate::types::parameter::Variable;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The request object sent by UI callers.
///
/// ```json
/// {"lat": 52.52, "lon": 13.40, "date": "2026-07-04T00:00:00Z", "variables": ["temperature", "rainfall"]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub lat: f64,
    pub lon: f64,
    /// ISO-8601 date or timestamp.
    pub date: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl PredictionRequest {
    /// Parses a JSON request body. Missing or non-numeric fields are reported as
    /// [`WeatherOddsError::MalformedRequest`].
    pub fn from_json(body: &str) -> Result<Self, WeatherOddsError> {
        serde_json::from_str(body).map_err(WeatherOddsError::MalformedRequest)
    }
}

/// A single prediction query: where, which calendar day, and what the caller cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    location: LatLon,
    target_date: NaiveDate,
    requested_variables: BTreeSet<Variable>,
}

impl Query {
    /// Creates a query after checking the coordinates are finite and on the globe.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherOddsError::InvalidCoordinate`] for latitudes outside
    /// `[-90, 90]`, longitudes outside `[-180, 180]`, or non-finite values.
    pub fn new(
        location: LatLon,
        target_date: NaiveDate,
        variables: impl IntoIterator<Item = Variable>,
    ) -> Result<Self, WeatherOddsError> {
        check_range("latitude", location.0, -90.0, 90.0)?;
        check_range("longitude", location.1, -180.0, 180.0)?;
        Ok(Self {
            location,
            target_date,
            requested_variables: variables.into_iter().collect(),
        })
    }

    /// Validates an inbound request. Unknown variable names are ignored.
    pub fn from_request(request: &PredictionRequest) -> Result<Self, WeatherOddsError> {
        let target_date = parse_target_date(&request.date)?;
        let variables = request
            .variables
            .iter()
            .filter_map(|name| {
                let variable = Variable::parse(name);
                if variable.is_none() {
                    warn!("Ignoring unknown variable '{}'", name);
                }
                variable
            })
            .collect::<Vec<_>>();
        Self::new(LatLon(request.lat, request.lon), target_date, variables)
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    pub fn requested_variables(&self) -> &BTreeSet<Variable> {
        &self.requested_variables
    }

    pub fn requests(&self, variable: Variable) -> bool {
        self.requested_variables.contains(&variable)
    }
}

/// Parses the calendar date out of an ISO-8601 date or timestamp.
///
/// Accepts `2026-07-04`, RFC 3339 timestamps such as `2026-07-04T12:00:00Z` or
/// `2026-07-04T12:00:00+02:00` (the date is taken in the given offset), and
/// naive timestamps such as `2026-07-04T12:00:00`.
pub fn parse_target_date(input: &str) -> Result<NaiveDate, WeatherOddsError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    Err(WeatherOddsError::InvalidDate(input.to_string()))
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), WeatherOddsError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(WeatherOddsError::InvalidCoordinate {
            field,
            value,
            min,
            max,
        })
    }
}
