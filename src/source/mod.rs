//! Where raw daily series come from.
//!
//! The engine only talks to a [`ClimateSource`]; [`power::PowerClient`] is the
//! production implementation backed by the NASA POWER daily point API.

pub mod error;
pub mod power;

use crate::source::error::SourceError;
use crate::types::grid::GridPoint;
use crate::types::parameter::ClimateParameter;
use crate::types::window::HistoricalWindow;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Daily values keyed by `YYYYMMDD`. `-999` marks a missing observation.
///
/// Keys sort chronologically, so iteration order is date order.
pub type RawSeries = BTreeMap<String, f64>;

/// Every raw series returned for one grid point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSeries {
    series: HashMap<ClimateParameter, RawSeries>,
}

impl PointSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parameter: ClimateParameter, series: RawSeries) -> Self {
        self.series.insert(parameter, series);
        self
    }

    pub fn insert(&mut self, parameter: ClimateParameter, series: RawSeries) {
        self.series.insert(parameter, series);
    }

    /// The series for `parameter`, if the source returned one.
    pub fn get(&self, parameter: ClimateParameter) -> Option<&RawSeries> {
        self.series.get(&parameter)
    }
}

/// A provider of historical daily series for a single location.
///
/// Implementations must be stateless with respect to a prediction: the engine
/// calls `fetch_point` concurrently for every grid point of a query.
#[async_trait]
pub trait ClimateSource: Send + Sync {
    /// Fetches temperature, precipitation and wind speed for `point`, covering
    /// the full date range of `window`.
    async fn fetch_point(
        &self,
        point: &GridPoint,
        window: &HistoricalWindow,
    ) -> Result<PointSeries, SourceError>;
}
