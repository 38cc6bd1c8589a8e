use crate::aggregation::error::AggregationError;
use crate::aggregation::{FetchPolicy, SampleSelection};
use crate::source::error::SourceError;
use crate::source::{ClimateSource, PointSeries};
use crate::stats::sentinel::{clean_series, is_sentinel};
use crate::types::grid::{Grid, GridPoint};
use crate::types::parameter::ClimateParameter;
use crate::types::window::{parse_key, HistoricalWindow};
use chrono::Datelike;
use futures_util::future::join_all;
use log::{debug, warn};
use std::collections::BTreeSet;

/// Result of fetching a single grid point, kept so the policy can look at all of them.
#[derive(Debug)]
pub enum PointOutcome {
    Fetched {
        point: GridPoint,
        series: PointSeries,
    },
    Failed {
        point: GridPoint,
        error: SourceError,
    },
}

impl PointOutcome {
    pub fn point(&self) -> &GridPoint {
        match self {
            PointOutcome::Fetched { point, .. } | PointOutcome::Failed { point, .. } => point,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, PointOutcome::Fetched { .. })
    }
}

/// Cleaned observations pooled over every fetched grid point.
///
/// Samples are in grid order (center, north, south, east, west) and in date
/// order within a point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PooledSamples {
    pub temperature: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub wind_speed: Vec<f64>,
    /// Years with at least one temperature observation.
    pub temperature_years: BTreeSet<i32>,
    /// Grid points left out under a quorum policy.
    pub dropped_points: Vec<GridPoint>,
}

impl PooledSamples {
    pub fn sample(&self, parameter: ClimateParameter) -> &[f64] {
        match parameter {
            ClimateParameter::Temperature => &self.temperature,
            ClimateParameter::Precipitation => &self.precipitation,
            ClimateParameter::WindSpeed => &self.wind_speed,
        }
    }

    fn sample_mut(&mut self, parameter: ClimateParameter) -> &mut Vec<f64> {
        match parameter {
            ClimateParameter::Temperature => &mut self.temperature,
            ClimateParameter::Precipitation => &mut self.precipitation,
            ClimateParameter::WindSpeed => &mut self.wind_speed,
        }
    }

    pub fn data_years(&self) -> usize {
        self.temperature_years.len()
    }

    /// Appends the cleaned series of one grid point.
    pub fn pool(
        &mut self,
        series: &PointSeries,
        window: &HistoricalWindow,
        selection: SampleSelection,
    ) {
        for parameter in ClimateParameter::ALL {
            let Some(raw) = series.get(parameter) else {
                continue;
            };
            let selected = selection.select(raw, window);
            self.sample_mut(parameter)
                .extend(clean_series(Some(&selected)));

            if parameter == ClimateParameter::Temperature {
                self.temperature_years.extend(
                    selected
                        .iter()
                        .filter(|(_, value)| !is_sentinel(**value))
                        .filter_map(|(key, _)| parse_key(key))
                        .map(|date| date.year()),
                );
            }
        }
    }
}

/// Fetches every grid point concurrently and pools the results under a [`FetchPolicy`].
pub struct GridAggregator<'a> {
    source: &'a dyn ClimateSource,
    policy: FetchPolicy,
    selection: SampleSelection,
}

impl<'a> GridAggregator<'a> {
    pub fn new(source: &'a dyn ClimateSource) -> Self {
        Self {
            source,
            policy: FetchPolicy::default(),
            selection: SampleSelection::default(),
        }
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_selection(mut self, selection: SampleSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Fetches and pools, failing according to the configured policy.
    pub async fn aggregate(
        &self,
        grid: &Grid,
        window: &HistoricalWindow,
    ) -> Result<PooledSamples, AggregationError> {
        let outcomes = self.fetch_all(grid, window).await;
        self.resolve(outcomes, window)
    }

    /// Issues one fetch per grid point and waits for all of them.
    ///
    /// Outcomes come back in grid order regardless of completion order.
    pub async fn fetch_all(&self, grid: &Grid, window: &HistoricalWindow) -> Vec<PointOutcome> {
        let fetches = grid.points().iter().map(|point| async move {
            match self.source.fetch_point(point, window).await {
                Ok(series) => PointOutcome::Fetched {
                    point: *point,
                    series,
                },
                Err(error) => PointOutcome::Failed {
                    point: *point,
                    error,
                },
            }
        });
        join_all(fetches).await
    }

    /// Applies the policy to a full set of outcomes and pools the fetched ones.
    pub fn resolve(
        &self,
        outcomes: Vec<PointOutcome>,
        window: &HistoricalWindow,
    ) -> Result<PooledSamples, AggregationError> {
        let total = outcomes.len();
        let required = self.policy.required(total);

        let mut fetched = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                PointOutcome::Fetched { point, series } => fetched.push((point, series)),
                PointOutcome::Failed { point, error } => failures.push((point, error)),
            }
        }

        if fetched.len() < required {
            let failed = failures.iter().map(|(point, _)| point.position).collect();
            // At least one failure exists here since fetched < required <= total.
            let mut failures = failures.into_iter();
            let Some((point, error)) = failures.next() else {
                return Ok(PooledSamples::default());
            };
            return Err(match self.policy {
                FetchPolicy::RequireAll => AggregationError::GridPointFetch {
                    point,
                    source: error,
                },
                FetchPolicy::Quorum(_) => AggregationError::QuorumNotMet {
                    required,
                    succeeded: fetched.len(),
                    total,
                    failed,
                    first_failure: error,
                },
            });
        }

        let mut pooled = PooledSamples::default();
        for (point, error) in failures {
            warn!("Dropping grid point {}: {}", point, error);
            pooled.dropped_points.push(point);
        }
        for (point, series) in &fetched {
            let before = pooled.temperature.len();
            pooled.pool(series, window, self.selection);
            debug!(
                "Pooled {} temperature observations from {}",
                pooled.temperature.len() - before,
                point
            );
        }
        Ok(pooled)
    }
}
