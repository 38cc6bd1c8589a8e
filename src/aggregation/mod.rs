//! Fan-out over the grid, fan-in into one pooled sample per variable.

pub mod error;
pub mod grid_aggregator;

pub use grid_aggregator::{GridAggregator, PointOutcome, PooledSamples};

use crate::source::RawSeries;
use crate::types::window::HistoricalWindow;

/// How many grid-point fetches must succeed for a prediction to go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Every grid point must be fetched; the first failure aborts the aggregation.
    #[default]
    RequireAll,
    /// At least this many grid points must be fetched. Dropped points are
    /// reported in [`PooledSamples::dropped_points`].
    Quorum(usize),
}

impl FetchPolicy {
    /// Successful fetches needed out of `total`.
    pub fn required(&self, total: usize) -> usize {
        match self {
            FetchPolicy::RequireAll => total,
            FetchPolicy::Quorum(n) => (*n).min(total),
        }
    }
}

/// Which days of a fetched range end up in the pooled sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleSelection {
    /// Only the target calendar day of each year in the window.
    #[default]
    CalendarDay,
    /// Every day between the first and last day of the window.
    FullRange,
}

impl SampleSelection {
    /// The subset of `series` this selection keeps, still keyed by date.
    pub fn select(&self, series: &RawSeries, window: &HistoricalWindow) -> RawSeries {
        match self {
            SampleSelection::FullRange => series.clone(),
            SampleSelection::CalendarDay => series
                .iter()
                .filter(|(key, _)| window.matches_key(key))
                .map(|(key, value)| (key.clone(), *value))
                .collect(),
        }
    }
}
