use crate::source::error::SourceError;
use crate::types::grid::{GridPoint, GridPosition};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Fetch failed for grid point {point}")]
    GridPointFetch {
        point: GridPoint,
        #[source]
        source: SourceError,
    },

    #[error("Only {succeeded} of {total} grid points were fetched, at least {required} required (failed: {failed:?})")]
    QuorumNotMet {
        required: usize,
        succeeded: usize,
        total: usize,
        failed: Vec<GridPosition>,
        #[source]
        first_failure: SourceError,
    },
}

impl AggregationError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AggregationError::GridPointFetch { source, .. } => source.status(),
            AggregationError::QuorumNotMet { first_failure, .. } => first_failure.status(),
        }
    }
}
