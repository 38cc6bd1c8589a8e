mod aggregation;
mod config;
mod error;
mod prediction;
mod source;
mod types;
mod utils;
mod weather_odds;

pub mod stats;

pub use error::{ErrorResponse, WeatherOddsError};
pub use weather_odds::*;

pub use aggregation::error::AggregationError;
pub use aggregation::{FetchPolicy, GridAggregator, PointOutcome, PooledSamples, SampleSelection};
pub use config::{EngineConfig, SourceConfig};
pub use prediction::assemble_prediction;

pub use source::error::SourceError;
pub use source::power::PowerClient;
pub use source::{ClimateSource, PointSeries, RawSeries};

pub use stats::threshold::Thresholds;

pub use types::grid::{Grid, GridPoint, GridPosition, GridShape, LatLon};
pub use types::parameter::{ClimateParameter, Variable};
pub use types::prediction::{ConfidenceRange, PredictionResult, TemperatureTrend};
pub use types::query::{parse_target_date, PredictionRequest, Query};
pub use types::window::HistoricalWindow;
