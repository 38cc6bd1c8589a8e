//! Engine configuration.
//!
//! Every domain constant the engine relies on lives here with its default, so
//! callers and tests can move a boundary without touching the algorithms.

use crate::aggregation::{FetchPolicy, SampleSelection};
use crate::error::WeatherOddsError;
use crate::stats::confidence::Z_95;
use crate::stats::threshold::Thresholds;
use crate::types::grid::GridShape;
use bon::Builder;

/// Offset between the center and each cardinal grid point, in degrees.
pub const GRID_STEP_DEGREES: f64 = 0.5;
/// Years of history preceding the reference year.
pub const HISTORY_YEARS: u32 = 15;
/// Slopes within `±TREND_EPSILON` per sample step classify as stable.
pub const TREND_EPSILON: f64 = 0.01;
/// Reported mean temperature when no observation survived cleaning. A placeholder, not an estimate.
pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;
/// Reported mean precipitation when no observation survived cleaning.
pub const DEFAULT_PRECIPITATION_MM: f64 = 0.0;

pub const POWER_BASE_URL: &str = "https://power.larc.nasa.gov/api";
pub const POWER_COMMUNITY: &str = "AG";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the NASA POWER archive.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SourceConfig {
    #[builder(default = POWER_BASE_URL.to_string())]
    pub base_url: String,
    /// POWER user community; selects units and defaults on the archive side.
    #[builder(default = POWER_COMMUNITY.to_string())]
    pub community: String,
    #[builder(default = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Everything that shapes a prediction besides the query itself.
///
/// # Examples
///
/// ```
/// use weather_odds::{EngineConfig, FetchPolicy, Thresholds};
///
/// let config = EngineConfig::builder()
///     .history_years(10)
///     .fetch_policy(FetchPolicy::Quorum(3))
///     .thresholds(Thresholds::builder().hot_c(32.0).build())
///     .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.grid_step_degrees, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct EngineConfig {
    #[builder(default)]
    pub thresholds: Thresholds,
    #[builder(default)]
    pub grid_shape: GridShape,
    #[builder(default = GRID_STEP_DEGREES)]
    pub grid_step_degrees: f64,
    #[builder(default = HISTORY_YEARS)]
    pub history_years: u32,
    #[builder(default = TREND_EPSILON)]
    pub trend_epsilon: f64,
    #[builder(default = Z_95)]
    pub confidence_z: f64,
    #[builder(default = DEFAULT_TEMPERATURE_C)]
    pub default_temperature: f64,
    #[builder(default = DEFAULT_PRECIPITATION_MM)]
    pub default_precipitation: f64,
    #[builder(default)]
    pub fetch_policy: FetchPolicy,
    /// Defaults to [`SampleSelection::CalendarDay`]: only the target day of each
    /// year is pooled. The former POWER-backed service pooled every day between
    /// the first and last year's date, so its numbers match
    /// [`SampleSelection::FullRange`] instead.
    #[builder(default)]
    pub sample_selection: SampleSelection,
    #[builder(default)]
    pub source: SourceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EngineConfig {
    /// Number of grid points a query fans out to.
    pub fn grid_size(&self) -> usize {
        self.grid_shape.point_count()
    }

    /// Checks the settings can produce a prediction.
    pub fn validate(&self) -> Result<(), WeatherOddsError> {
        if !(self.grid_step_degrees.is_finite() && self.grid_step_degrees > 0.0) {
            return Err(WeatherOddsError::InvalidConfig(format!(
                "grid step must be a positive number of degrees, got {}",
                self.grid_step_degrees
            )));
        }
        if self.history_years == 0 {
            return Err(WeatherOddsError::InvalidConfig(
                "at least one year of history is required".to_string(),
            ));
        }
        if !(self.confidence_z.is_finite() && self.confidence_z > 0.0) {
            return Err(WeatherOddsError::InvalidConfig(format!(
                "confidence z-score must be positive, got {}",
                self.confidence_z
            )));
        }
        if !(self.trend_epsilon.is_finite() && self.trend_epsilon >= 0.0) {
            return Err(WeatherOddsError::InvalidConfig(format!(
                "trend epsilon must be non-negative, got {}",
                self.trend_epsilon
            )));
        }
        if let FetchPolicy::Quorum(required) = self.fetch_policy {
            if required == 0 || required > self.grid_size() {
                return Err(WeatherOddsError::InvalidConfig(format!(
                    "quorum must be between 1 and {}, got {}",
                    self.grid_size(),
                    required
                )));
            }
        }
        let base_url = &self.source.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WeatherOddsError::InvalidConfig(format!(
                "archive base URL must be an HTTP or HTTPS URL, got '{}'",
                base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.grid_shape, GridShape::Regional);
        assert_eq!(config.history_years, 15);
        assert_eq!(config.confidence_z, 1.96);
        assert_eq!(config.default_temperature, 20.0);
        assert_eq!(config.fetch_policy, FetchPolicy::RequireAll);
        assert_eq!(config.sample_selection, SampleSelection::CalendarDay);
        assert_eq!(config.source.base_url, "https://power.larc.nasa.gov/api");
        assert_eq!(config.source.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            EngineConfig::builder().grid_step_degrees(0.0).build(),
            EngineConfig::builder().grid_step_degrees(f64::NAN).build(),
            EngineConfig::builder().history_years(0).build(),
            EngineConfig::builder().confidence_z(-1.0).build(),
            EngineConfig::builder().trend_epsilon(-0.1).build(),
            EngineConfig::builder()
                .fetch_policy(FetchPolicy::Quorum(6))
                .build(),
            EngineConfig::builder()
                .fetch_policy(FetchPolicy::Quorum(0))
                .build(),
            EngineConfig::builder()
                .source(
                    SourceConfig::builder()
                        .base_url("ftp://power".to_string())
                        .build(),
                )
                .build(),
        ];
        for config in cases {
            let result = config.validate();
            assert!(
                matches!(result, Err(WeatherOddsError::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_quorum_is_bounded_by_grid_shape() {
        let config = EngineConfig::builder()
            .grid_shape(GridShape::SinglePoint)
            .fetch_policy(FetchPolicy::Quorum(2))
            .build();
        assert!(config.validate().is_err());
        let config = EngineConfig::builder()
            .grid_shape(GridShape::SinglePoint)
            .fetch_policy(FetchPolicy::Quorum(1))
            .build();
        assert!(config.validate().is_ok());
    }
}
