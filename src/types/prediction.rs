//! The response object handed back to callers.
//!
//! Field names are part of the contract with the UI and CSV exporters and are
//! serialized verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the temperature regression slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureTrend {
    Warming,
    Cooling,
    Stable,
}

impl TemperatureTrend {
    /// Classifies a slope, treating `[-epsilon, epsilon]` as stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_odds::TemperatureTrend;
    ///
    /// assert_eq!(TemperatureTrend::classify(0.02, 0.01), TemperatureTrend::Warming);
    /// assert_eq!(TemperatureTrend::classify(-0.005, 0.01), TemperatureTrend::Stable);
    /// assert_eq!(TemperatureTrend::classify(-0.5, 0.01), TemperatureTrend::Cooling);
    /// ```
    pub fn classify(slope: f64, epsilon: f64) -> Self {
        if slope > epsilon {
            TemperatureTrend::Warming
        } else if slope < -epsilon {
            TemperatureTrend::Cooling
        } else {
            TemperatureTrend::Stable
        }
    }
}

impl fmt::Display for TemperatureTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemperatureTrend::Warming => "warming",
            TemperatureTrend::Cooling => "cooling",
            TemperatureTrend::Stable => "stable",
        };
        f.write_str(name)
    }
}

/// Bounds of the 95% confidence interval for the mean temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRange {
    pub lower: f64,
    pub upper: f64,
}

/// Historical odds and statistics for one location and calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Mean temperature in °C. 20.0 when no observation survived cleaning.
    pub average_temp: f64,
    pub temp_std_dev: f64,
    pub temp_confidence_range: ConfidenceRange,
    pub temp_trend: TemperatureTrend,
    /// Regression slope in °C per pooled sample step, not per year.
    pub temp_trend_value: f64,
    /// Mean precipitation in mm/day.
    pub average_precip: f64,
    pub precip_std_dev: f64,
    pub rain_probability: u8,
    pub hot_probability: u8,
    pub cold_probability: u8,
    pub wind_probability: u8,
    /// Distinct years contributing at least one temperature observation.
    pub data_years: usize,
    /// Size of the pooled temperature sample.
    pub data_points: usize,
    pub regional_coverage: String,
}
