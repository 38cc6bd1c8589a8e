//! Pure assembly of a [`PredictionResult`] from pooled samples.
//!
//! Nothing here touches the network, so the statistics can be tested and
//! benchmarked on synthetic samples.

use crate::aggregation::PooledSamples;
use crate::config::EngineConfig;
use crate::stats::confidence::mean_interval;
use crate::stats::descriptive::{mean, std_dev, trend};
use crate::stats::threshold::exceedance_probability;
use crate::types::grid::Grid;
use crate::types::parameter::ClimateParameter;
use crate::types::prediction::{ConfidenceRange, PredictionResult, TemperatureTrend};
use crate::utils::round_to;

const TEMPERATURE_DECIMALS: i32 = 1;
const TREND_DECIMALS: i32 = 3;
const PRECIPITATION_DECIMALS: i32 = 2;

/// Computes every statistic of a prediction and rounds it for reporting.
///
/// Empty samples degrade to the configured defaults: the default mean, zero
/// spread, a zero-width interval on the mean, a stable trend and 0% odds.
///
/// # Examples
///
/// ```
/// use weather_odds::{assemble_prediction, EngineConfig, Grid, LatLon, PooledSamples};
///
/// let samples = PooledSamples {
///     temperature: vec![10.0, 20.0, 30.0],
///     precipitation: vec![0.0, 2.0, 5.0, 0.5],
///     ..Default::default()
/// };
/// let grid = Grid::around(LatLon(48.85, 2.35), 0.5);
/// let result = assemble_prediction(&samples, &grid, &EngineConfig::default());
///
/// assert_eq!(result.average_temp, 20.0);
/// assert_eq!(result.hot_probability, 0);
/// assert_eq!(result.rain_probability, 50);
/// assert_eq!(result.data_points, 3);
/// ```
pub fn assemble_prediction(
    samples: &PooledSamples,
    grid: &Grid,
    config: &EngineConfig,
) -> PredictionResult {
    let thresholds = &config.thresholds;
    let temperature = samples.sample(ClimateParameter::Temperature);
    let precipitation = samples.sample(ClimateParameter::Precipitation);

    let average_temp = mean(temperature, config.default_temperature);
    let temp_std_dev = std_dev(temperature, average_temp);
    let interval = mean_interval(
        temperature.len(),
        average_temp,
        temp_std_dev,
        config.confidence_z,
    );
    let slope = trend(temperature);

    let average_precip = mean(precipitation, config.default_precipitation);
    let precip_std_dev = std_dev(precipitation, average_precip);

    PredictionResult {
        average_temp: round_to(average_temp, TEMPERATURE_DECIMALS),
        temp_std_dev: round_to(temp_std_dev, TEMPERATURE_DECIMALS),
        temp_confidence_range: ConfidenceRange {
            lower: round_to(interval.lower, TEMPERATURE_DECIMALS),
            upper: round_to(interval.upper, TEMPERATURE_DECIMALS),
        },
        // Classified on the unrounded slope.
        temp_trend: TemperatureTrend::classify(slope, config.trend_epsilon),
        temp_trend_value: round_to(slope, TREND_DECIMALS),
        average_precip: round_to(average_precip, PRECIPITATION_DECIMALS),
        precip_std_dev: round_to(precip_std_dev, PRECIPITATION_DECIMALS),
        rain_probability: exceedance_probability(precipitation, |v| thresholds.is_rainy(v)),
        hot_probability: exceedance_probability(temperature, |v| thresholds.is_hot(v)),
        cold_probability: exceedance_probability(temperature, |v| thresholds.is_cold(v)),
        wind_probability: exceedance_probability(
            samples.sample(ClimateParameter::WindSpeed),
            |v| thresholds.is_windy(v),
        ),
        data_years: samples.data_years(),
        data_points: temperature.len(),
        regional_coverage: grid.coverage_description(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::threshold::Thresholds;
    use crate::types::grid::LatLon;

    fn grid() -> Grid {
        Grid::around(LatLon(-33.87, 151.21), 0.5)
    }

    fn temperatures(values: &[f64]) -> PooledSamples {
        PooledSamples {
            temperature: values.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mild_temperatures_are_never_hot() {
        let result = assemble_prediction(
            &temperatures(&[10.0, 20.0, 30.0]),
            &grid(),
            &EngineConfig::default(),
        );
        assert_eq!(result.hot_probability, 0);
        assert_eq!(result.average_temp, 20.0);
        assert_eq!(result.temp_std_dev, 8.2);
        assert_eq!(
            result.temp_confidence_range,
            ConfidenceRange {
                lower: 10.8,
                upper: 29.2
            }
        );
        assert_eq!(result.temp_trend, TemperatureTrend::Warming);
        assert_eq!(result.temp_trend_value, 10.0);
        // 10.0 is not strictly below the cold threshold.
        assert_eq!(result.cold_probability, 0);
        assert_eq!(result.data_points, 3);
    }

    #[test]
    fn test_half_of_days_are_rainy() {
        let samples = PooledSamples {
            precipitation: vec![0.0, 2.0, 5.0, 0.5],
            ..Default::default()
        };
        let result = assemble_prediction(&samples, &grid(), &EngineConfig::default());
        assert_eq!(result.rain_probability, 50);
        assert_eq!(result.average_precip, 1.88);
        assert_eq!(result.precip_std_dev, 1.95);
    }

    #[test]
    fn test_constant_sample_has_zero_width_interval() {
        let result = assemble_prediction(
            &temperatures(&[20.0, 20.0, 20.0, 20.0]),
            &grid(),
            &EngineConfig::default(),
        );
        assert_eq!(result.temp_std_dev, 0.0);
        assert_eq!(
            result.temp_confidence_range,
            ConfidenceRange {
                lower: 20.0,
                upper: 20.0
            }
        );
        assert_eq!(result.temp_trend, TemperatureTrend::Stable);
    }

    #[test]
    fn test_empty_samples_fall_back_to_defaults() {
        let result = assemble_prediction(
            &PooledSamples::default(),
            &grid(),
            &EngineConfig::default(),
        );
        assert_eq!(result.average_temp, 20.0);
        assert_eq!(result.temp_std_dev, 0.0);
        assert_eq!(
            result.temp_confidence_range,
            ConfidenceRange {
                lower: 20.0,
                upper: 20.0
            }
        );
        assert_eq!(result.temp_trend, TemperatureTrend::Stable);
        assert_eq!(result.temp_trend_value, 0.0);
        assert_eq!(result.average_precip, 0.0);
        assert_eq!(result.precip_std_dev, 0.0);
        assert_eq!(
            [
                result.rain_probability,
                result.hot_probability,
                result.cold_probability,
                result.wind_probability
            ],
            [0, 0, 0, 0]
        );
        assert_eq!(result.data_years, 0);
        assert_eq!(result.data_points, 0);
        assert!(result.regional_coverage.starts_with("5-point grid"));
    }

    #[test]
    fn test_small_slopes_are_stable() {
        // Slope of 0.005 per step stays inside the epsilon band.
        let values: Vec<f64> = (0..10).map(|i| 15.0 + 0.005 * i as f64).collect();
        let result =
            assemble_prediction(&temperatures(&values), &grid(), &EngineConfig::default());
        assert_eq!(result.temp_trend, TemperatureTrend::Stable);
        assert_eq!(result.temp_trend_value, 0.005);

        let values: Vec<f64> = (0..10).map(|i| 15.0 - 0.5 * i as f64).collect();
        let result =
            assemble_prediction(&temperatures(&values), &grid(), &EngineConfig::default());
        assert_eq!(result.temp_trend, TemperatureTrend::Cooling);
        assert_eq!(result.temp_trend_value, -0.5);
    }

    #[test]
    fn test_configured_thresholds_are_used() {
        let samples = PooledSamples {
            temperature: vec![30.0, 33.0, 36.0, 5.0],
            wind_speed: vec![4.0, 8.0, 12.0, 16.0],
            temperature_years: [2019, 2020].into_iter().collect(),
            ..Default::default()
        };
        let config = EngineConfig::builder()
            .thresholds(Thresholds::builder().hot_c(32.0).wind_ms(6.0).build())
            .build();
        let result = assemble_prediction(&samples, &grid(), &config);
        assert_eq!(result.hot_probability, 50);
        assert_eq!(result.cold_probability, 25);
        assert_eq!(result.wind_probability, 75);
        assert_eq!(result.data_years, 2);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        let mut precipitation = vec![0.0; 40];
        precipitation[12] = 6.5;
        let samples = PooledSamples {
            temperature: vec![20.0, 20.5, 20.0, 20.5],
            precipitation,
            ..Default::default()
        };
        let result = assemble_prediction(&samples, &grid(), &EngineConfig::default());
        assert_eq!(result.rain_probability, 2);
        assert_eq!(result.average_temp, 20.2);
    }

    #[test]
    fn test_probabilities_round_to_nearest_percent() {
        let result = assemble_prediction(
            &temperatures(&[36.0, 20.0, 20.0]),
            &grid(),
            &EngineConfig::default(),
        );
        assert_eq!(result.hot_probability, 33);
    }
}
