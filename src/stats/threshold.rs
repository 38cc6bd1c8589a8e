//! Turns a sample into the share of days past a fixed domain threshold.

use bon::Builder;

/// Daily precipitation above which a day counts as rainy, in mm/day.
pub const RAIN_THRESHOLD_MM: f64 = 1.0;
/// Mean temperature above which a day counts as hot, in °C.
pub const HOT_THRESHOLD_C: f64 = 35.0;
/// Mean temperature below which a day counts as cold, in °C.
pub const COLD_THRESHOLD_C: f64 = 10.0;
/// Mean wind speed above which a day counts as windy, in m/s.
pub const WIND_THRESHOLD_MS: f64 = 10.0;

/// The thresholds used to classify adverse days. All comparisons are strict.
///
/// # Examples
///
/// ```
/// use weather_odds::Thresholds;
///
/// let defaults = Thresholds::default();
/// assert!(defaults.is_hot(35.1));
/// assert!(!defaults.is_hot(35.0));
///
/// let tropical = Thresholds::builder().cold_c(18.0).build();
/// assert!(tropical.is_cold(17.5));
/// assert_eq!(tropical.hot_c, 35.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct Thresholds {
    #[builder(default = RAIN_THRESHOLD_MM)]
    pub rain_mm: f64,
    #[builder(default = HOT_THRESHOLD_C)]
    pub hot_c: f64,
    #[builder(default = COLD_THRESHOLD_C)]
    pub cold_c: f64,
    #[builder(default = WIND_THRESHOLD_MS)]
    pub wind_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Thresholds {
    pub fn is_rainy(&self, precipitation: f64) -> bool {
        precipitation > self.rain_mm
    }

    pub fn is_hot(&self, temperature: f64) -> bool {
        temperature > self.hot_c
    }

    pub fn is_cold(&self, temperature: f64) -> bool {
        temperature < self.cold_c
    }

    pub fn is_windy(&self, wind_speed: f64) -> bool {
        wind_speed > self.wind_ms
    }
}

/// Percentage of values satisfying `predicate`, rounded to the nearest integer
/// with halves going to the even neighbour.
///
/// Always within `0..=100`; an empty sample yields 0.
pub fn exceedance_probability(values: &[f64], predicate: impl Fn(f64) -> bool) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let hits = values.iter().filter(|v| predicate(**v)).count();
    let percent = (hits as f64 / values.len() as f64 * 100.0).round_ties_even();
    percent.clamp(0.0, 100.0) as u8
}
