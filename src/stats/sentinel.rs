use crate::source::RawSeries;

/// Fill value the archive reports for days without an observation.
pub const SENTINEL: f64 = -999.0;

pub fn is_sentinel(value: f64) -> bool {
    value == SENTINEL
}

/// Drops every sentinel value, keeping the order of the remaining ones.
pub fn remove_sentinel(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values.into_iter().filter(|v| !is_sentinel(*v)).collect()
}

/// Chronologically ordered observations of a raw series; an absent series is empty.
pub fn clean_series(series: Option<&RawSeries>) -> Vec<f64> {
    series
        .map(|s| remove_sentinel(s.values().copied()))
        .unwrap_or_default()
}
