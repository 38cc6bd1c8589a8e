use crate::types::prediction::ConfidenceRange;

/// Two-sided z-score of a 95% normal-approximation interval.
pub const Z_95: f64 = 1.96;

/// Normal-approximation interval for the mean: `mean ± z * std_dev / sqrt(n)`.
///
/// Only meaningful for reasonably large samples. With `n == 0` the interval
/// collapses onto the mean instead of dividing by zero.
pub fn mean_interval(n: usize, mean: f64, std_dev: f64, z: f64) -> ConfidenceRange {
    if n == 0 {
        return ConfidenceRange {
            lower: mean,
            upper: mean,
        };
    }
    let margin = z * std_dev / (n as f64).sqrt();
    ConfidenceRange {
        lower: mean - margin,
        upper: mean + margin,
    }
}
