/// Arithmetic mean, or `default` for an empty sample.
///
/// The default is a domain placeholder chosen by the caller, not an estimate.
pub fn mean(values: &[f64], default: f64) -> f64 {
    let Some(&first) = values.first() else {
        return default;
    };
    // Shifted by the first value so constant samples come back exact.
    first + values.iter().map(|v| v - first).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N) around a precomputed mean.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Least-squares slope of the values against their 0-based position.
///
/// The unit is "value per sample step". Returns 0 for fewer than two values.
pub fn trend(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let x_diff = i as f64 - x_mean;
        numerator += x_diff * (y - y_mean);
        denominator += x_diff * x_diff;
    }

    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    numerator / denominator
}
