/// Rounds to `decimals` places, halves to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round_ties_even() / factor;
    // Avoid reporting -0.0 for tiny negative values.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
