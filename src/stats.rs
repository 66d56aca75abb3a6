//! Statistical helpers shared across the pipeline

/// Quantile of a pre-sorted slice, `q` in `[0, 1]`, with linear
/// interpolation between order statistics.
///
/// Returns 0.0 for an empty slice.
pub fn percentile(sorted_data: &[f64], q: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let index = q * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}
