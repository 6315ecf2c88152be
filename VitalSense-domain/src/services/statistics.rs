use crate::entities::trend::SeriesStatistics;

/// Compute descriptive statistics over a numeric series.
///
/// Returns `None` for an empty series; callers branch on emptiness instead
/// of handling an error.
pub fn summarize(values: &[f64]) -> Option<SeriesStatistics> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    let std = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("series values must not be NaN"));

    let coefficient_of_variation = if mean != 0.0 { std / mean * 100.0 } else { 0.0 };

    Some(SeriesStatistics {
        mean,
        median: percentile_sorted(&sorted, 50.0),
        std,
        min: sorted[0],
        max: sorted[count - 1],
        q25: percentile_sorted(&sorted, 25.0),
        q75: percentile_sorted(&sorted, 75.0),
        count,
        variance,
        coefficient_of_variation,
    })
}

/// Percentile of an already-sorted series with linear interpolation between
/// order statistics. `p` is in [0, 100].
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = p / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
