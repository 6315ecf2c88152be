use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::entities::trend::{Anomaly, AnomalySeverity, MultivariateAnomaly, SuddenChange};
use crate::services::statistics::percentile_sorted;

/// Default relative-change threshold for sudden-change detection
pub const DEFAULT_CHANGE_THRESHOLD: f64 = 0.2;

/// Relative changes above this are high severity
const HIGH_CHANGE_THRESHOLD: f64 = 0.3;

/// Z-scores above this flag a point as anomalous
const Z_SCORE_THRESHOLD: f64 = 3.0;

/// Z-scores above this escalate the anomaly to high severity
const Z_SCORE_HIGH_THRESHOLD: f64 = 4.0;

/// Detect sudden relative changes between consecutive readings.
///
/// A pair is flagged when |v[i] − v[i−1]| / v[i−1] exceeds `threshold`.
/// Pairs whose previous value is exactly 0 are skipped: a relative change
/// from zero is undefined and must not poison the result with inf/NaN.
pub fn detect_sudden_changes(
    values: &[f64],
    timestamps: &[DateTime<Utc>],
    threshold: f64,
) -> Vec<SuddenChange> {
    let mut changes = Vec::new();

    for i in 1..values.len().min(timestamps.len()) {
        let previous = values[i - 1];
        if previous == 0.0 {
            debug!(index = i, "skipping change against zero previous value");
            continue;
        }

        let relative = (values[i] - previous).abs() / previous;
        if relative > threshold {
            changes.push(SuddenChange {
                timestamp: timestamps[i],
                previous_value: previous,
                current_value: values[i],
                change_percent: relative * 100.0,
                severity: if relative > HIGH_CHANGE_THRESHOLD {
                    AnomalySeverity::High
                } else {
                    AnomalySeverity::Medium
                },
            });
        }
    }

    changes
}

/// Detect statistically distant points in a full series.
///
/// A point is anomalous when its z-score exceeds 3 or it falls outside the
/// Tukey fences Q1−1.5·IQR / Q3+1.5·IQR. With zero variance the z-score
/// rule flags nothing (there is no variance to deviate from); the IQR rule
/// is unaffected.
pub fn detect_anomalies(values: &[f64], timestamps: &[DateTime<Utc>]) -> Vec<Anomaly> {
    let n = values.len().min(timestamps.len());
    if n == 0 {
        return Vec::new();
    }

    let mean = values[..n].iter().sum::<f64>() / n as f64;
    let std = (values[..n].iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64).sqrt();

    let mut sorted = values[..n].to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("series values must not be NaN"));
    let q1 = percentile_sorted(&sorted, 25.0);
    let q3 = percentile_sorted(&sorted, 75.0);
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    let mut anomalies = Vec::new();
    for i in 0..n {
        let value = values[i];
        let z_score = if std != 0.0 { (value - mean).abs() / std } else { 0.0 };

        let mut reasons = Vec::new();
        if std != 0.0 && z_score > Z_SCORE_THRESHOLD {
            reasons.push(format!("Z-score: {:.2} (>3 SD)", z_score));
        }
        if value < lower_bound || value > upper_bound {
            reasons.push(format!(
                "Outside IQR bounds [{:.1}, {:.1}]",
                lower_bound, upper_bound
            ));
        }

        if !reasons.is_empty() {
            anomalies.push(Anomaly {
                timestamp: timestamps[i],
                value,
                severity: if z_score > Z_SCORE_HIGH_THRESHOLD {
                    AnomalySeverity::High
                } else {
                    AnomalySeverity::Medium
                },
                reason: reasons.join("; "),
                deviation: z_score,
            });
        }
    }

    anomalies
}

/// Flag a concerning combination of high heart rate and low oxygen
/// saturation across aligned rows. One aggregate anomaly is reported, not
/// one per row.
pub fn rate_oxygen_conflict(
    heart_rate: &[f64],
    oxygen_saturation: &[f64],
) -> Option<MultivariateAnomaly> {
    let concerning = heart_rate
        .iter()
        .zip(oxygen_saturation)
        .any(|(&hr, &o2)| hr > 100.0 && o2 < 92.0);

    concerning.then(|| MultivariateAnomaly {
        vitals: vec!["heartRate".to_string(), "oxygenSaturation".to_string()],
        severity: AnomalySeverity::High,
        description: "High heart rate with low oxygen saturation".to_string(),
        recommendation: "Immediate medical attention recommended".to_string(),
    })
}

/// Run the rule-based cross-vital checks over per-type series.
///
/// Series are truncated to the shortest common length before alignment.
/// The heart-rate/oxygen pair is the only rule today; further pairs slot in
/// alongside it.
pub fn detect_multivariate(series: &HashMap<String, Vec<f64>>) -> Vec<MultivariateAnomaly> {
    let min_len = series.values().map(Vec::len).min().unwrap_or(0);
    if min_len == 0 {
        return Vec::new();
    }

    let mut anomalies = Vec::new();
    if let (Some(hr), Some(o2)) = (series.get("heartRate"), series.get("oxygenSaturation")) {
        if let Some(anomaly) = rate_oxygen_conflict(&hr[..min_len], &o2[..min_len]) {
            anomalies.push(anomaly);
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap() + chrono::Duration::hours(i as i64))
            .collect()
    }

    #[test]
    fn test_sudden_change_flags_fifty_percent_jump() {
        let values = [100.0, 100.0, 150.0];
        let changes = detect_sudden_changes(&values, &timestamps(3), 0.2);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].previous_value, 100.0);
        assert_eq!(changes[0].current_value, 150.0);
        assert!((changes[0].change_percent - 50.0).abs() < 1e-9);
        assert_eq!(changes[0].severity, AnomalySeverity::High);
    }

    #[test]
    fn test_sudden_change_medium_severity_band() {
        // 25% change: above the 0.2 threshold but not above 0.3
        let values = [100.0, 125.0];
        let changes = detect_sudden_changes(&values, &timestamps(2), 0.2);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].severity, AnomalySeverity::Medium);
    }

    #[test]
    fn test_sudden_change_skips_zero_previous_value() {
        let values = [0.0, 80.0, 82.0];
        let changes = detect_sudden_changes(&values, &timestamps(3), 0.2);
        assert!(changes.is_empty(), "change against zero must be skipped");
    }

    #[test]
    fn test_sudden_change_respects_threshold() {
        let values = [100.0, 115.0];
        assert!(detect_sudden_changes(&values, &timestamps(2), 0.2).is_empty());
        assert_eq!(detect_sudden_changes(&values, &timestamps(2), 0.1).len(), 1);
    }

    #[test]
    fn test_statistical_detection_flags_outlier() {
        // One value far outside an otherwise tight series
        let mut values = vec![70.0; 20];
        values.push(200.0);
        let anomalies = detect_anomalies(&values, &timestamps(values.len()));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].value, 200.0);
        assert!(anomalies[0].severity == AnomalySeverity::High);
        assert!(anomalies[0].deviation > 4.0);
        assert!(anomalies[0].reason.contains("Z-score"));
        assert!(anomalies[0].reason.contains("IQR"));
    }

    #[test]
    fn test_statistical_detection_zero_variance_flags_nothing() {
        let values = vec![98.6; 10];
        let anomalies = detect_anomalies(&values, &timestamps(10));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_statistical_detection_clean_series() {
        let values = [72.0, 74.0, 71.0, 73.0, 75.0, 72.5, 73.5];
        let anomalies = detect_anomalies(&values, &timestamps(7));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_rate_oxygen_conflict_fires_on_any_row() {
        let hr = [80.0, 110.0, 85.0];
        let o2 = [97.0, 90.0, 96.0];
        let anomaly = rate_oxygen_conflict(&hr, &o2).expect("rule should fire");
        assert_eq!(anomaly.severity, AnomalySeverity::High);
        assert_eq!(anomaly.vitals, vec!["heartRate", "oxygenSaturation"]);
    }

    #[test]
    fn test_rate_oxygen_conflict_requires_both_conditions() {
        // High heart rate alone or low oxygen alone must not fire
        assert!(rate_oxygen_conflict(&[120.0], &[95.0]).is_none());
        assert!(rate_oxygen_conflict(&[90.0], &[88.0]).is_none());
    }

    #[test]
    fn test_multivariate_aligns_to_shortest_series() {
        let mut series = HashMap::new();
        // The concerning heart-rate row sits beyond the oxygen series length
        series.insert("heartRate".to_string(), vec![80.0, 85.0, 130.0]);
        series.insert("oxygenSaturation".to_string(), vec![96.0, 97.0]);
        assert!(detect_multivariate(&series).is_empty());

        series.insert("oxygenSaturation".to_string(), vec![96.0, 97.0, 90.0]);
        assert_eq!(detect_multivariate(&series).len(), 1);
    }
}
