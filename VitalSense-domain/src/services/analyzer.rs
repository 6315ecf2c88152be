use tracing::debug;

use crate::entities::trend::{TrendAnalysis, TrendDirection, VitalRiskAssessment};
use crate::entities::vitals::VitalReading;
use crate::services::{anomaly, statistics, trend, vitals_risk};

/// Analyze one vital's time series end to end: statistics, trend direction,
/// statistical anomalies, short-horizon forecast and per-vital risk.
///
/// Readings are sorted by timestamp before analysis; the caller may pass
/// them in any order. An empty series yields an explicit no-data result.
pub fn analyze_trend(readings: &[VitalReading], vital_type: &str) -> TrendAnalysis {
    if readings.is_empty() {
        return empty_analysis();
    }

    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.timestamp);

    let values: Vec<f64> = sorted.iter().map(|r| r.value).collect();
    let timestamps: Vec<_> = sorted.iter().map(|r| r.timestamp).collect();

    let statistics = statistics::summarize(&values)
        .expect("series is non-empty, statistics are defined");
    let direction = trend::classify(&values);
    let anomalies = anomaly::detect_anomalies(&values, &timestamps);
    let forecast = trend::forecast(&values, trend::DEFAULT_FORECAST_PERIODS);

    debug!(
        vital_type,
        count = values.len(),
        anomalies = anomalies.len(),
        ?direction,
        "vitals trend analyzed"
    );

    let risk_assessment =
        vitals_risk::assess(vital_type, &statistics, anomalies.len(), direction);

    TrendAnalysis {
        statistics: Some(statistics),
        trend: direction,
        anomalies,
        forecast,
        risk_assessment,
    }
}

/// The analysis returned for an empty series
fn empty_analysis() -> TrendAnalysis {
    TrendAnalysis {
        statistics: None,
        trend: TrendDirection::NoData,
        anomalies: Vec::new(),
        forecast: Vec::new(),
        risk_assessment: VitalRiskAssessment::unknown("No data available"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::trend::{VitalRiskLevel};
    use chrono::{TimeZone, Utc};

    fn reading(value: f64, hour: u32) -> VitalReading {
        VitalReading {
            vital_type: "heartRate".to_string(),
            value,
            unit: "bpm".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 8, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_series_reports_no_data() {
        let analysis = analyze_trend(&[], "heartRate");
        assert_eq!(analysis.trend, TrendDirection::NoData);
        assert!(analysis.statistics.is_none());
        assert!(analysis.anomalies.is_empty());
        assert!(analysis.forecast.is_empty());
        assert_eq!(analysis.risk_assessment.risk_level, VitalRiskLevel::Unknown);
        assert_eq!(analysis.risk_assessment.message, "No data available");
    }

    #[test]
    fn test_two_points_insufficient_for_trend() {
        let analysis = analyze_trend(&[reading(70.0, 8), reading(72.0, 9)], "heartRate");
        assert_eq!(analysis.trend, TrendDirection::InsufficientData);
        assert!(analysis.forecast.is_empty());
        assert!(analysis.statistics.is_some());
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_analysis() {
        // Values increase with time but arrive shuffled
        let readings = vec![
            reading(74.0, 10),
            reading(70.0, 8),
            reading(76.0, 11),
            reading(72.0, 9),
            reading(78.0, 12),
        ];
        let analysis = analyze_trend(&readings, "heartRate");
        assert_eq!(analysis.trend, TrendDirection::Increasing);
    }

    #[test]
    fn test_full_pipeline_on_elevated_series() {
        let readings: Vec<VitalReading> =
            (0..6).map(|i| reading(128.0 + i as f64, 8 + i)).collect();
        let analysis = analyze_trend(&readings, "heartRate");

        let stats = analysis.statistics.as_ref().unwrap();
        assert!((stats.mean - 130.5).abs() < 1e-9);
        assert_eq!(analysis.trend, TrendDirection::Increasing);
        assert_eq!(analysis.forecast.len(), 3);
        // Mean 30% above the heartRate max → high, with trend annotation
        assert_eq!(analysis.risk_assessment.risk_level, VitalRiskLevel::High);
        assert!(analysis.risk_assessment.message.contains("increasing trend"));
    }

    #[test]
    fn test_unknown_vital_still_gets_statistics() {
        let readings = vec![reading(1.0, 8), reading(2.0, 9), reading(3.0, 10)];
        let mut readings: Vec<VitalReading> = readings;
        for r in &mut readings {
            r.vital_type = "customMetric".to_string();
        }
        let analysis = analyze_trend(&readings, "customMetric");
        assert!(analysis.statistics.is_some());
        assert_eq!(analysis.risk_assessment.risk_level, VitalRiskLevel::Unknown);
    }
}
