use crate::entities::trend::{
    SeriesStatistics, TrendDirection, VitalRiskAssessment, VitalRiskLevel,
};
use crate::entities::vitals::{NormalRange, VitalType};

/// Percent deviation from the violated boundary above which risk is high
const HIGH_DEVIATION_PERCENT: f64 = 20.0;

/// Percent deviation from the violated boundary above which risk is medium
const MEDIUM_DEVIATION_PERCENT: f64 = 10.0;

/// Anomaly counts above this force a high risk level
const HIGH_ANOMALY_COUNT: usize = 5;

/// Anomaly counts above this escalate low risk to medium
const MEDIUM_ANOMALY_COUNT: usize = 2;

/// Clinically accepted normal range per known vital type
pub fn normal_range(vital: VitalType) -> NormalRange {
    match vital {
        VitalType::HeartRate => NormalRange::new(60.0, 100.0, "bpm"),
        VitalType::BloodPressureSystolic => NormalRange::new(90.0, 120.0, "mmHg"),
        VitalType::BloodPressureDiastolic => NormalRange::new(60.0, 80.0, "mmHg"),
        VitalType::OxygenSaturation => NormalRange::new(95.0, 100.0, "%"),
        VitalType::Temperature => NormalRange::new(36.5, 37.5, "°C"),
        VitalType::RespiratoryRate => NormalRange::new(12.0, 20.0, "brpm"),
        VitalType::BloodGlucose => NormalRange::new(70.0, 140.0, "mg/dL"),
    }
}

/// Assess the risk a vital's series poses, from its statistics, anomaly
/// count and trend.
///
/// Unknown vital types produce an explicit "unknown" assessment, never an
/// error. Anomaly counts only ever escalate the level; a trend annotation
/// is appended when the trend pushes the mean further out of range.
pub fn assess(
    vital_type: &str,
    statistics: &SeriesStatistics,
    anomaly_count: usize,
    trend: TrendDirection,
) -> VitalRiskAssessment {
    let vital = match VitalType::parse(vital_type) {
        Some(vital) => vital,
        None => return VitalRiskAssessment::unknown("Unknown vital type"),
    };

    let range = normal_range(vital);
    let mean = statistics.mean;

    let mut risk_level = VitalRiskLevel::Low;
    let mut message = "Vital signs within normal range".to_string();

    if mean < range.min {
        let deviation = (range.min - mean) / range.min * 100.0;
        if deviation > HIGH_DEVIATION_PERCENT {
            risk_level = VitalRiskLevel::High;
            message = format!("Average {} significantly below normal", vital_type);
        } else if deviation > MEDIUM_DEVIATION_PERCENT {
            risk_level = VitalRiskLevel::Medium;
            message = format!("Average {} below normal", vital_type);
        }
    } else if mean > range.max {
        let deviation = (mean - range.max) / range.max * 100.0;
        if deviation > HIGH_DEVIATION_PERCENT {
            risk_level = VitalRiskLevel::High;
            message = format!("Average {} significantly above normal", vital_type);
        } else if deviation > MEDIUM_DEVIATION_PERCENT {
            risk_level = VitalRiskLevel::Medium;
            message = format!("Average {} above normal", vital_type);
        }
    }

    if anomaly_count > HIGH_ANOMALY_COUNT {
        risk_level = VitalRiskLevel::High;
        message.push_str(&format!("; {} anomalies detected", anomaly_count));
    } else if anomaly_count > MEDIUM_ANOMALY_COUNT {
        if risk_level == VitalRiskLevel::Low {
            risk_level = VitalRiskLevel::Medium;
        }
        message.push_str(&format!("; {} anomalies detected", anomaly_count));
    }

    if trend == TrendDirection::Increasing && mean > range.max {
        message.push_str("; increasing trend");
    } else if trend == TrendDirection::Decreasing && mean < range.min {
        message.push_str("; decreasing trend");
    }

    let deviation = (mean - range.midpoint()).abs();

    VitalRiskAssessment {
        risk_level,
        message,
        normal_range: Some(range),
        average_value: Some(mean),
        deviation: Some(deviation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_mean(mean: f64) -> SeriesStatistics {
        SeriesStatistics {
            mean,
            median: mean,
            std: 0.0,
            min: mean,
            max: mean,
            q25: mean,
            q75: mean,
            count: 5,
            variance: 0.0,
            coefficient_of_variation: 0.0,
        }
    }

    #[test]
    fn test_unknown_vital_type() {
        let assessment = assess("bodyWeight", &stats_with_mean(80.0), 0, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::Unknown);
    }

    #[test]
    fn test_mean_within_range_is_low() {
        let assessment = assess("heartRate", &stats_with_mean(75.0), 0, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::Low);
        assert_eq!(assessment.message, "Vital signs within normal range");
    }

    #[test]
    fn test_thirty_percent_above_max_is_high() {
        // 130 vs heartRate max 100: 30% deviation
        let assessment = assess("heartRate", &stats_with_mean(130.0), 0, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::High);
        assert!(assessment.message.contains("significantly above"));
        assert_eq!(assessment.average_value, Some(130.0));
        // Deviation carried for display is measured from the midpoint (80)
        assert_eq!(assessment.deviation, Some(50.0));
    }

    #[test]
    fn test_moderate_deviation_is_medium() {
        // 115 vs max 100: 15% above
        let assessment = assess("heartRate", &stats_with_mean(115.0), 0, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::Medium);
        assert!(assessment.message.contains("above normal"));
    }

    #[test]
    fn test_below_range_deviation() {
        // 45 vs heartRate min 60: 25% below
        let assessment = assess("heartRate", &stats_with_mean(45.0), 0, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::High);
        assert!(assessment.message.contains("significantly below"));
    }

    #[test]
    fn test_many_anomalies_force_high() {
        let assessment = assess("heartRate", &stats_with_mean(75.0), 6, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::High);
        assert!(assessment.message.contains("6 anomalies detected"));
    }

    #[test]
    fn test_some_anomalies_escalate_low_to_medium() {
        let assessment = assess("heartRate", &stats_with_mean(75.0), 3, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::Medium);
    }

    #[test]
    fn test_anomalies_never_downgrade() {
        // High from deviation stays high with 3-5 anomalies
        let assessment = assess("heartRate", &stats_with_mean(130.0), 4, TrendDirection::Stable);
        assert_eq!(assessment.risk_level, VitalRiskLevel::High);
    }

    #[test]
    fn test_trend_annotation_when_rising_out_of_range() {
        let assessment =
            assess("heartRate", &stats_with_mean(130.0), 0, TrendDirection::Increasing);
        assert!(assessment.message.ends_with("; increasing trend"));

        let assessment =
            assess("heartRate", &stats_with_mean(45.0), 0, TrendDirection::Decreasing);
        assert!(assessment.message.ends_with("; decreasing trend"));

        // No annotation when the trend points back toward the range
        let assessment =
            assess("heartRate", &stats_with_mean(130.0), 0, TrendDirection::Decreasing);
        assert!(!assessment.message.contains("trend"));
    }
}
