use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use vital_sense_domain::entities::trend::{MultivariateAnomaly, SuddenChange, TrendAnalysis};
use vital_sense_domain::entities::vitals::VitalReading;

/// Request body for the vitals trend analysis endpoint.
///
/// Readings may be supplied inline; otherwise they are fetched from the
/// vitals service for the requested window.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalsTrendRequest {
    /// Patient identifier
    pub patient_id: String,

    /// Wire-format vital type, e.g. "heartRate"
    #[validate(length(min = 1))]
    pub vital_type: String,

    /// Analysis window in days
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 90))]
    pub days: u32,

    /// Inline readings; when present, no upstream fetch happens
    #[serde(default)]
    pub readings: Option<Vec<VitalReading>>,
}

fn default_days() -> u32 {
    7
}

/// The analysis window echoed back with a trend response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPeriod {
    pub days: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Response body for the vitals trend analysis endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalsTrendResponse {
    /// Patient identifier echoed from the request
    pub patient_id: String,

    /// Vital type that was analyzed
    pub vital_type: String,

    /// The window the analysis covers
    pub period: AnalysisPeriod,

    /// Statistics, trend, anomalies, forecast and per-vital risk
    #[serde(flatten)]
    pub analysis: TrendAnalysis,
}

/// Request body for sudden-change detection on a raw series
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetectionRequest {
    /// Patient identifier
    pub patient_id: String,

    /// Wire-format vital type the series belongs to
    pub vital_type: String,

    /// Observed values, oldest first
    #[validate(length(min = 1))]
    pub values: Vec<f64>,

    /// Timestamps aligned with `values`
    #[validate(length(min = 1))]
    pub timestamps: Vec<DateTime<Utc>>,

    /// Relative change that counts as sudden (0.2 = 20%)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.2
}

/// Response body for sudden-change detection
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetectionResponse {
    pub patient_id: String,
    pub vital_type: String,
    pub anomalies_detected: usize,
    pub anomalies: Vec<SuddenChange>,
    pub timestamp: DateTime<Utc>,
}

/// One observation inside a multivariate request series
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VitalPoint {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Request body for cross-vital anomaly detection.
///
/// Keys of `vitals_data` are wire-format vital types; series are truncated
/// to the shortest length before row alignment.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MultivariateAnomalyRequest {
    /// Patient identifier
    pub patient_id: String,

    /// Per-vital observation series
    #[serde(default)]
    pub vitals_data: std::collections::HashMap<String, Vec<VitalPoint>>,
}

/// Response body for cross-vital anomaly detection
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MultivariateAnomalyResponse {
    pub patient_id: String,
    pub anomalies_detected: usize,
    pub anomalies: Vec<MultivariateAnomaly>,
    /// Vital types that carried data and entered the analysis
    pub vitals_analyzed: Vec<String>,
    /// Set when the request carried no usable data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_request_defaults_to_seven_days() {
        let request: VitalsTrendRequest = serde_json::from_str(
            r#"{"patientId": "p-1", "vitalType": "heartRate"}"#,
        )
        .unwrap();
        assert_eq!(request.days, 7);
        assert!(request.readings.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_trend_request_rejects_oversized_window() {
        let request: VitalsTrendRequest = serde_json::from_str(
            r#"{"patientId": "p-1", "vitalType": "heartRate", "days": 365}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_anomaly_request_default_threshold() {
        let request: AnomalyDetectionRequest = serde_json::from_str(
            r#"{
                "patientId": "p-1",
                "vitalType": "heartRate",
                "values": [70.0, 72.0],
                "timestamps": ["2025-08-01T08:00:00Z", "2025-08-01T09:00:00Z"]
            }"#,
        )
        .unwrap();
        assert!((request.threshold - 0.2).abs() < 1e-12);
    }
}
