use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::vitals::NormalRange;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Qualitative direction of a vital-sign series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    /// Fewer than three points: no regression is attempted
    InsufficientData,
    /// Empty series
    NoData,
}

/// Descriptive statistics over one numeric series.
///
/// Standard deviation and variance are population (n denominator)
/// quantities; quartiles use linear interpolation between order statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub struct SeriesStatistics {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
    pub count: usize,
    pub variance: f64,
    /// std / mean × 100, defined as 0 when the mean is 0
    pub coefficient_of_variation: f64,
}

/// Severity attached to a detected anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Medium,
    High,
}

/// A reading statistically distant from the rest of its series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Anomaly {
    /// When the anomalous reading was taken
    pub timestamp: DateTime<Utc>,

    /// The anomalous value
    pub value: f64,

    /// High when the z-score exceeds 4, medium otherwise
    pub severity: AnomalySeverity,

    /// Which rule(s) fired, joined with "; "
    pub reason: String,

    /// Absolute z-score of the value within its series
    pub deviation: f64,
}

/// A sudden relative change between two consecutive readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub struct SuddenChange {
    /// Timestamp of the later reading in the pair
    pub timestamp: DateTime<Utc>,

    pub previous_value: f64,

    pub current_value: f64,

    /// Absolute percent change, e.g. 50.0 for a jump from 100 to 150
    pub change_percent: f64,

    /// High when the relative change exceeds 0.3, medium otherwise
    pub severity: AnomalySeverity,
}

/// An aggregate anomaly flagged by a cross-vital rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MultivariateAnomaly {
    /// Wire-format names of the vitals the rule inspected
    pub vitals: Vec<String>,

    pub severity: AnomalySeverity,

    pub description: String,

    pub recommendation: String,
}

/// A projected future point with a heuristic confidence band.
///
/// The band is ± one population standard deviation of the input series, not
/// a proper prediction interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub struct ForecastPoint {
    /// Steps ahead of the last observation (1-based)
    pub period: usize,

    pub value: f64,

    pub confidence_lower: f64,

    pub confidence_upper: f64,
}

/// Qualitative per-vital risk level.
///
/// Distinct from `RiskLevel`: vitals assessment never reports "critical"
/// but does report "unknown" for vital types without a range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum VitalRiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

/// Risk assessment for one vital type over an analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VitalRiskAssessment {
    pub risk_level: VitalRiskLevel,

    /// Human-readable summary, including anomaly and trend annotations
    pub message: String,

    /// The normal range used, when the vital type is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<NormalRange>,

    /// Mean of the analyzed series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_value: Option<f64>,

    /// Absolute deviation of the mean from the range midpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f64>,
}

impl VitalRiskAssessment {
    /// Assessment for a vital type without a range table
    pub fn unknown(message: &str) -> Self {
        Self {
            risk_level: VitalRiskLevel::Unknown,
            message: message.to_string(),
            normal_range: None,
            average_value: None,
            deviation: None,
        }
    }
}

/// Full result of analyzing one vital's time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// `None` when the input series was empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SeriesStatistics>,

    pub trend: TrendDirection,

    /// Statistical anomalies, in series order
    pub anomalies: Vec<Anomaly>,

    /// Up to `periods` projected points; empty below three observations
    pub forecast: Vec<ForecastPoint>,

    pub risk_assessment: VitalRiskAssessment,
}
