use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Qualitative risk level derived from a risk score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Score thresholds that map a risk score onto a `RiskLevel`.
///
/// Boundaries are strictly "below": a score equal to a threshold falls into
/// the next level up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskThresholds {
    /// Scores below this are low risk
    pub low: f64,

    /// Scores below this (and at least `low`) are medium risk
    pub medium: f64,

    /// Scores below this (and at least `medium`) are high risk; the rest
    /// are critical
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 0.3,
            medium: 0.6,
            high: 0.8,
        }
    }
}

impl RiskThresholds {
    /// Convert a risk score to a risk level
    pub fn level_for(&self, risk_score: f64) -> RiskLevel {
        if risk_score < self.low {
            RiskLevel::Low
        } else if risk_score < self.medium {
            RiskLevel::Medium
        } else if risk_score < self.high {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// A named contributor to a risk score.
///
/// Impact values from different condition models are never renormalized
/// when merged; a merged list is heterogeneous evidence, not a partition
/// of 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskFactor {
    /// Short factor name (e.g. "High Blood Pressure")
    pub factor: String,

    /// Impact on the risk score, bounded to [0, 1]
    pub impact: f64,

    /// Human-readable description of the contribution
    pub description: String,
}

/// Priority attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

/// An actionable health recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Recommendation category (e.g. "Cardiovascular Health")
    pub category: String,

    /// Priority of acting on the recommendation
    pub priority: RecommendationPriority,

    /// Summary of the recommendation
    pub description: String,

    /// Ordered list of concrete action items
    pub action_items: Vec<String>,
}

/// Result of scoring a single condition model.
///
/// Ephemeral: built per request and combined by the aggregator, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConditionAssessment {
    /// Risk score in [0, 1]
    pub risk_score: f64,

    /// Fixed model confidence in [0, 1]
    pub confidence: f64,

    /// Itemized contributors to the score, in evaluation order
    pub risk_factors: Vec<RiskFactor>,
}

/// Combined assessment across all condition models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveAssessment {
    /// Overall risk level derived from the weighted score
    pub risk_level: RiskLevel,

    /// Weighted overall risk score in [0, 1]
    pub risk_score: f64,

    /// Mean of the condition model confidences
    pub confidence: f64,

    /// Concatenated risk factors (cardiovascular, metabolic,
    /// cerebrovascular order), not deduplicated
    pub risk_factors: Vec<RiskFactor>,

    /// One message per condition whose score exceeds 0.6, or a single
    /// all-clear message
    pub primary_concerns: Vec<String>,

    /// Tiered recommendations derived from the scores
    pub recommendations: Vec<Recommendation>,
}
