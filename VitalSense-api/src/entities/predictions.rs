use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use vital_sense_domain::entities::patient::{
    CardiovascularFeatures, CerebrovascularFeatures, MetabolicFeatures, PatientProfile,
};
use vital_sense_domain::entities::risk::{Recommendation, RiskFactor, RiskLevel};
use vital_sense_domain::entities::vitals::VitalReading;

/// Patient history as submitted with a comprehensive prediction request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientHistoryInput {
    /// Patient age in years
    #[validate(range(min = 0, max = 150))]
    pub age: i32,

    /// Patient gender ("male", "female" or "other")
    #[validate(custom = "validate_gender")]
    pub gender: String,

    /// Blood type, if known
    #[serde(default)]
    pub blood_type: Option<String>,

    /// Known allergies
    #[serde(default)]
    pub allergies: Vec<String>,

    /// Diagnosed chronic conditions
    #[serde(default)]
    pub chronic_conditions: Vec<String>,

    /// Current medications
    #[serde(default)]
    pub medications: Vec<String>,

    /// Family history of conditions
    #[serde(default)]
    pub family_history: Vec<String>,

    /// Smoking status ("never smoked", "formerly smoked", "smokes")
    #[serde(default)]
    pub smoking_status: Option<String>,

    /// Alcohol consumption description
    #[serde(default)]
    pub alcohol_consumption: Option<String>,

    /// Body mass index
    #[serde(default)]
    pub bmi: Option<f64>,
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    match gender {
        "male" | "female" | "other" => Ok(()),
        _ => Err(ValidationError::new("gender")),
    }
}

impl PatientHistoryInput {
    /// Project the submitted history onto the scoring profile
    pub fn to_profile(&self) -> PatientProfile {
        PatientProfile {
            age: self.age,
            gender: self.gender.clone(),
            bmi: self.bmi,
            chronic_conditions: self.chronic_conditions.clone(),
            smoking_status: self.smoking_status.clone(),
        }
    }
}

/// Request body for the comprehensive risk prediction endpoint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskPredictionRequest {
    /// Patient identifier
    pub patient_id: String,

    /// Patient history used to derive condition features; fetched from the
    /// patient service when absent
    #[serde(default)]
    #[validate]
    pub patient_history: Option<PatientHistoryInput>,

    /// Recent vital signs (typically the last 7 days)
    #[serde(default)]
    pub recent_vitals: Vec<VitalReading>,

    /// Reported symptoms (informational, not scored)
    #[serde(default)]
    pub symptoms: Vec<String>,

    /// Whether to include recommendations in the response
    #[serde(default = "default_true")]
    pub include_recommendations: bool,
}

fn default_true() -> bool {
    true
}

/// Request body for the cardiovascular risk endpoint.
///
/// Unsupplied clinical fields fall back to the model's documented defaults.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardiovascularRiskRequest {
    /// Patient identifier
    pub patient_id: String,

    #[serde(flatten)]
    pub features: CardiovascularFeatures,
}

/// Request body for the metabolic risk endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicRiskRequest {
    /// Patient identifier
    pub patient_id: String,

    #[serde(flatten)]
    pub features: MetabolicFeatures,
}

/// Request body for the cerebrovascular risk endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CerebrovascularRiskRequest {
    /// Patient identifier
    pub patient_id: String,

    #[serde(flatten)]
    pub features: CerebrovascularFeatures,
}

/// Response body shared by all prediction endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskPredictionResponse {
    /// Patient identifier echoed from the request
    pub patient_id: String,

    /// Unique identifier of this prediction
    pub prediction_id: Uuid,

    /// When the prediction was produced
    pub timestamp: DateTime<Utc>,

    /// Overall risk level
    pub risk_level: RiskLevel,

    /// Overall risk score (0-1)
    pub risk_score: f64,

    /// Model confidence (0-1)
    pub confidence: f64,

    /// Contributing risk factors
    pub risk_factors: Vec<RiskFactor>,

    /// Headline concerns
    pub primary_concerns: Vec<String>,

    /// Actionable recommendations, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,

    /// Version label of the model that produced the prediction
    pub model_version: String,

    /// Additional context about the prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comprehensive_request_defaults() {
        let request: RiskPredictionRequest = serde_json::from_str(
            r#"{
                "patientId": "p-1",
                "patientHistory": {"age": 58, "gender": "female"}
            }"#,
        )
        .unwrap();
        assert!(request.include_recommendations);
        assert!(request.recent_vitals.is_empty());
        assert!(request.patient_history.is_some());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_age_out_of_range_fails_validation() {
        let request: RiskPredictionRequest = serde_json::from_str(
            r#"{
                "patientId": "p-1",
                "patientHistory": {"age": 180, "gender": "male"}
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_gender_fails_validation() {
        let history: PatientHistoryInput =
            serde_json::from_str(r#"{"age": 40, "gender": "robot"}"#).unwrap();
        assert!(history.validate().is_err());
    }

    #[test]
    fn test_condition_request_flattens_features() {
        let request: CardiovascularRiskRequest = serde_json::from_str(
            r#"{"patientId": "p-1", "age": 63, "restingBp": 142.0}"#,
        )
        .unwrap();
        assert_eq!(request.patient_id, "p-1");
        assert_eq!(request.features.age, 63);
        assert_eq!(request.features.resting_bp, 142.0);
        // Missing fields take model defaults
        assert_eq!(request.features.cholesterol, 200.0);
    }
}
