use tracing::debug;

use crate::entities::patient::{
    CardiovascularFeatures, CerebrovascularFeatures, MetabolicFeatures, PatientProfile,
};
use crate::entities::risk::{
    ComprehensiveAssessment, ConditionAssessment, Recommendation, RecommendationPriority,
    RiskLevel, RiskThresholds,
};
use crate::entities::vitals::VitalReading;
use crate::services::scorers::{
    CardiovascularModel, CerebrovascularModel, MetabolicModel, RiskModel,
};

/// Fixed combination weight of the cardiovascular score
const CARDIOVASCULAR_WEIGHT: f64 = 0.4;

/// Fixed combination weight of the metabolic score
const METABOLIC_WEIGHT: f64 = 0.3;

/// Fixed combination weight of the cerebrovascular score
const CEREBROVASCULAR_WEIGHT: f64 = 0.3;

/// Condition scores above this surface as a primary concern
const CONCERN_THRESHOLD: f64 = 0.6;

/// Condition scores above this trigger a lifestyle recommendation
const RECOMMENDATION_THRESHOLD: f64 = 0.5;

/// Combines the three condition models into one overall assessment.
///
/// Holds only immutable model values and the threshold table; safe to share
/// across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    cardiovascular: CardiovascularModel,
    metabolic: MetabolicModel,
    cerebrovascular: CerebrovascularModel,
    thresholds: RiskThresholds,
}

impl RiskAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all three condition models over the patient's profile and recent
    /// vitals and combine the results.
    pub fn assess(
        &self,
        profile: &PatientProfile,
        vitals: &[VitalReading],
    ) -> ComprehensiveAssessment {
        let cardiovascular = self
            .cardiovascular
            .predict(&derive_cardiovascular_features(profile, vitals));
        let metabolic = self
            .metabolic
            .predict(&derive_metabolic_features(profile, vitals));
        let cerebrovascular = self
            .cerebrovascular
            .predict(&derive_cerebrovascular_features(profile, vitals));

        debug!(
            cardiovascular = cardiovascular.risk_score,
            metabolic = metabolic.risk_score,
            cerebrovascular = cerebrovascular.risk_score,
            "condition scores computed"
        );

        self.combine(cardiovascular, metabolic, cerebrovascular)
    }

    /// Combine already-computed condition assessments.
    ///
    /// Factor lists are concatenated in cardiovascular, metabolic,
    /// cerebrovascular order and never deduplicated or renormalized.
    pub fn combine(
        &self,
        cardiovascular: ConditionAssessment,
        metabolic: ConditionAssessment,
        cerebrovascular: ConditionAssessment,
    ) -> ComprehensiveAssessment {
        let risk_score = cardiovascular.risk_score * CARDIOVASCULAR_WEIGHT
            + metabolic.risk_score * METABOLIC_WEIGHT
            + cerebrovascular.risk_score * CEREBROVASCULAR_WEIGHT;

        let confidence =
            (cardiovascular.confidence + metabolic.confidence + cerebrovascular.confidence) / 3.0;

        let risk_level = self.thresholds.level_for(risk_score);

        let primary_concerns = primary_concerns(
            cardiovascular.risk_score,
            metabolic.risk_score,
            cerebrovascular.risk_score,
        );

        let recommendations = recommendations(
            risk_level,
            cardiovascular.risk_score,
            metabolic.risk_score,
        );

        let mut risk_factors = cardiovascular.risk_factors;
        risk_factors.extend(metabolic.risk_factors);
        risk_factors.extend(cerebrovascular.risk_factors);

        ComprehensiveAssessment {
            risk_level,
            risk_score,
            confidence,
            risk_factors,
            primary_concerns,
            recommendations,
        }
    }
}

/// Value of the most recent reading of the given vital type, or the default
/// when the series carries none
fn latest_vital(vitals: &[VitalReading], vital_type: &str, default: f64) -> f64 {
    vitals
        .iter()
        .filter(|v| v.vital_type == vital_type)
        .max_by_key(|v| v.timestamp)
        .map(|v| v.value)
        .unwrap_or(default)
}

fn derive_cardiovascular_features(
    profile: &PatientProfile,
    vitals: &[VitalReading],
) -> CardiovascularFeatures {
    CardiovascularFeatures {
        age: profile.age,
        gender: profile.gender.clone(),
        resting_bp: latest_vital(vitals, "bloodPressureSystolic", 120.0),
        max_heart_rate: latest_vital(vitals, "heartRate", 150.0),
        // Cholesterol and fasting blood sugar come from lab results, which
        // the vitals feed does not carry; model defaults apply
        ..Default::default()
    }
}

fn derive_metabolic_features(
    profile: &PatientProfile,
    vitals: &[VitalReading],
) -> MetabolicFeatures {
    MetabolicFeatures {
        age: profile.age,
        bmi: profile.bmi.unwrap_or(25.0),
        glucose_level: latest_vital(vitals, "bloodGlucose", 100.0),
        blood_pressure: latest_vital(vitals, "bloodPressureDiastolic", 80.0),
    }
}

fn derive_cerebrovascular_features(
    profile: &PatientProfile,
    vitals: &[VitalReading],
) -> CerebrovascularFeatures {
    CerebrovascularFeatures {
        age: profile.age,
        hypertension: profile.has_condition("hypertension"),
        heart_disease: profile.has_condition("heart disease"),
        avg_glucose_level: latest_vital(vitals, "bloodGlucose", 100.0),
        bmi: profile.bmi.unwrap_or(25.0),
        smoking_status: profile
            .smoking_status
            .clone()
            .unwrap_or_else(|| "never smoked".to_string()),
    }
}

/// One message per condition above the concern threshold, in fixed order;
/// a single all-clear message when none qualify
fn primary_concerns(cardiovascular: f64, metabolic: f64, cerebrovascular: f64) -> Vec<String> {
    let mut concerns = Vec::new();
    if cardiovascular > CONCERN_THRESHOLD {
        concerns.push("Elevated cardiovascular disease risk".to_string());
    }
    if metabolic > CONCERN_THRESHOLD {
        concerns.push("High diabetes risk".to_string());
    }
    if cerebrovascular > CONCERN_THRESHOLD {
        concerns.push("Increased stroke risk".to_string());
    }
    if concerns.is_empty() {
        concerns.push("Overall health status is good".to_string());
    }
    concerns
}

/// Tiered recommendations: a consultation alert for high overall risk, plus
/// per-condition lifestyle guidance; all can co-occur
fn recommendations(
    risk_level: RiskLevel,
    cardiovascular: f64,
    metabolic: f64,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if risk_level >= RiskLevel::High {
        recommendations.push(Recommendation {
            category: "Immediate Action".to_string(),
            priority: RecommendationPriority::High,
            description: "Schedule consultation with healthcare provider".to_string(),
            action_items: vec![
                "Book appointment with primary care physician".to_string(),
                "Bring recent test results and medication list".to_string(),
                "Monitor symptoms closely".to_string(),
            ],
        });
    }

    if cardiovascular > RECOMMENDATION_THRESHOLD {
        recommendations.push(Recommendation {
            category: "Cardiovascular Health".to_string(),
            priority: RecommendationPriority::Medium,
            description: "Improve heart health through lifestyle changes".to_string(),
            action_items: vec![
                "Engage in 30 minutes of moderate exercise daily".to_string(),
                "Reduce sodium intake to less than 2,300mg per day".to_string(),
                "Monitor blood pressure regularly".to_string(),
                "Consider stress reduction techniques".to_string(),
            ],
        });
    }

    if metabolic > RECOMMENDATION_THRESHOLD {
        recommendations.push(Recommendation {
            category: "Metabolic Health".to_string(),
            priority: RecommendationPriority::Medium,
            description: "Reduce diabetes risk".to_string(),
            action_items: vec![
                "Maintain healthy weight (BMI < 25)".to_string(),
                "Limit refined carbohydrates and sugars".to_string(),
                "Monitor blood glucose levels".to_string(),
                "Increase fiber intake".to_string(),
            ],
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn assessment(score: f64, confidence: f64) -> ConditionAssessment {
        ConditionAssessment {
            risk_score: score,
            confidence,
            risk_factors: Vec::new(),
        }
    }

    fn reading(vital_type: &str, value: f64, hour: u32) -> VitalReading {
        VitalReading {
            vital_type: vital_type.to_string(),
            value,
            unit: "".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 8, 1, hour, 0, 0).unwrap(),
        }
    }

    fn profile() -> PatientProfile {
        PatientProfile {
            age: 50,
            gender: "male".to_string(),
            bmi: None,
            chronic_conditions: Vec::new(),
            smoking_status: None,
        }
    }

    #[test]
    fn test_weighted_combination() {
        let combined = RiskAggregator::new().combine(
            assessment(0.8, 0.85),
            assessment(0.3, 0.82),
            assessment(0.3, 0.80),
        );
        // 0.8×0.4 + 0.3×0.3 + 0.3×0.3 = 0.50
        assert!((combined.risk_score - 0.50).abs() < 1e-9);
        assert_eq!(combined.risk_level, RiskLevel::Medium);
        assert!((combined.confidence - (0.85 + 0.82 + 0.80) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_primary_concern_per_elevated_condition() {
        let combined = RiskAggregator::new().combine(
            assessment(0.7, 0.85),
            assessment(0.2, 0.82),
            assessment(0.65, 0.80),
        );
        assert_eq!(
            combined.primary_concerns,
            vec!["Elevated cardiovascular disease risk", "Increased stroke risk"]
        );
    }

    #[test]
    fn test_all_clear_concern_when_none_elevated() {
        let combined = RiskAggregator::new().combine(
            assessment(0.1, 0.85),
            assessment(0.2, 0.82),
            assessment(0.1, 0.80),
        );
        assert_eq!(combined.primary_concerns, vec!["Overall health status is good"]);
    }

    #[test]
    fn test_consultation_recommendation_for_high_overall() {
        // 0.9/0.9/0.9 → overall 0.9 → critical
        let combined = RiskAggregator::new().combine(
            assessment(0.9, 0.85),
            assessment(0.9, 0.82),
            assessment(0.9, 0.80),
        );
        assert_eq!(combined.risk_level, RiskLevel::Critical);
        assert_eq!(combined.recommendations[0].category, "Immediate Action");
        assert_eq!(
            combined.recommendations[0].priority,
            RecommendationPriority::High
        );
        // Lifestyle recommendations co-occur with the consultation alert
        assert_eq!(combined.recommendations.len(), 3);
    }

    #[test]
    fn test_lifestyle_recommendations_independent_of_level() {
        let combined = RiskAggregator::new().combine(
            assessment(0.55, 0.85),
            assessment(0.2, 0.82),
            assessment(0.2, 0.80),
        );
        // Overall 0.34 → medium: no consultation, but cardio > 0.5
        assert_eq!(combined.recommendations.len(), 1);
        assert_eq!(combined.recommendations[0].category, "Cardiovascular Health");
    }

    #[test]
    fn test_factor_concatenation_order() {
        let factor = |name: &str| crate::entities::risk::RiskFactor {
            factor: name.to_string(),
            impact: 0.2,
            description: String::new(),
        };
        let mut cardio = assessment(0.4, 0.85);
        cardio.risk_factors.push(factor("Age"));
        let mut metabolic = assessment(0.4, 0.82);
        metabolic.risk_factors.push(factor("Elevated BMI"));
        let mut cerebro = assessment(0.4, 0.80);
        cerebro.risk_factors.push(factor("Smoking"));

        let combined = RiskAggregator::new().combine(cardio, metabolic, cerebro);
        let names: Vec<&str> = combined
            .risk_factors
            .iter()
            .map(|f| f.factor.as_str())
            .collect();
        assert_eq!(names, vec!["Age", "Elevated BMI", "Smoking"]);
    }

    #[test]
    fn test_latest_vital_picks_max_timestamp() {
        let vitals = vec![
            reading("heartRate", 70.0, 8),
            reading("heartRate", 95.0, 11),
            reading("heartRate", 80.0, 9),
            reading("bloodGlucose", 110.0, 10),
        ];
        assert_eq!(latest_vital(&vitals, "heartRate", 150.0), 95.0);
        assert_eq!(latest_vital(&vitals, "bloodGlucose", 100.0), 110.0);
        assert_eq!(latest_vital(&vitals, "temperature", 37.0), 37.0);
    }

    #[test]
    fn test_assess_uses_profile_conditions() {
        let mut profile = profile();
        profile.age = 70;
        profile.chronic_conditions =
            vec!["hypertension".to_string(), "heart disease".to_string()];

        let result = RiskAggregator::new().assess(&profile, &[]);
        // Cerebrovascular: 0.3 (age) + 0.25 + 0.25 = 0.8 > 0.6 → concern
        assert!(result
            .primary_concerns
            .iter()
            .any(|c| c.contains("stroke")));
        // Factors from the cerebrovascular model are present
        assert!(result.risk_factors.iter().any(|f| f.factor == "Hypertension"));
    }

    #[test]
    fn test_assess_is_idempotent() {
        let profile = profile();
        let vitals = vec![reading("bloodPressureSystolic", 150.0, 9)];
        let aggregator = RiskAggregator::new();
        let first = aggregator.assess(&profile, &vitals);
        let second = aggregator.assess(&profile, &vitals);
        assert_eq!(first, second);
    }
}
