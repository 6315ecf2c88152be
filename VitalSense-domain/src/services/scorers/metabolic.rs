use crate::entities::patient::MetabolicFeatures;
use crate::entities::risk::{ConditionAssessment, RiskFactor};
use crate::services::scorers::{cap_score, RiskModel};

/// Rule-based metabolic (type 2 diabetes) risk model
#[derive(Debug, Clone, Copy, Default)]
pub struct MetabolicModel;

impl MetabolicModel {
    pub const CONFIDENCE: f64 = 0.82;

    fn score(features: &MetabolicFeatures) -> f64 {
        let mut score = 0.0;

        // BMI bands
        if features.bmi > 30.0 {
            score += 0.3;
        } else if features.bmi > 25.0 {
            score += 0.15;
        }

        // Fasting glucose bands (126 mg/dL is the diabetic threshold)
        if features.glucose_level > 126.0 {
            score += 0.4;
        } else if features.glucose_level > 100.0 {
            score += 0.2;
        }

        // Diastolic blood pressure
        if features.blood_pressure > 90.0 {
            score += 0.15;
        }

        if features.age > 45 {
            score += 0.15;
        }

        cap_score(score)
    }

    fn risk_factors(features: &MetabolicFeatures) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        if features.bmi > 25.0 {
            factors.push(RiskFactor {
                factor: "Elevated BMI".to_string(),
                impact: ((features.bmi - 25.0) / 15.0).min(0.3),
                description: format!("BMI of {:.1} increases diabetes risk", features.bmi),
            });
        }

        if features.glucose_level > 100.0 {
            factors.push(RiskFactor {
                factor: "Elevated Glucose".to_string(),
                impact: ((features.glucose_level - 100.0) / 100.0).min(0.4),
                description: format!(
                    "Fasting glucose {} mg/dL is elevated",
                    features.glucose_level
                ),
            });
        }

        factors
    }
}

impl RiskModel for MetabolicModel {
    type Features = MetabolicFeatures;

    fn name(&self) -> &'static str {
        "metabolic"
    }

    fn confidence(&self) -> f64 {
        Self::CONFIDENCE
    }

    fn predict(&self, features: &Self::Features) -> ConditionAssessment {
        ConditionAssessment {
            risk_score: Self::score(features),
            confidence: Self::CONFIDENCE,
            risk_factors: Self::risk_factors(features),
        }
    }
}
