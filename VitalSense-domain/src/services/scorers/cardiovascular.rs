use crate::entities::patient::CardiovascularFeatures;
use crate::entities::risk::{ConditionAssessment, RiskFactor};
use crate::services::scorers::{cap_score, RiskModel};

/// Rule-based cardiovascular disease risk model.
///
/// Weights follow the clinical bands of the original heart-disease scorer;
/// a trained classifier can replace `predict` behind the same trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardiovascularModel;

impl CardiovascularModel {
    pub const CONFIDENCE: f64 = 0.85;

    fn score(features: &CardiovascularFeatures) -> f64 {
        let mut score = 0.0;

        // Age bands
        if features.age > 65 {
            score += 0.3;
        } else if features.age > 55 {
            score += 0.2;
        } else if features.age > 45 {
            score += 0.1;
        }

        // Resting blood pressure bands
        if features.resting_bp > 140.0 {
            score += 0.25;
        } else if features.resting_bp > 130.0 {
            score += 0.15;
        }

        // Cholesterol bands
        if features.cholesterol > 240.0 {
            score += 0.2;
        } else if features.cholesterol > 200.0 {
            score += 0.1;
        }

        if features.fasting_blood_sugar {
            score += 0.15;
        }

        if features.exercise_induced_angina {
            score += 0.2;
        }

        cap_score(score)
    }

    fn risk_factors(features: &CardiovascularFeatures) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        if features.age > 55 {
            factors.push(RiskFactor {
                factor: "Age".to_string(),
                impact: ((features.age - 55) as f64 / 30.0).min(0.3),
                description: format!("Age {} increases cardiovascular risk", features.age),
            });
        }

        if features.resting_bp > 130.0 {
            factors.push(RiskFactor {
                factor: "High Blood Pressure".to_string(),
                impact: ((features.resting_bp - 130.0) / 50.0).min(0.3),
                description: format!("Blood pressure {} mmHg is elevated", features.resting_bp),
            });
        }

        if features.cholesterol > 200.0 {
            factors.push(RiskFactor {
                factor: "High Cholesterol".to_string(),
                impact: ((features.cholesterol - 200.0) / 100.0).min(0.25),
                description: format!(
                    "Cholesterol level {} mg/dL is high",
                    features.cholesterol
                ),
            });
        }

        if features.exercise_induced_angina {
            factors.push(RiskFactor {
                factor: "Exercise-Induced Angina".to_string(),
                impact: 0.2,
                description: "Chest pain during exercise indicates cardiac stress".to_string(),
            });
        }

        factors
    }
}

impl RiskModel for CardiovascularModel {
    type Features = CardiovascularFeatures;

    fn name(&self) -> &'static str {
        "cardiovascular"
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
