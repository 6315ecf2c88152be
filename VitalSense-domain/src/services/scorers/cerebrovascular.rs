use crate::entities::patient::CerebrovascularFeatures;
use crate::entities::risk::{ConditionAssessment, RiskFactor};
use crate::services::scorers::{cap_score, RiskModel};

/// Smoking statuses that contribute to cerebrovascular risk
const SMOKING_RISK_STATUSES: [&str; 2] = ["formerly smoked", "smokes"];

/// Rule-based cerebrovascular (stroke) risk model
#[derive(Debug, Clone, Copy, Default)]
pub struct CerebrovascularModel;

impl CerebrovascularModel {
    pub const CONFIDENCE: f64 = 0.80;

    fn smokes_or_smoked(features: &CerebrovascularFeatures) -> bool {
        SMOKING_RISK_STATUSES
            .iter()
            .any(|s| *s == features.smoking_status)
    }

    fn score(features: &CerebrovascularFeatures) -> f64 {
        let mut score = 0.0;

        // Age bands
        if features.age > 65 {
            score += 0.3;
        } else if features.age > 55 {
            score += 0.15;
        }

        if features.hypertension {
            score += 0.25;
        }

        if features.heart_disease {
            score += 0.25;
        }

        if features.avg_glucose_level > 125.0 {
            score += 0.15;
        }

        if features.bmi > 30.0 {
            score += 0.1;
        }

        if Self::smokes_or_smoked(features) {
            score += 0.15;
        }

        cap_score(score)
    }

    fn risk_factors(features: &CerebrovascularFeatures) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        if features.hypertension {
            factors.push(RiskFactor {
                factor: "Hypertension".to_string(),
                impact: 0.25,
                description: "Hypertension significantly increases stroke risk".to_string(),
            });
        }

        if features.heart_disease {
            factors.push(RiskFactor {
                factor: "Heart Disease".to_string(),
                impact: 0.25,
                description: "Existing heart disease increases stroke risk".to_string(),
            });
        }

        if Self::smokes_or_smoked(features) {
            factors.push(RiskFactor {
                factor: "Smoking".to_string(),
                impact: 0.15,
                description: "Smoking damages blood vessels and increases risk".to_string(),
            });
        }

        factors
    }
}

impl RiskModel for CerebrovascularModel {
    type Features = CerebrovascularFeatures;

    fn name(&self) -> &'static str {
        "cerebrovascular"
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
