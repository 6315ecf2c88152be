use axum::{extract::Json, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use vital_sense_domain::services::scorers::{
    CardiovascularModel, CerebrovascularModel, MetabolicModel,
};

use crate::entities::models::{ModelInfo, ModelListResponse};

/// The static model registry.
///
/// Confidences mirror what each model reports with its predictions; the
/// comprehensive entry carries the mean of the three.
fn registry() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "cardiovascular",
            version: "1.0.0",
            model_type: "rule_based",
            confidence: CardiovascularModel::CONFIDENCE,
            features: vec![
                "age",
                "gender",
                "restingBp",
                "cholesterol",
                "fastingBloodSugar",
                "maxHeartRate",
                "exerciseInducedAngina",
            ],
            description: "Predicts cardiovascular disease risk based on clinical parameters",
        },
        ModelInfo {
            name: "metabolic",
            version: "1.0.0",
            model_type: "rule_based",
            confidence: MetabolicModel::CONFIDENCE,
            features: vec!["age", "bmi", "glucoseLevel", "bloodPressure"],
            description: "Predicts type 2 diabetes risk using metabolic indicators",
        },
        ModelInfo {
            name: "cerebrovascular",
            version: "1.0.0",
            model_type: "rule_based",
            confidence: CerebrovascularModel::CONFIDENCE,
            features: vec![
                "age",
                "hypertension",
                "heartDisease",
                "avgGlucoseLevel",
                "bmi",
                "smokingStatus",
            ],
            description: "Assesses stroke risk based on cerebrovascular factors",
        },
        ModelInfo {
            name: "comprehensive",
            version: "1.0.0",
            model_type: "ensemble",
            confidence: (CardiovascularModel::CONFIDENCE
                + MetabolicModel::CONFIDENCE
                + CerebrovascularModel::CONFIDENCE)
                / 3.0,
            features: vec!["patientProfile", "recentVitals"],
            description: "Comprehensive health risk assessment combining all condition models",
        },
    ]
}

/// List the available scoring models
#[utoipa::path(
    get,
    path = "/api/v1/models",
    responses(
        (status = 200, description = "Model registry listing", body = ModelListResponse),
    ),
    tag = "models"
)]
#[instrument]
pub async fn list_models() -> impl IntoResponse {
    let models = registry();
    let count = models.len();
    (StatusCode::OK, Json(ModelListResponse { models, count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lists_all_models() {
        let models = registry();
        assert_eq!(models.len(), 4);
        let names: Vec<&str> = models.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["cardiovascular", "metabolic", "cerebrovascular", "comprehensive"]
        );
    }

    #[test]
    fn test_registry_confidences_match_models() {
        let models = registry();
        assert_eq!(models[0].confidence, 0.85);
        assert_eq!(models[1].confidence, 0.82);
        assert_eq!(models[2].confidence, 0.80);
    }
}
