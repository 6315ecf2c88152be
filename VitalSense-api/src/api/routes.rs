use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use vital_sense_clients::{ClientError, HttpServiceClient, PatientClient, VitalsClient};
use vital_sense_domain::services::scorers::{
    CardiovascularModel, CerebrovascularModel, MetabolicModel,
};
use vital_sense_domain::services::RiskAggregator;

use crate::api::handlers::{anomalies, health, models, predictions};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Shared state injected into every handler.
///
/// Everything here is immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<RiskAggregator>,
    pub cardiovascular: CardiovascularModel,
    pub metabolic: MetabolicModel,
    pub cerebrovascular: CerebrovascularModel,
    pub patient_client: Arc<dyn PatientClient>,
    pub vitals_client: Arc<dyn VitalsClient>,
}

impl AppState {
    /// Build state around the given service clients
    pub fn new(
        patient_client: Arc<dyn PatientClient>,
        vitals_client: Arc<dyn VitalsClient>,
    ) -> Self {
        Self {
            aggregator: Arc::new(RiskAggregator::new()),
            cardiovascular: CardiovascularModel,
            metabolic: MetabolicModel,
            cerebrovascular: CerebrovascularModel,
            patient_client,
            vitals_client,
        }
    }
}

/// Build the production state with HTTP clients pointed at the configured
/// sibling services
pub fn create_default_state(config: &AppConfig) -> Result<AppState, ClientError> {
    let patient_client = Arc::new(HttpServiceClient::new(&config.patient_service_url)?);
    let vitals_client = Arc::new(HttpServiceClient::new(&config.vitals_service_url)?);
    Ok(AppState::new(patient_client, vitals_client))
}

/// Create the application router
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route(
            "/predictions/comprehensive",
            post(predictions::predict_comprehensive),
        )
        .route(
            "/predictions/cardiovascular",
            post(predictions::predict_cardiovascular),
        )
        .route(
            "/predictions/metabolic",
            post(predictions::predict_metabolic),
        )
        .route(
            "/predictions/cerebrovascular",
            post(predictions::predict_cerebrovascular),
        )
        .route(
            "/predictions/vitals-trend",
            post(predictions::analyze_vitals_trend),
        )
        .route("/anomalies/detect", post(anomalies::detect_sudden_changes))
        .route(
            "/anomalies/multivariate",
            post(anomalies::detect_multivariate),
        )
        .route("/models", get(models::list_models));

    debug!("API routes configured");

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check));

    debug!("Health routes configured");

    let app = Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    health::initialize_server_start_time();
    debug!("Application router assembled");

    app
}

/// CORS policy from the configured origin list; an empty list allows any
/// origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(parsed)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use vital_sense_clients::mock::{MockPatientClient, MockVitalsClient};
    use vital_sense_domain::entities::patient::PatientProfile;

    /// State wired to empty in-memory mock services
    pub fn mock_state() -> AppState {
        AppState::new(
            Arc::new(MockPatientClient::new()),
            Arc::new(MockVitalsClient::new()),
        )
    }

    fn test_app(state: AppState) -> Router {
        create_app(state, &AppConfig::default())
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = test_app(mock_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_models_route() {
        let app = test_app(mock_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/models")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["count"], 4);
    }

    #[tokio::test]
    async fn test_comprehensive_prediction_with_inline_history() {
        let app = test_app(mock_state());
        let payload = serde_json::json!({
            "patientId": "p-1",
            "patientHistory": {
                "age": 70,
                "gender": "male",
                "chronicConditions": ["hypertension"]
            },
            "recentVitals": [
                {
                    "type": "bloodPressureSystolic",
                    "value": 150.0,
                    "unit": "mmHg",
                    "timestamp": "2025-08-01T08:00:00Z"
                }
            ]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predictions/comprehensive")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["riskScore"].as_f64().unwrap() > 0.0);
        assert!(json["predictionId"].is_string());
        assert_eq!(json["modelVersion"], "1.0.0");
    }

    #[tokio::test]
    async fn test_comprehensive_prediction_resolves_patient_upstream() {
        let patient = MockPatientClient::new().with_patient(
            "p-2",
            PatientProfile {
                age: 68,
                gender: "female".to_string(),
                bmi: Some(31.0),
                chronic_conditions: vec!["hypertension".to_string()],
                smoking_status: Some("smokes".to_string()),
            },
        );
        let vitals = MockVitalsClient::new().with_daily_series(
            "p-2",
            "bloodGlucose",
            "mg/dL",
            &[130.0, 135.0, 140.0],
        );
        let state = AppState::new(Arc::new(patient), Arc::new(vitals));
        let app = test_app(state);

        let payload = serde_json::json!({ "patientId": "p-2" });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predictions/comprehensive")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["metadata"]["vitalSignsCount"], 3);
    }

    #[tokio::test]
    async fn test_comprehensive_prediction_unknown_patient_is_404() {
        let app = test_app(mock_state());
        let payload = serde_json::json!({ "patientId": "missing" });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predictions/comprehensive")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_vitals_trend_with_inline_readings() {
        let app = test_app(mock_state());
        let payload = serde_json::json!({
            "patientId": "p-1",
            "vitalType": "heartRate",
            "readings": [
                {"type": "heartRate", "value": 70.0, "unit": "bpm", "timestamp": "2025-08-01T08:00:00Z"},
                {"type": "heartRate", "value": 74.0, "unit": "bpm", "timestamp": "2025-08-02T08:00:00Z"},
                {"type": "heartRate", "value": 78.0, "unit": "bpm", "timestamp": "2025-08-03T08:00:00Z"},
                {"type": "heartRate", "value": 82.0, "unit": "bpm", "timestamp": "2025-08-04T08:00:00Z"}
            ]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predictions/vitals-trend")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["trend"], "increasing");
        assert_eq!(json["period"]["days"], 7);
        assert_eq!(json["statistics"]["count"], 4);
    }

    #[tokio::test]
    async fn test_anomaly_detect_route() {
        let app = test_app(mock_state());
        let payload = serde_json::json!({
            "patientId": "p-1",
            "vitalType": "heartRate",
            "values": [100.0, 100.0, 150.0],
            "timestamps": [
                "2025-08-01T08:00:00Z",
                "2025-08-01T09:00:00Z",
                "2025-08-01T10:00:00Z"
            ]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/anomalies/detect")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["anomaliesDetected"], 1);
        assert_eq!(json["anomalies"][0]["severity"], "high");
    }

    #[tokio::test]
    async fn test_invalid_age_is_400() {
        let app = test_app(mock_state());
        let payload = serde_json::json!({
            "patientId": "p-1",
            "patientHistory": {"age": 500, "gender": "male"}
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/predictions/comprehensive")
                    .header("content-type", mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
