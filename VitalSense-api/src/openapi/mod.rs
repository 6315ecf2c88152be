use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,

        // Prediction endpoints
        crate::api::handlers::predictions::predict_comprehensive,
        crate::api::handlers::predictions::predict_cardiovascular,
        crate::api::handlers::predictions::predict_metabolic,
        crate::api::handlers::predictions::predict_cerebrovascular,
        crate::api::handlers::predictions::analyze_vitals_trend,

        // Anomaly endpoints
        crate::api::handlers::anomalies::detect_sudden_changes,
        crate::api::handlers::anomalies::detect_multivariate,

        // Model registry
        crate::api::handlers::models::list_models,
    ),
    components(
        schemas(
            // Request/response entities
            crate::entities::common::ErrorResponse,
            crate::entities::predictions::PatientHistoryInput,
            crate::entities::predictions::RiskPredictionRequest,
            crate::entities::predictions::CardiovascularRiskRequest,
            crate::entities::predictions::MetabolicRiskRequest,
            crate::entities::predictions::CerebrovascularRiskRequest,
            crate::entities::predictions::RiskPredictionResponse,
            crate::entities::vitals::VitalsTrendRequest,
            crate::entities::vitals::VitalsTrendResponse,
            crate::entities::vitals::AnalysisPeriod,
            crate::entities::vitals::AnomalyDetectionRequest,
            crate::entities::vitals::AnomalyDetectionResponse,
            crate::entities::vitals::VitalPoint,
            crate::entities::vitals::MultivariateAnomalyRequest,
            crate::entities::vitals::MultivariateAnomalyResponse,
            crate::entities::models::ModelInfo,
            crate::entities::models::ModelListResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,
            crate::api::handlers::health::ProbeResponse,

            // Domain schemas crossing the wire
            vital_sense_domain::entities::vitals::VitalReading,
            vital_sense_domain::entities::vitals::NormalRange,
            vital_sense_domain::entities::patient::CardiovascularFeatures,
            vital_sense_domain::entities::patient::MetabolicFeatures,
            vital_sense_domain::entities::patient::CerebrovascularFeatures,
            vital_sense_domain::entities::risk::RiskLevel,
            vital_sense_domain::entities::risk::RiskFactor,
            vital_sense_domain::entities::risk::Recommendation,
            vital_sense_domain::entities::risk::RecommendationPriority,
            vital_sense_domain::entities::trend::TrendAnalysis,
            vital_sense_domain::entities::trend::TrendDirection,
            vital_sense_domain::entities::trend::SeriesStatistics,
            vital_sense_domain::entities::trend::Anomaly,
            vital_sense_domain::entities::trend::AnomalySeverity,
            vital_sense_domain::entities::trend::SuddenChange,
            vital_sense_domain::entities::trend::MultivariateAnomaly,
            vital_sense_domain::entities::trend::ForecastPoint,
            vital_sense_domain::entities::trend::VitalRiskLevel,
            vital_sense_domain::entities::trend::VitalRiskAssessment,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "predictions", description = "Risk prediction and trend analysis endpoints"),
        (name = "anomalies", description = "Vital-sign anomaly detection endpoints"),
        (name = "models", description = "Model registry endpoints")
    ),
    info(
        title = "VitalSense ML Service API",
        version = "0.1.0",
        description = "Health risk scoring and vitals trend analytics",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;
