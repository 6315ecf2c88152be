use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use vital_sense_clients::ClientError;
use vital_sense_domain::entities::risk::{ConditionAssessment, RiskThresholds};
use vital_sense_domain::entities::vitals::VitalReading;
use vital_sense_domain::services::analyzer;
use vital_sense_domain::services::scorers::RiskModel;

use crate::api::routes::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::predictions::{
    CardiovascularRiskRequest, CerebrovascularRiskRequest, MetabolicRiskRequest,
    RiskPredictionRequest, RiskPredictionResponse,
};
use crate::entities::vitals::{AnalysisPeriod, VitalsTrendRequest, VitalsTrendResponse};

/// Days of vitals history fetched when a comprehensive request carries none
const DEFAULT_VITALS_WINDOW_DAYS: u32 = 7;

/// Map a client failure onto the API error taxonomy
fn map_client_error(error: ClientError, service: &str, resource: &str) -> ErrorResponse {
    if error.is_not_found() {
        info!("{} reported {} as missing", service, resource);
        ErrorResponse::not_found(resource)
    } else {
        warn!("{} unavailable: {}", service, error);
        ErrorResponse::upstream_unavailable(service)
    }
}

/// Comprehensive health risk assessment across all condition models
#[utoipa::path(
    post,
    path = "/api/v1/predictions/comprehensive",
    request_body = RiskPredictionRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = RiskPredictionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found upstream", body = ErrorResponse),
        (status = 502, description = "Upstream service unavailable", body = ErrorResponse),
    ),
    tag = "predictions"
)]
#[instrument(skip(state, request))]
pub async fn predict_comprehensive(
    State(state): State<AppState>,
    Json(request): Json<RiskPredictionRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    if let Err(errors) = request.validate() {
        return Err(ErrorResponse::validation_error(
            "Invalid prediction request",
            Some(json!(errors.to_string())),
        ));
    }

    info!("Comprehensive risk prediction for patient: {}", request.patient_id);

    let profile = match &request.patient_history {
        Some(history) => history.to_profile(),
        None => state
            .patient_client
            .get_patient(&request.patient_id)
            .await
            .map_err(|e| map_client_error(e, "patient service", "patient"))?,
    };

    let vitals: Vec<VitalReading> = if request.recent_vitals.is_empty() {
        match state
            .vitals_client
            .get_patient_vitals(&request.patient_id, None, DEFAULT_VITALS_WINDOW_DAYS)
            .await
        {
            Ok(readings) => readings,
            // A patient without a vitals history is still scoreable
            Err(ClientError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(map_client_error(e, "vitals service", "vitals")),
        }
    } else {
        request.recent_vitals.clone()
    };

    let assessment = state.aggregator.assess(&profile, &vitals);

    let response = RiskPredictionResponse {
        patient_id: request.patient_id.clone(),
        prediction_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        risk_level: assessment.risk_level,
        risk_score: assessment.risk_score,
        confidence: assessment.confidence,
        risk_factors: assessment.risk_factors,
        primary_concerns: assessment.primary_concerns,
        recommendations: request
            .include_recommendations
            .then_some(assessment.recommendations),
        model_version: "1.0.0".to_string(),
        metadata: Some(json!({
            "vitalSignsCount": vitals.len(),
            "analysisDate": Utc::now().to_rfc3339(),
        })),
    };

    info!(
        "Prediction complete: {:?} (score: {:.2})",
        response.risk_level, response.risk_score
    );

    Ok((StatusCode::OK, Json(response)))
}

/// Build the single-condition response envelope
fn condition_response(
    patient_id: &str,
    assessment: ConditionAssessment,
    concern: &str,
    model_version: &str,
) -> RiskPredictionResponse {
    let risk_level = RiskThresholds::default().level_for(assessment.risk_score);
    RiskPredictionResponse {
        patient_id: patient_id.to_string(),
        prediction_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        risk_level,
        risk_score: assessment.risk_score,
        confidence: assessment.confidence,
        risk_factors: assessment.risk_factors,
        primary_concerns: vec![concern.to_string()],
        recommendations: None,
        model_version: model_version.to_string(),
        metadata: None,
    }
}

fn check_age(age: i32) -> Result<(), ErrorResponse> {
    if (0..=150).contains(&age) {
        Ok(())
    } else {
        Err(ErrorResponse::validation_error(
            "age must be between 0 and 150",
            None,
        ))
    }
}

/// Cardiovascular disease risk prediction
#[utoipa::path(
    post,
    path = "/api/v1/predictions/cardiovascular",
    request_body = CardiovascularRiskRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = RiskPredictionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "predictions"
)]
#[instrument(skip(state, request))]
pub async fn predict_cardiovascular(
    State(state): State<AppState>,
    Json(request): Json<CardiovascularRiskRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    check_age(request.features.age)?;
    info!("Cardiovascular prediction for patient: {}", request.patient_id);

    let assessment = state.cardiovascular.predict(&request.features);
    let response = condition_response(
        &request.patient_id,
        assessment,
        "Cardiovascular health assessment",
        "cardiovascular_v1.0",
    );
    Ok((StatusCode::OK, Json(response)))
}

/// Metabolic (diabetes) risk prediction
#[utoipa::path(
    post,
    path = "/api/v1/predictions/metabolic",
    request_body = MetabolicRiskRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = RiskPredictionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "predictions"
)]
#[instrument(skip(state, request))]
pub async fn predict_metabolic(
    State(state): State<AppState>,
    Json(request): Json<MetabolicRiskRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    check_age(request.features.age)?;
    info!("Metabolic prediction for patient: {}", request.patient_id);

    let assessment = state.metabolic.predict(&request.features);
    let response = condition_response(
        &request.patient_id,
        assessment,
        "Diabetes risk assessment",
        "metabolic_v1.0",
    );
    Ok((StatusCode::OK, Json(response)))
}

/// Cerebrovascular (stroke) risk prediction
#[utoipa::path(
    post,
    path = "/api/v1/predictions/cerebrovascular",
    request_body = CerebrovascularRiskRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = RiskPredictionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "predictions"
)]
#[instrument(skip(state, request))]
pub async fn predict_cerebrovascular(
    State(state): State<AppState>,
    Json(request): Json<CerebrovascularRiskRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    check_age(request.features.age)?;
    info!("Cerebrovascular prediction for patient: {}", request.patient_id);

    let assessment = state.cerebrovascular.predict(&request.features);
    let response = condition_response(
        &request.patient_id,
        assessment,
        "Stroke risk assessment",
        "cerebrovascular_v1.0",
    );
    Ok((StatusCode::OK, Json(response)))
}

/// Vital signs trend analysis with anomaly detection and forecast
#[utoipa::path(
    post,
    path = "/api/v1/predictions/vitals-trend",
    request_body = VitalsTrendRequest,
    responses(
        (status = 200, description = "Trend analysis produced", body = VitalsTrendResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Patient not found upstream", body = ErrorResponse),
        (status = 502, description = "Upstream service unavailable", body = ErrorResponse),
    ),
    tag = "predictions"
)]
#[instrument(skip(state, request))]
pub async fn analyze_vitals_trend(
    State(state): State<AppState>,
    Json(request): Json<VitalsTrendRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    if let Err(errors) = request.validate() {
        return Err(ErrorResponse::validation_error(
            "Invalid trend analysis request",
            Some(json!(errors.to_string())),
        ));
    }

    info!(
        "Vitals trend analysis for patient: {}, vital: {}, days: {}",
        request.patient_id, request.vital_type, request.days
    );

    let end_date = Utc::now();
    let start_date = end_date - Duration::days(request.days as i64);

    let readings: Vec<VitalReading> = match &request.readings {
        Some(inline) => inline
            .iter()
            .filter(|r| r.vital_type == request.vital_type)
            .cloned()
            .collect(),
        None => state
            .vitals_client
            .get_patient_vitals(&request.patient_id, Some(&request.vital_type), request.days)
            .await
            .map_err(|e| map_client_error(e, "vitals service", "patient"))?,
    };

    let analysis = analyzer::analyze_trend(&readings, &request.vital_type);

    let response = VitalsTrendResponse {
        patient_id: request.patient_id.clone(),
        vital_type: request.vital_type.clone(),
        period: AnalysisPeriod {
            days: request.days,
            start_date,
            end_date,
        },
        analysis,
    };

    Ok((StatusCode::OK, Json(response)))
}
