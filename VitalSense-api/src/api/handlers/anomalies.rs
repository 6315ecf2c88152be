use std::collections::HashMap;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use vital_sense_domain::services::anomaly;

use crate::api::routes::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::vitals::{
    AnomalyDetectionRequest, AnomalyDetectionResponse, MultivariateAnomalyRequest,
    MultivariateAnomalyResponse,
};

/// Detect sudden changes in a single vital sign time series
#[utoipa::path(
    post,
    path = "/api/v1/anomalies/detect",
    request_body = AnomalyDetectionRequest,
    responses(
        (status = 200, description = "Detection complete", body = AnomalyDetectionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "anomalies"
)]
#[instrument(skip(_state, request))]
pub async fn detect_sudden_changes(
    State(_state): State<AppState>,
    Json(request): Json<AnomalyDetectionRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    if let Err(errors) = request.validate() {
        return Err(ErrorResponse::validation_error(
            "Invalid anomaly detection request",
            Some(json!(errors.to_string())),
        ));
    }
    if request.values.len() != request.timestamps.len() {
        return Err(ErrorResponse::bad_request(
            "values and timestamps must have the same length",
        ));
    }

    info!(
        "Anomaly detection for patient: {}, vital: {}",
        request.patient_id, request.vital_type
    );

    let changes =
        anomaly::detect_sudden_changes(&request.values, &request.timestamps, request.threshold);

    let response = AnomalyDetectionResponse {
        patient_id: request.patient_id.clone(),
        vital_type: request.vital_type.clone(),
        anomalies_detected: changes.len(),
        anomalies: changes,
        timestamp: Utc::now(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Detect concerning combinations across multiple vital signs
#[utoipa::path(
    post,
    path = "/api/v1/anomalies/multivariate",
    request_body = MultivariateAnomalyRequest,
    responses(
        (status = 200, description = "Detection complete", body = MultivariateAnomalyResponse),
    ),
    tag = "anomalies"
)]
#[instrument(skip(_state, request))]
pub async fn detect_multivariate(
    State(_state): State<AppState>,
    Json(request): Json<MultivariateAnomalyRequest>,
) -> (StatusCode, Json<MultivariateAnomalyResponse>) {
    info!(
        "Multivariate anomaly detection for patient: {}",
        request.patient_id
    );

    let series: HashMap<String, Vec<f64>> = request
        .vitals_data
        .iter()
        .filter(|(_, points)| !points.is_empty())
        .map(|(vital_type, points)| {
            (
                vital_type.clone(),
                points.iter().map(|p| p.value).collect(),
            )
        })
        .collect();

    if series.is_empty() {
        let response = MultivariateAnomalyResponse {
            patient_id: request.patient_id.clone(),
            anomalies_detected: 0,
            anomalies: Vec::new(),
            vitals_analyzed: Vec::new(),
            message: Some("No data provided".to_string()),
            timestamp: Utc::now(),
        };
        return (StatusCode::OK, Json(response));
    }

    let anomalies = anomaly::detect_multivariate(&series);

    let mut vitals_analyzed: Vec<String> = series.keys().cloned().collect();
    vitals_analyzed.sort();

    let response = MultivariateAnomalyResponse {
        patient_id: request.patient_id.clone(),
        anomalies_detected: anomalies.len(),
        anomalies,
        vitals_analyzed,
        message: None,
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response))
}
