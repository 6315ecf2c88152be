use serde::Serialize;
use utoipa::ToSchema;

/// Static registry metadata for one scoring model
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Model name, e.g. "cardiovascular"
    pub name: &'static str,

    /// Model version label
    pub version: &'static str,

    /// Model kind ("rule_based" or "ensemble")
    #[serde(rename = "type")]
    pub model_type: &'static str,

    /// Fixed confidence the model reports with each prediction
    pub confidence: f64,

    /// Feature names the model consumes
    pub features: Vec<&'static str>,

    /// What the model assesses
    pub description: &'static str,
}

/// Response body for the model registry listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelListResponse {
    pub models: Vec<ModelInfo>,
    pub count: usize,
}
