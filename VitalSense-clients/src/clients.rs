use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use vital_sense_domain::entities::patient::PatientProfile;
use vital_sense_domain::entities::vitals::VitalReading;

use crate::errors::ClientError;

/// Request timeout applied to every upstream call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the patient service
#[async_trait]
pub trait PatientClient: Send + Sync {
    /// Fetch a patient's profile by id
    async fn get_patient(&self, patient_id: &str) -> Result<PatientProfile, ClientError>;
}

/// Client for the vitals service
#[async_trait]
pub trait VitalsClient: Send + Sync {
    /// Fetch a patient's vitals history.
    ///
    /// `vital_type` narrows the result to one vital kind; `days` bounds how
    /// far back the history reaches.
    async fn get_patient_vitals(
        &self,
        patient_id: &str,
        vital_type: Option<&str>,
        days: u32,
    ) -> Result<Vec<VitalReading>, ClientError>;
}

/// HTTP implementation backed by reqwest, pointed at one service base URL
#[derive(Debug, Clone)]
pub struct HttpServiceClient {
    client: Client,
    base_url: String,
}

impl HttpServiceClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` relative to the base URL and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "calling upstream service");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url));
        }

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "upstream returned non-success status");
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PatientClient for HttpServiceClient {
    async fn get_patient(&self, patient_id: &str) -> Result<PatientProfile, ClientError> {
        self.get_json(&format!("/api/v1/patients/{}", patient_id), &[])
            .await
    }
}

#[async_trait]
impl VitalsClient for HttpServiceClient {
    async fn get_patient_vitals(
        &self,
        patient_id: &str,
        vital_type: Option<&str>,
        days: u32,
    ) -> Result<Vec<VitalReading>, ClientError> {
        let mut query = vec![("days", days.to_string())];
        if let Some(kind) = vital_type {
            query.push(("type", kind.to_string()));
        }
        self.get_json(
            &format!("/api/v1/patients/{}/vitals", patient_id),
            &query,
        )
        .await
    }
}
