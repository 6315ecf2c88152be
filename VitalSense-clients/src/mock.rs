//! In-memory mock clients for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use vital_sense_domain::entities::patient::PatientProfile;
use vital_sense_domain::entities::vitals::VitalReading;

use crate::clients::{PatientClient, VitalsClient};
use crate::errors::ClientError;

/// Mock patient service with a fixed set of profiles
#[derive(Debug, Default)]
pub struct MockPatientClient {
    profiles: Mutex<HashMap<String, PatientProfile>>,
}

impl MockPatientClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under `patient_id`
    pub fn with_patient(self, patient_id: &str, profile: PatientProfile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(patient_id.to_string(), profile);
        self
    }
}

#[async_trait]
impl PatientClient for MockPatientClient {
    async fn get_patient(&self, patient_id: &str) -> Result<PatientProfile, ClientError> {
        self.profiles
            .lock()
            .unwrap()
            .get(patient_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("patient {}", patient_id)))
    }
}

/// Mock vitals service with per-patient reading histories
#[derive(Debug, Default)]
pub struct MockVitalsClient {
    readings: Mutex<HashMap<String, Vec<VitalReading>>>,
}

impl MockVitalsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reading history under `patient_id`
    pub fn with_readings(self, patient_id: &str, readings: Vec<VitalReading>) -> Self {
        self.readings
            .lock()
            .unwrap()
            .insert(patient_id.to_string(), readings);
        self
    }

    /// Register a synthetic daily series of one vital kind
    pub fn with_daily_series(
        self,
        patient_id: &str,
        vital_type: &str,
        unit: &str,
        values: &[f64],
    ) -> Self {
        let now = Utc::now();
        let readings = values
            .iter()
            .enumerate()
            .map(|(i, &value)| VitalReading {
                vital_type: vital_type.to_string(),
                value,
                unit: unit.to_string(),
                timestamp: now - Duration::days((values.len() - 1 - i) as i64),
            })
            .collect();
        self.with_readings(patient_id, readings)
    }
}

#[async_trait]
impl VitalsClient for MockVitalsClient {
    async fn get_patient_vitals(
        &self,
        patient_id: &str,
        vital_type: Option<&str>,
        days: u32,
    ) -> Result<Vec<VitalReading>, ClientError> {
        let readings = self.readings.lock().unwrap();
        let Some(history) = readings.get(patient_id) else {
            return Err(ClientError::NotFound(format!("patient {}", patient_id)));
        };

        let cutoff = Utc::now() - Duration::days(days as i64);
        Ok(history
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .filter(|r| vital_type.is_none_or(|kind| r.vital_type == kind))
            .cloned()
            .collect())
    }
}
