use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// The vital sign kinds the service knows normal ranges for.
///
/// Wire names are camelCase to match the vitals service payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum VitalType {
    /// Heart rate in beats per minute
    HeartRate,

    /// Systolic blood pressure in mmHg
    BloodPressureSystolic,

    /// Diastolic blood pressure in mmHg
    BloodPressureDiastolic,

    /// Peripheral oxygen saturation in percent
    OxygenSaturation,

    /// Body temperature in degrees Celsius
    Temperature,

    /// Respiratory rate in breaths per minute
    RespiratoryRate,

    /// Blood glucose in mg/dL
    BloodGlucose,
}

impl VitalType {
    /// Parse a wire-format vital type name. Unknown names yield `None`;
    /// callers decide whether that is an error or an "unknown" result.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "heartRate" => Some(VitalType::HeartRate),
            "bloodPressureSystolic" => Some(VitalType::BloodPressureSystolic),
            "bloodPressureDiastolic" => Some(VitalType::BloodPressureDiastolic),
            "oxygenSaturation" => Some(VitalType::OxygenSaturation),
            "temperature" => Some(VitalType::Temperature),
            "respiratoryRate" => Some(VitalType::RespiratoryRate),
            "bloodGlucose" => Some(VitalType::BloodGlucose),
            _ => None,
        }
    }

    /// The wire-format name for this vital type
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalType::HeartRate => "heartRate",
            VitalType::BloodPressureSystolic => "bloodPressureSystolic",
            VitalType::BloodPressureDiastolic => "bloodPressureDiastolic",
            VitalType::OxygenSaturation => "oxygenSaturation",
            VitalType::Temperature => "temperature",
            VitalType::RespiratoryRate => "respiratoryRate",
            VitalType::BloodGlucose => "bloodGlucose",
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinically accepted [min, max] band for a vital type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct NormalRange {
    /// Lower bound of the normal band
    pub min: f64,

    /// Upper bound of the normal band
    pub max: f64,

    /// Unit of measurement for the band
    pub unit: String,
}

impl NormalRange {
    pub fn new(min: f64, max: f64, unit: &str) -> Self {
        Self {
            min,
            max,
            unit: unit.to_string(),
        }
    }

    /// Midpoint of the band, used for deviation display
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// A single vital sign measurement.
///
/// A series is a time-ordered, non-unique sequence of readings for one
/// patient and one vital type. The type is kept as a string at this level so
/// readings for vital kinds the service has no range table for still flow
/// through statistics and anomaly detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    /// Wire-format vital type name (e.g. "heartRate")
    #[serde(rename = "type")]
    pub vital_type: String,

    /// Measured value
    pub value: f64,

    /// Unit of measurement
    pub unit: String,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
}
