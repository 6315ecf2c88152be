use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Patient attributes as fetched from the patient service.
///
/// Optional clinical fields never fail scoring; the condition models
/// substitute documented defaults instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Patient age in years
    pub age: i32,

    /// Patient gender ("male", "female" or "other")
    pub gender: String,

    /// Body mass index, if recorded
    #[serde(default)]
    pub bmi: Option<f64>,

    /// Diagnosed chronic conditions (free-text names, e.g. "hypertension")
    #[serde(default)]
    pub chronic_conditions: Vec<String>,

    /// Smoking status ("never smoked", "formerly smoked", "smokes")
    #[serde(default)]
    pub smoking_status: Option<String>,
}

impl PatientProfile {
    /// True when the named chronic condition appears in the history
    pub fn has_condition(&self, name: &str) -> bool {
        self.chronic_conditions.iter().any(|c| c == name)
    }
}

/// Features consumed by the cardiovascular model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CardiovascularFeatures {
    /// Age in years (default 50)
    pub age: i32,

    /// Patient gender (default "male")
    pub gender: String,

    /// Resting blood pressure in mmHg (default 120)
    pub resting_bp: f64,

    /// Serum cholesterol in mg/dL (default 200)
    pub cholesterol: f64,

    /// Fasting blood sugar above 120 mg/dL (default false)
    pub fasting_blood_sugar: bool,

    /// Maximum heart rate achieved (default 150)
    pub max_heart_rate: f64,

    /// Chest pain during exercise (default false)
    pub exercise_induced_angina: bool,
}

impl Default for CardiovascularFeatures {
    fn default() -> Self {
        Self {
            age: 50,
            gender: "male".to_string(),
            resting_bp: 120.0,
            cholesterol: 200.0,
            fasting_blood_sugar: false,
            max_heart_rate: 150.0,
            exercise_induced_angina: false,
        }
    }
}

/// Features consumed by the metabolic (diabetes) model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct MetabolicFeatures {
    /// Age in years (default 40)
    pub age: i32,

    /// Body mass index (default 25)
    pub bmi: f64,

    /// Fasting glucose level in mg/dL (default 100)
    pub glucose_level: f64,

    /// Diastolic blood pressure in mmHg (default 80)
    pub blood_pressure: f64,
}

impl Default for MetabolicFeatures {
    fn default() -> Self {
        Self {
            age: 40,
            bmi: 25.0,
            glucose_level: 100.0,
            blood_pressure: 80.0,
        }
    }
}

/// Features consumed by the cerebrovascular (stroke) model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CerebrovascularFeatures {
    /// Age in years (default 50)
    pub age: i32,

    /// Diagnosed hypertension (default false)
    pub hypertension: bool,

    /// Existing heart disease (default false)
    pub heart_disease: bool,

    /// Average glucose level in mg/dL (default 100)
    pub avg_glucose_level: f64,

    /// Body mass index (default 25)
    pub bmi: f64,

    /// Smoking status (default "never smoked")
    pub smoking_status: String,
}

impl Default for CerebrovascularFeatures {
    fn default() -> Self {
        Self {
            age: 50,
            hypertension: false,
            heart_disease: false,
            avg_glucose_level: 100.0,
            bmi: 25.0,
            smoking_status: "never smoked".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_defaults_fill_partial_input() {
        // A request carrying only age must still produce a total feature set
        let features: CardiovascularFeatures =
            serde_json::from_str(r#"{"age": 63}"#).unwrap();
        assert_eq!(features.age, 63);
        assert_eq!(features.resting_bp, 120.0);
        assert_eq!(features.cholesterol, 200.0);
        assert!(!features.exercise_induced_angina);
    }

    #[test]
    fn test_has_condition() {
        let profile = PatientProfile {
            age: 60,
            gender: "female".to_string(),
            bmi: Some(27.5),
            chronic_conditions: vec!["hypertension".to_string()],
            smoking_status: None,
        };
        assert!(profile.has_condition("hypertension"));
        assert!(!profile.has_condition("heart disease"));
    }
}
