pub mod anomalies;
pub mod health;
pub mod models;
pub mod predictions;

// Re-export handlers for easier imports
pub use anomalies::{detect_multivariate, detect_sudden_changes};
pub use health::{health_check, liveness_check, readiness_check};
pub use models::list_models;
pub use predictions::{
    analyze_vitals_trend, predict_cardiovascular, predict_cerebrovascular,
    predict_comprehensive, predict_metabolic,
};
