// Domain entities and value objects
pub mod patient;
pub mod risk;
pub mod trend;
pub mod vitals;

// Re-export common types for easier imports
pub use patient::{
    CardiovascularFeatures, CerebrovascularFeatures, MetabolicFeatures, PatientProfile,
};
pub use risk::{
    ComprehensiveAssessment, ConditionAssessment, Recommendation, RecommendationPriority,
    RiskFactor, RiskLevel, RiskThresholds,
};
pub use trend::{
    Anomaly, AnomalySeverity, ForecastPoint, MultivariateAnomaly, SeriesStatistics,
    SuddenChange, TrendAnalysis, TrendDirection, VitalRiskAssessment, VitalRiskLevel,
};
pub use vitals::{NormalRange, VitalReading, VitalType};
