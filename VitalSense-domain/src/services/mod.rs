// Analytical services.
//
// Leaves first: statistics and trend estimation are pure numeric modules,
// anomaly detection builds on statistics, the vitals assessor and the
// aggregator compose them into caller-facing results.
pub mod aggregator;
pub mod analyzer;
pub mod anomaly;
pub mod scorers;
pub mod statistics;
pub mod trend;
pub mod vitals_risk;

pub use aggregator::RiskAggregator;
pub use scorers::{CardiovascularModel, CerebrovascularModel, MetabolicModel, RiskModel};
