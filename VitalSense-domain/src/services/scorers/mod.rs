// Condition risk models.
//
// Each model is a deterministic weighted-rule scorer over a typed feature
// struct: threshold bands contribute fixed weights, the total is capped at
// 1.0 by truncation, and every contributing band emits a risk factor with a
// bounded linear impact. The shared `RiskThresholds` table (entities::risk)
// derives qualitative levels; models are composed, never subclassed.

pub mod cardiovascular;
pub mod cerebrovascular;
pub mod metabolic;

pub use cardiovascular::CardiovascularModel;
pub use cerebrovascular::CerebrovascularModel;
pub use metabolic::MetabolicModel;

use crate::entities::risk::ConditionAssessment;

/// A condition risk model: typed features in, assessment out.
///
/// Implementations hold no mutable state; prediction is pure and safe to
/// call concurrently.
pub trait RiskModel {
    /// The feature struct this model consumes
    type Features;

    /// Stable model identifier, used by the model registry
    fn name(&self) -> &'static str;

    /// Fixed model confidence in [0, 1]
    fn confidence(&self) -> f64;

    /// Score the features, producing a capped score, the fixed confidence
    /// and the itemized risk factors
    fn predict(&self, features: &Self::Features) -> ConditionAssessment;
}

/// Cap a weighted-rule total to [0, 1] by truncation.
///
/// Relative ordering above the cap is lost; inherited limitation, kept
/// deliberately.
pub(crate) fn cap_score(score: f64) -> f64 {
    score.min(1.0)
}
