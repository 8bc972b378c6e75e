// Scoring engine: derived per-player metrics and the eligibility predicate.

pub mod eligibility;
pub mod metrics;
