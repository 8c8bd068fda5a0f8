//! The draw settlement engine core

pub mod classifier;
pub mod normalizer;
pub mod orchestrator;
pub mod payout;

pub use classifier::{Classifier, Decision};
pub use normalizer::normalize_results;
pub use orchestrator::{SettlementEngine, SettlementReport, WagerFailure, WagerOutcome};
