//! bicho - draw settlement engine for an animal-lottery betting platform
//!
//! Users wager on an upcoming draw across several modalities (animal
//! groups, group combinations, 2/3/4-digit numbers); an operator later
//! publishes up to five prize results. This crate owns everything that
//! happens from that publication onward: normalizing the results,
//! classifying every outstanding wager, computing payouts, and moving
//! money onto winners' balances exactly once.
//!
//! The stores behind the engine (`store::traits`) are seams: production
//! deployments back them with their database of choice, tests use the
//! `DashMap` reference implementations in `store::memory`.

pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod numbers;
pub mod settlement;
pub mod store;

pub use config::{EngineConfig, RoundingPolicy};
pub use errors::{EngineError, Result};
pub use events::SettlementEvent;
pub use models::{
    Animal, BetKind, Draw, DrawStatus, GameMode, PrizeScope, PrizeSubmission, TierResult, Wager,
    WagerStatus, TIER_COUNT,
};
pub use settlement::{SettlementEngine, SettlementReport, WagerFailure, WagerOutcome};
