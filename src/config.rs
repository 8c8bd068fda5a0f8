//! Engine configuration with validation and defaults

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// Rounding applied when the all-prizes divisor produces a fractional
/// minor unit. Whatever the operator picks is applied uniformly, in exactly
/// one place.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Truncate toward zero (house keeps the fraction)
    Truncate,
    /// Round half away from zero
    Nearest,
}

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rounding: RoundingPolicy,
    /// Capacity of the "draw settled" broadcast channel
    pub event_capacity: usize,
    /// Emit a debug event per classified wager
    pub log_decisions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingPolicy::Truncate,
            event_capacity: 256,
            log_decisions: true,
        }
    }
}

impl EngineConfig {
    /// Validate for logical consistency before wiring the engine
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(EngineError::Validation(
                "event_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
