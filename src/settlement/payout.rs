//! Payout calculator
//!
//! `payout = amount x odds x multiplier`, where the multiplier is 1/5 for
//! all-prizes wagers and 1 otherwise. The multiplier is applied here and
//! nowhere else; odds are the wager's placement-time snapshot. Arithmetic
//! widens to u128 and rejects results that do not fit the ledger's u64.

use crate::config::RoundingPolicy;
use crate::errors::{EngineError, Result};
use crate::settlement::classifier::Decision;
use crate::models::Wager;

/// All-prizes wagers pay a fifth of the straight payout
const ALL_PRIZES_DIVISOR: u128 = 5;

/// Payout for a winning decision, in currency minor units
pub fn compute(wager: &Wager, decision: &Decision, rounding: RoundingPolicy) -> Result<u64> {
    if !decision.won {
        return Ok(0);
    }
    let gross = wager.amount as u128 * wager.odds as u128;
    let paid = if decision.all_prizes {
        match rounding {
            RoundingPolicy::Truncate => gross / ALL_PRIZES_DIVISOR,
            RoundingPolicy::Nearest => (gross + ALL_PRIZES_DIVISOR / 2) / ALL_PRIZES_DIVISOR,
        }
    } else {
        gross
    };
    u64::try_from(paid).map_err(|_| {
        EngineError::Consistency(format!(
            "payout overflow for wager {}: {} x {}",
            wager.id, wager.amount, wager.odds
        ))
    })
}
