//! Store seams consumed by the settlement engine
//!
//! These traits are the engine's only view of persistence. The catalog is
//! read-only; the bet store owns the pending -> processing claim that makes
//! per-wager settlement idempotent; the ledger owns atomic, idempotent
//! balance movement.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Animal, Draw, GameMode, Wager, WagerStatus};

/// Read-only lookup of animals and game modes
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn animal(&self, id: Uuid) -> Result<Option<Animal>>;

    async fn animal_by_group(&self, group: u8) -> Result<Option<Animal>>;

    /// Resolve the unique group owning a 2-digit ending
    async fn animal_by_ending(&self, ending: &str) -> Result<Option<Animal>>;

    async fn game_mode(&self, id: Uuid) -> Result<Option<GameMode>>;
}

/// Draw persistence
#[async_trait]
pub trait DrawStore: Send + Sync {
    async fn draw(&self, id: Uuid) -> Result<Option<Draw>>;

    async fn put_draw(&self, draw: &Draw) -> Result<()>;
}

/// Wager persistence with atomic claim semantics
#[async_trait]
pub trait BetStore: Send + Sync {
    async fn wager(&self, id: Uuid) -> Result<Option<Wager>>;

    async fn put_wager(&self, wager: &Wager) -> Result<()>;

    async fn wagers_by_draw(&self, draw_id: Uuid) -> Result<Vec<Wager>>;

    /// Atomically move a wager from `Pending` to `Processing`. Returns
    /// false if the wager is not claimable (terminal, or claimed by a
    /// concurrent run) so the caller skips it.
    async fn claim(&self, wager_id: Uuid) -> Result<bool>;

    /// Return a claimed wager to `Pending` after a per-wager failure
    async fn release(&self, wager_id: Uuid) -> Result<()>;

    /// Move a claimed wager to its terminal state
    async fn record_outcome(
        &self,
        wager_id: Uuid,
        status: WagerStatus,
        win_amount: Option<u64>,
    ) -> Result<()>;

    /// Correction path: atomically move a terminal `Won` wager back to
    /// `Pending`, clearing its payout. Returns the reversed amount, or
    /// None if the wager was not in the `Won` state.
    async fn reset_won_to_pending(&self, wager_id: Uuid) -> Result<Option<u64>>;
}

/// Atomic balance movement. Both operations are idempotent per `op_id`:
/// retrying with the same id must apply the movement at most once.
#[async_trait]
pub trait BalanceLedger: Send + Sync {
    async fn credit(&self, user_id: Uuid, amount: u64, op_id: &str) -> Result<()>;

    /// Reversal path used by the correction workflow
    async fn debit(&self, user_id: Uuid, amount: u64, op_id: &str) -> Result<()>;

    async fn balance(&self, user_id: Uuid) -> Result<u64>;
}
