//! Settlement event fan-out
//!
//! Downstream layers (cache invalidation, user-facing balance views) only
//! need to know that a draw finished settling and how big the run was. The
//! engine publishes over a broadcast channel; delivery to slow or absent
//! subscribers is best-effort.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Emitted once per completed settlement or correction run
#[derive(Debug, Clone, Serialize)]
pub struct SettlementEvent {
    pub draw_id: Uuid,
    /// True when the run was a correction re-settlement
    pub correction: bool,
    /// Wagers moved to a terminal state in this run
    pub settled: usize,
    pub winners: usize,
    /// Sum of payouts credited in this run, minor units
    pub total_paid: u64,
    /// Wagers that failed and await operator retry
    pub failures: usize,
}

/// Broadcast hub for settlement events
pub struct EventBus {
    sender: broadcast::Sender<SettlementEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettlementEvent> {
        self.sender.subscribe()
    }

    /// Publish to whoever is listening; no subscribers is not an error
    pub fn publish(&self, event: SettlementEvent) {
        let _ = self.sender.send(event);
    }
}
