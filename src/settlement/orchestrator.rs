//! Settlement orchestrator
//!
//! Drives a full settlement run: normalize the operator's results, claim
//! each pending wager, classify it, pay winners, and report what happened.
//! Runs are serialized per draw; each wager is an independent unit of work,
//! so one failing wager never corrupts the others.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::{EngineError, Result};
use crate::events::{EventBus, SettlementEvent};
use crate::models::{Draw, DrawStatus, PrizeSubmission, TierResult, Wager, WagerStatus, TIER_COUNT};
use crate::settlement::classifier::Classifier;
use crate::settlement::normalizer::normalize_results;
use crate::settlement::payout;
use crate::store::traits::{BalanceLedger, BetStore, CatalogStore, DrawStore};

/// Terminal outcome of one wager within a settlement run
#[derive(Debug, Clone, Serialize)]
pub struct WagerOutcome {
    pub wager_id: Uuid,
    pub user_id: Uuid,
    pub status: WagerStatus,
    /// Minor units; zero on a loss
    pub payout: u64,
}

/// A wager the run could not settle. Retryable failures clear on a
/// re-invocation; the rest are parked pending for manual review.
#[derive(Debug, Clone, Serialize)]
pub struct WagerFailure {
    pub wager_id: Uuid,
    pub reason: String,
    pub retryable: bool,
}

/// What a settlement run did
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    pub draw: Draw,
    pub outcomes: Vec<WagerOutcome>,
    pub failures: Vec<WagerFailure>,
}

impl SettlementReport {
    pub fn winners(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == WagerStatus::Won)
            .count()
    }

    /// Sum of payouts credited in this run
    pub fn total_paid(&self) -> u64 {
        self.outcomes.iter().map(|o| o.payout).sum()
    }
}

/// Releases the per-draw settlement slot on drop
struct DrawGuard<'a> {
    slots: &'a DashMap<Uuid, ()>,
    draw_id: Uuid,
}

impl<'a> DrawGuard<'a> {
    fn acquire(slots: &'a DashMap<Uuid, ()>, draw_id: Uuid) -> Result<Self> {
        match slots.entry(draw_id) {
            Entry::Occupied(_) => Err(EngineError::ConcurrencyConflict(draw_id)),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(Self { slots, draw_id })
            }
        }
    }
}

impl Drop for DrawGuard<'_> {
    fn drop(&mut self) {
        self.slots.remove(&self.draw_id);
    }
}

/// The settlement engine. One instance serves all draws; overlapping runs
/// for the same draw are rejected with a retryable conflict.
pub struct SettlementEngine {
    catalog: Arc<dyn CatalogStore>,
    draws: Arc<dyn DrawStore>,
    bets: Arc<dyn BetStore>,
    ledger: Arc<dyn BalanceLedger>,
    config: EngineConfig,
    events: EventBus,
    in_flight: DashMap<Uuid, ()>,
}

impl SettlementEngine {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        draws: Arc<dyn DrawStore>,
        bets: Arc<dyn BetStore>,
        ledger: Arc<dyn BalanceLedger>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let events = EventBus::new(config.event_capacity);
        Ok(Self {
            catalog,
            draws,
            bets,
            ledger,
            config,
            events,
            in_flight: DashMap::new(),
        })
    }

    /// Listen for "draw settled" events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SettlementEvent> {
        self.events.subscribe()
    }

    /// Publish results for a draw and settle every outstanding wager on it.
    /// Validation happens before any wager is touched. Re-invoking on an
    /// already-settled draw is a no-op beyond the skipped claims.
    pub async fn settle_draw(
        &self,
        draw_id: Uuid,
        submissions: &[PrizeSubmission; TIER_COUNT],
    ) -> Result<SettlementReport> {
        let _guard = DrawGuard::acquire(&self.in_flight, draw_id)?;
        let draw = normalize_results(
            self.draws.as_ref(),
            self.catalog.as_ref(),
            draw_id,
            submissions,
        )
        .await?;
        self.run(draw, false).await
    }

    /// Correct a completed draw's results: reverse every payout applied by
    /// the previous run, reopen the draw under a new revision, then settle
    /// against the corrected results.
    pub async fn correct_draw(
        &self,
        draw_id: Uuid,
        submissions: &[PrizeSubmission; TIER_COUNT],
    ) -> Result<SettlementReport> {
        let _guard = DrawGuard::acquire(&self.in_flight, draw_id)?;
        let mut draw = self
            .draws
            .draw(draw_id)
            .await?
            .ok_or_else(|| EngineError::not_found("draw", draw_id))?;
        if draw.status != DrawStatus::Completed {
            return Err(EngineError::Validation(format!(
                "draw {} is not completed; nothing to correct",
                draw_id
            )));
        }

        let reversed = self.reverse_payouts(&draw).await?;
        info!(draw_id = %draw_id, reversed, "previous payouts reversed for correction");

        draw.status = DrawStatus::Pending;
        draw.revision += 1;
        draw.tiers = <[TierResult; TIER_COUNT]>::default();
        self.draws.put_draw(&draw).await?;

        let draw = normalize_results(
            self.draws.as_ref(),
            self.catalog.as_ref(),
            draw_id,
            submissions,
        )
        .await?;
        self.run(draw, true).await
    }

    /// Debit every previously-won wager and reset it to pending. Debits are
    /// idempotent per (wager, revision), so a correction interrupted midway
    /// can simply be re-invoked.
    async fn reverse_payouts(&self, draw: &Draw) -> Result<usize> {
        let mut reversed = 0;
        for wager in self.bets.wagers_by_draw(draw.id).await? {
            if wager.status != WagerStatus::Won {
                continue;
            }
            let amount = wager.win_amount.ok_or_else(|| {
                EngineError::Consistency(format!(
                    "wager {} is won but carries no win amount",
                    wager.id
                ))
            })?;
            let op_id = format!("reverse:{}:r{}", wager.id, draw.revision);
            self.ledger.debit(wager.user_id, amount, &op_id).await?;
            self.bets.reset_won_to_pending(wager.id).await?;
            reversed += 1;
        }
        Ok(reversed)
    }

    async fn run(&self, draw: Draw, correction: bool) -> Result<SettlementReport> {
        let wagers = self.bets.wagers_by_draw(draw.id).await?;
        let total = wagers.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for wager in wagers {
            if wager.is_terminal() {
                continue;
            }
            if wager.status == WagerStatus::Processing {
                // A previous run died holding the claim; the operator must
                // release it before this wager can settle.
                failures.push(WagerFailure {
                    wager_id: wager.id,
                    reason: "wager is claimed by an interrupted run".to_string(),
                    retryable: true,
                });
                continue;
            }
            match self.bets.claim(wager.id).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    failures.push(WagerFailure {
                        wager_id: wager.id,
                        reason: err.to_string(),
                        retryable: err.is_retryable(),
                    });
                    continue;
                }
            }
            match self.settle_one(&wager, &draw).await {
                Ok(outcome) => {
                    if self.config.log_decisions {
                        debug!(
                            wager_id = %outcome.wager_id,
                            status = ?outcome.status,
                            payout = outcome.payout,
                            "wager settled"
                        );
                    }
                    outcomes.push(outcome);
                }
                Err(failure) => failures.push(failure),
            }
        }

        let report = SettlementReport {
            draw,
            outcomes,
            failures,
        };
        info!(
            draw_id = %report.draw.id,
            correction,
            wagers = total,
            settled = report.outcomes.len(),
            winners = report.winners(),
            total_paid = report.total_paid(),
            failures = report.failures.len(),
            "settlement run finished"
        );
        self.events.publish(SettlementEvent {
            draw_id: report.draw.id,
            correction,
            settled: report.outcomes.len(),
            winners: report.winners(),
            total_paid: report.total_paid(),
            failures: report.failures.len(),
        });
        Ok(report)
    }

    /// One wager's unit of work. The wager is already claimed; every exit
    /// path either records a terminal state or releases the claim.
    async fn settle_one(
        &self,
        wager: &Wager,
        draw: &Draw,
    ) -> std::result::Result<WagerOutcome, WagerFailure> {
        match self.catalog.game_mode(wager.game_mode_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let reason = format!(
                    "wager {} references unknown game mode {}",
                    wager.id, wager.game_mode_id
                );
                return Err(self.park(wager, EngineError::Consistency(reason)).await);
            }
            Err(err) => return Err(self.park(wager, err).await),
        }

        let decision = match Classifier::new(self.catalog.as_ref())
            .classify(wager, draw)
            .await
        {
            Ok(decision) => decision,
            Err(err) => return Err(self.park(wager, err).await),
        };

        if !decision.won {
            return match self
                .bets
                .record_outcome(wager.id, WagerStatus::Lost, None)
                .await
            {
                Ok(()) => Ok(WagerOutcome {
                    wager_id: wager.id,
                    user_id: wager.user_id,
                    status: WagerStatus::Lost,
                    payout: 0,
                }),
                Err(err) => Err(self.park(wager, err).await),
            };
        }

        let paid = match payout::compute(wager, &decision, self.config.rounding) {
            Ok(paid) => paid,
            Err(err) => return Err(self.park(wager, err).await),
        };

        // Credit before the wager write. The operation id is stable across
        // retries, so a run that dies between the two converges on
        // re-invocation instead of paying twice.
        let op_id = format!("settle:{}:r{}", wager.id, draw.revision);
        if let Err(err) = self.ledger.credit(wager.user_id, paid, &op_id).await {
            return Err(self.park(wager, err).await);
        }
        if let Err(err) = self
            .bets
            .record_outcome(wager.id, WagerStatus::Won, Some(paid))
            .await
        {
            return Err(self.park(wager, err).await);
        }

        Ok(WagerOutcome {
            wager_id: wager.id,
            user_id: wager.user_id,
            status: WagerStatus::Won,
            payout: paid,
        })
    }

    /// Return a claimed wager to pending and turn the error into a
    /// per-wager failure record
    async fn park(&self, wager: &Wager, err: EngineError) -> WagerFailure {
        if let Err(release_err) = self.bets.release(wager.id).await {
            error!(
                wager_id = %wager.id,
                error = %release_err,
                "failed to release claim; wager needs manual release"
            );
        }
        let retryable = err.is_retryable();
        if retryable {
            warn!(wager_id = %wager.id, error = %err, "wager settlement failed; retryable");
        } else {
            warn!(wager_id = %wager.id, error = %err, "wager parked for manual review");
        }
        WagerFailure {
            wager_id: wager.id,
            reason: err.to_string(),
            retryable,
        }
    }
}
