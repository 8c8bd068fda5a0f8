//! Result normalizer
//!
//! Validates an operator's prize submissions and canonicalizes them into a
//! completed draw. Nothing is written until every supplied field has been
//! checked, so a rejected submission leaves the draw untouched.

use tracing::info;
use uuid::Uuid;

use crate::errors::{EngineError, Result};
use crate::models::{Draw, DrawStatus, PrizeSubmission, TierResult, TIER_COUNT};
use crate::numbers::{self, THOUSAND_WIDTH};
use crate::store::traits::{CatalogStore, DrawStore};

/// Validate the submissions and write the draw as completed. Tier 1 must
/// carry both an animal and a number; tiers 2-5 may carry either, both, or
/// neither. Numbers are stored zero-padded to four digits.
pub async fn normalize_results(
    draws: &dyn DrawStore,
    catalog: &dyn CatalogStore,
    draw_id: Uuid,
    submissions: &[PrizeSubmission; TIER_COUNT],
) -> Result<Draw> {
    let mut draw = draws
        .draw(draw_id)
        .await?
        .ok_or_else(|| EngineError::not_found("draw", draw_id))?;

    let first = &submissions[0];
    if first.animal_id.is_none() || first.number.is_none() {
        return Err(EngineError::Validation(
            "tier 1 requires both a winning animal and a result number".to_string(),
        ));
    }

    let mut tiers: [TierResult; TIER_COUNT] = Default::default();
    for (index, submission) in submissions.iter().enumerate() {
        if let Some(animal_id) = submission.animal_id {
            if catalog.animal(animal_id).await?.is_none() {
                return Err(EngineError::not_found("animal", animal_id));
            }
        }
        let number = match &submission.number {
            Some(raw) => Some(numbers::canonicalize(raw, THOUSAND_WIDTH).ok_or_else(|| {
                EngineError::Validation(format!(
                    "tier {} number {:?} is not a 1-4 digit value",
                    index + 1,
                    raw
                ))
            })?),
            None => None,
        };
        tiers[index] = TierResult {
            animal_id: submission.animal_id,
            number,
        };
    }

    // Rewriting a completed draw's results would strand payouts already
    // applied; that path goes through the correction workflow, which
    // reopens the draw first. An identical re-submission is a retry.
    if draw.status == DrawStatus::Completed && draw.tiers != tiers {
        return Err(EngineError::Validation(format!(
            "draw {} is already completed with different results; corrections must be explicit",
            draw_id
        )));
    }

    draw.tiers = tiers;
    draw.status = DrawStatus::Completed;
    draws.put_draw(&draw).await?;

    let filled = draw.tiers.iter().filter(|t| !t.is_empty()).count();
    info!(draw_id = %draw.id, tiers = filled, "draw results normalized");
    Ok(draw)
}
