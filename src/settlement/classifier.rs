//! Bet classifier
//!
//! Decides win/loss for one wager against one completed draw. Group-family
//! wagers match chosen animal groups against the winning group of each
//! checked tier; numeric-family wagers match numbers against values derived
//! from each checked tier's 4-digit result. Multi-selection modalities
//! require every selection to be covered by a distinct checked tier.

use tracing::debug;

use crate::errors::{EngineError, Result};
use crate::models::{BetKind, Draw, ModalityFamily, PrizeScope, TierResult, Wager};
use crate::numbers::{self, DOZEN_WIDTH};
use crate::store::traits::CatalogStore;

/// Classification outcome. `all_prizes` signals the payout calculator to
/// apply the 1/5 multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub won: bool,
    pub all_prizes: bool,
}

/// Classifies wagers against a draw, resolving animals and endings through
/// the catalog
pub struct Classifier<'a> {
    catalog: &'a dyn CatalogStore,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a dyn CatalogStore) -> Self {
        Self { catalog }
    }

    /// Decide one wager against one draw. Deterministic for a given
    /// (wager, draw, catalog) triple.
    pub async fn classify(&self, wager: &Wager, draw: &Draw) -> Result<Decision> {
        let all_prizes = wager.scope == PrizeScope::All;
        let won = match wager.kind.family() {
            ModalityFamily::Group => self.classify_groups(wager, draw).await?,
            ModalityFamily::Numeric => self.classify_numbers(wager, draw).await?,
            ModalityFamily::Passe => self.classify_passe(wager, draw).await?,
        };
        debug!(
            wager_id = %wager.id,
            kind = %wager.kind,
            scope = %wager.scope,
            won,
            "classified wager"
        );
        Ok(Decision { won, all_prizes })
    }

    async fn classify_groups(&self, wager: &Wager, draw: &Draw) -> Result<bool> {
        let selections = self.selection_groups(wager).await?;
        let mut tiers = Vec::with_capacity(wager.scope.tier_indexes().len());
        for &index in wager.scope.tier_indexes() {
            let group = self.tier_group(&draw.tiers[index]).await?;
            tiers.push(group.into_iter().collect::<Vec<_>>());
        }
        Ok(distinct_tier_match(&selections, &tiers))
    }

    async fn classify_numbers(&self, wager: &Wager, draw: &Draw) -> Result<bool> {
        let width = wager
            .kind
            .digit_width()
            .ok_or_else(|| EngineError::Consistency(format!("{} has no digit width", wager.kind)))?;
        let selections = selection_numbers(wager, width)?;
        let mut tiers = Vec::with_capacity(wager.scope.tier_indexes().len());
        for &index in wager.scope.tier_indexes() {
            tiers.push(self.tier_numbers(&draw.tiers[index], width).await?);
        }
        Ok(distinct_tier_match(&selections, &tiers))
    }

    /// Passe plays tiers 1-2 regardless of the premio selection: the first
    /// animal must take tier 1 and the second tier 2, in order for
    /// `passe_ida`, in either order for `passe_ida_volta`.
    async fn classify_passe(&self, wager: &Wager, draw: &Draw) -> Result<bool> {
        let selections = self.selection_groups(wager).await?;
        let first = self.tier_group(&draw.tiers[0]).await?;
        let second = self.tier_group(&draw.tiers[1]).await?;

        let ida = first == Some(selections[0]) && second == Some(selections[1]);
        match wager.kind {
            BetKind::PasseIda => Ok(ida),
            BetKind::PasseIdaVolta => {
                let volta = first == Some(selections[1]) && second == Some(selections[0]);
                Ok(ida || volta)
            }
            other => Err(EngineError::Consistency(format!(
                "{} is not a passe modality",
                other
            ))),
        }
    }

    /// Resolve a wager's animal selections to groups, validating shape
    async fn selection_groups(&self, wager: &Wager) -> Result<Vec<u8>> {
        let expected = wager.kind.selection_count();
        if wager.animal_ids.len() != expected || !wager.bet_numbers.is_empty() {
            return Err(EngineError::Consistency(format!(
                "wager {} must carry exactly {} animal selections for {}",
                wager.id, expected, wager.kind
            )));
        }
        let mut groups = Vec::with_capacity(expected);
        for &animal_id in &wager.animal_ids {
            let animal = self.catalog.animal(animal_id).await?.ok_or_else(|| {
                EngineError::Consistency(format!(
                    "wager {} references unknown animal {}",
                    wager.id, animal_id
                ))
            })?;
            groups.push(animal.group);
        }
        Ok(groups)
    }

    /// The winning group of a tier: from its result animal, or derived from
    /// its result number through the unique ending -> group mapping.
    async fn tier_group(&self, tier: &TierResult) -> Result<Option<u8>> {
        if let Some(animal_id) = tier.animal_id {
            let animal = self.catalog.animal(animal_id).await?.ok_or_else(|| {
                EngineError::Consistency(format!("draw references unknown animal {}", animal_id))
            })?;
            return Ok(Some(animal.group));
        }
        if let Some(number) = &tier.number {
            let ending = numbers::suffix(number, DOZEN_WIDTH);
            return Ok(self
                .catalog
                .animal_by_ending(ending)
                .await?
                .map(|animal| animal.group));
        }
        Ok(None)
    }

    /// Candidate numbers a tier offers at the given width. An explicit
    /// result number yields its suffix; a tier known only by its animal can
    /// decide 2-digit comparisons through the animal's endings, never 3 or
    /// 4 digits.
    async fn tier_numbers(&self, tier: &TierResult, width: usize) -> Result<Vec<String>> {
        if let Some(number) = &tier.number {
            return Ok(vec![numbers::suffix(number, width).to_string()]);
        }
        if width == DOZEN_WIDTH {
            if let Some(animal_id) = tier.animal_id {
                let animal = self.catalog.animal(animal_id).await?.ok_or_else(|| {
                    EngineError::Consistency(format!(
                        "draw references unknown animal {}",
                        animal_id
                    ))
                })?;
                return Ok(animal.endings.to_vec());
            }
        }
        Ok(Vec::new())
    }
}

/// Canonicalize a wager's numeric selections, validating shape
fn selection_numbers(wager: &Wager, width: usize) -> Result<Vec<String>> {
    let expected = wager.kind.selection_count();
    if wager.bet_numbers.len() != expected || !wager.animal_ids.is_empty() {
        return Err(EngineError::Consistency(format!(
            "wager {} must carry exactly {} numbers for {}",
            wager.id, expected, wager.kind
        )));
    }
    wager
        .bet_numbers
        .iter()
        .map(|raw| {
            numbers::canonicalize(raw, width).ok_or_else(|| {
                EngineError::Consistency(format!(
                    "wager {} carries invalid {}-digit number {:?}",
                    wager.id, width, raw
                ))
            })
        })
        .collect()
}

/// True iff every selection can be covered by a distinct checked tier.
/// Tiers offer candidate sets (an explicit suffix, or an animal's four
/// endings), so coverage is a small backtracking assignment; inputs are at
/// most five selections against five tiers.
fn distinct_tier_match<T: PartialEq>(selections: &[T], tiers: &[Vec<T>]) -> bool {
    fn assign<T: PartialEq>(selections: &[T], tiers: &[Vec<T>], used: &mut [bool]) -> bool {
        let Some(selection) = selections.first() else {
            return true;
        };
        for (i, candidates) in tiers.iter().enumerate() {
            if !used[i] && candidates.iter().any(|c| c == selection) {
                used[i] = true;
                if assign(&selections[1..], tiers, used) {
                    return true;
                }
                used[i] = false;
            }
        }
        false
    }

    if selections.is_empty() || selections.len() > tiers.len() {
        return false;
    }
    let mut used = vec![false; tiers.len()];
    assign(selections, tiers, &mut used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Animal, Draw, GameMode, TierResult};
    use crate::store::memory::MemoryCatalog;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn draw_with(tiers: Vec<TierResult>) -> Draw {
        let mut draw = Draw::new(
            "PTM",
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        );
        for (i, tier) in tiers.into_iter().enumerate() {
            draw.tiers[i] = tier;
        }
        draw.status = crate::models::DrawStatus::Completed;
        draw
    }

    fn tier(animal_id: Option<Uuid>, number: Option<&str>) -> TierResult {
        TierResult {
            animal_id,
            number: number.map(|n| n.to_string()),
        }
    }

    async fn animal(catalog: &MemoryCatalog, group: u8) -> Animal {
        catalog.animal_by_group(group).await.unwrap().unwrap()
    }

    fn group_wager(
        kind: BetKind,
        scope: PrizeScope,
        animal_ids: Vec<Uuid>,
    ) -> Wager {
        let mode = GameMode::new(kind.to_string(), 18);
        Wager::on_animals(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &mode,
            kind,
            scope,
            animal_ids,
            100,
        )
    }

    fn number_wager(kind: BetKind, scope: PrizeScope, bet_numbers: Vec<&str>) -> Wager {
        let mode = GameMode::new(kind.to_string(), 600);
        Wager::on_numbers(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &mode,
            kind,
            scope,
            bet_numbers.into_iter().map(|n| n.to_string()).collect(),
            100,
        )
    }

    #[tokio::test]
    async fn test_single_group_first_tier() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        let hit = group_wager(BetKind::Group, PrizeScope::First, vec![avestruz.id]);
        assert!(classifier.classify(&hit, &draw).await.unwrap().won);

        let miss = group_wager(BetKind::Group, PrizeScope::First, vec![aguia.id]);
        assert!(!classifier.classify(&miss, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_group_only_checks_selected_tier() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let draw = draw_with(vec![
            tier(Some(aguia.id), Some("0205")),
            tier(Some(avestruz.id), Some("1703")),
        ]);
        let classifier = Classifier::new(&catalog);

        // Avestruz won tier 2, but the wager only plays tier 1
        let wager = group_wager(BetKind::Group, PrizeScope::First, vec![avestruz.id]);
        assert!(!classifier.classify(&wager, &draw).await.unwrap().won);

        let second = group_wager(BetKind::Group, PrizeScope::Second, vec![avestruz.id]);
        assert!(classifier.classify(&second, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_all_prizes_scope_matches_any_tier() {
        let catalog = MemoryCatalog::seeded();
        let cobra = animal(&catalog, 9).await;
        let aguia = animal(&catalog, 2).await;
        let draw = draw_with(vec![
            tier(Some(aguia.id), Some("0205")),
            tier(None, None),
            tier(Some(cobra.id), Some("3433")),
        ]);
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(BetKind::Group, PrizeScope::All, vec![cobra.id]);
        let decision = classifier.classify(&wager, &draw).await.unwrap();
        assert!(decision.won);
        assert!(decision.all_prizes);
    }

    // A two-animal wager needs two distinct winning tiers. Requiring both
    // animals to take the same single tier could never pay out, since one
    // tier has one winning group.
    #[tokio::test]
    async fn test_duque_grupo_needs_two_distinct_tiers() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let burro = animal(&catalog, 3).await;
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(
            BetKind::DuqueGrupo,
            PrizeScope::All,
            vec![avestruz.id, aguia.id],
        );

        let both_present = draw_with(vec![
            tier(Some(aguia.id), None),
            tier(Some(burro.id), None),
            tier(Some(avestruz.id), None),
        ]);
        assert!(classifier.classify(&wager, &both_present).await.unwrap().won);

        let only_one = draw_with(vec![
            tier(Some(avestruz.id), None),
            tier(Some(burro.id), None),
        ]);
        assert!(!classifier.classify(&wager, &only_one).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_duque_grupo_on_single_tier_scope_cannot_pay() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let classifier = Classifier::new(&catalog);

        // Two selections against one checked tier: coverage is impossible
        let wager = group_wager(
            BetKind::DuqueGrupo,
            PrizeScope::First,
            vec![avestruz.id, aguia.id],
        );
        let draw = draw_with(vec![tier(Some(avestruz.id), None)]);
        assert!(!classifier.classify(&wager, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_quina_grupo_covers_all_five_tiers() {
        let catalog = MemoryCatalog::seeded();
        let mut ids = Vec::new();
        let mut tiers = Vec::new();
        for group in 1..=5 {
            let a = animal(&catalog, group).await;
            ids.push(a.id);
            tiers.push(tier(Some(a.id), None));
        }
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(BetKind::QuinaGrupo, PrizeScope::All, ids.clone());
        let draw = draw_with(tiers.clone());
        assert!(classifier.classify(&wager, &draw).await.unwrap().won);

        // Swap tier 5 to a repeat of tier 1's group: only four distinct
        // groups remain, so the quina misses
        let repeat = animal(&catalog, 1).await;
        tiers[4] = tier(Some(repeat.id), None);
        let draw = draw_with(tiers);
        assert!(!classifier.classify(&wager, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_repeated_result_group_covers_repeated_need() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let classifier = Classifier::new(&catalog);

        // Two tiers both won by Aguia: a duque on (Avestruz, Aguia) still
        // needs Avestruz somewhere
        let draw = draw_with(vec![
            tier(Some(aguia.id), None),
            tier(Some(aguia.id), None),
        ]);
        let wager = group_wager(
            BetKind::DuqueGrupo,
            PrizeScope::All,
            vec![avestruz.id, aguia.id],
        );
        assert!(!classifier.classify(&wager, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_thousand_exact_match() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        let hit = number_wager(BetKind::Thousand, PrizeScope::First, vec!["0102"]);
        assert!(classifier.classify(&hit, &draw).await.unwrap().won);

        let miss = number_wager(BetKind::Thousand, PrizeScope::First, vec!["0103"]);
        assert!(!classifier.classify(&miss, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_dozen_and_hundred_derive_from_suffix() {
        let catalog = MemoryCatalog::seeded();
        let draw = draw_with(vec![tier(None, Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        let dozen = number_wager(BetKind::Dozen, PrizeScope::First, vec!["02"]);
        assert!(classifier.classify(&dozen, &draw).await.unwrap().won);

        let hundred = number_wager(BetKind::Hundred, PrizeScope::First, vec!["102"]);
        assert!(classifier.classify(&hundred, &draw).await.unwrap().won);

        let wrong_hundred = number_wager(BetKind::Hundred, PrizeScope::First, vec!["101"]);
        assert!(!classifier.classify(&wrong_hundred, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_bet_numbers_are_canonicalized_before_matching() {
        let catalog = MemoryCatalog::seeded();
        let draw = draw_with(vec![tier(None, Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        // "2" pads to "02"
        let dozen = number_wager(BetKind::Dozen, PrizeScope::First, vec!["2"]);
        assert!(classifier.classify(&dozen, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_dozen_falls_back_to_animal_endings() {
        let catalog = MemoryCatalog::seeded();
        let cachorro = animal(&catalog, 5).await; // endings 17-20
        let draw = draw_with(vec![tier(Some(cachorro.id), None)]);
        let classifier = Classifier::new(&catalog);

        let hit = number_wager(BetKind::Dozen, PrizeScope::First, vec!["18"]);
        assert!(classifier.classify(&hit, &draw).await.unwrap().won);

        let miss = number_wager(BetKind::Dozen, PrizeScope::First, vec!["21"]);
        assert!(!classifier.classify(&miss, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_hundred_and_thousand_never_pay_from_endings_alone() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await; // endings 01-04
        let draw = draw_with(vec![tier(Some(avestruz.id), None)]);
        let classifier = Classifier::new(&catalog);

        let hundred = number_wager(BetKind::Hundred, PrizeScope::First, vec!["002"]);
        assert!(!classifier.classify(&hundred, &draw).await.unwrap().won);

        let thousand = number_wager(BetKind::Thousand, PrizeScope::First, vec!["0002"]);
        assert!(!classifier.classify(&thousand, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_terno_dezena_distinct_tier_coverage() {
        let catalog = MemoryCatalog::seeded();
        let classifier = Classifier::new(&catalog);

        let wager = number_wager(
            BetKind::TernoDezena,
            PrizeScope::All,
            vec!["11", "22", "33"],
        );

        let spread = draw_with(vec![
            tier(None, Some("1011")),
            tier(None, Some("0022")),
            tier(None, Some("9933")),
        ]);
        assert!(classifier.classify(&wager, &spread).await.unwrap().won);

        // Only two of the three dozens present
        let partial = draw_with(vec![
            tier(None, Some("1011")),
            tier(None, Some("0022")),
            tier(None, Some("0022")),
        ]);
        assert!(!classifier.classify(&wager, &partial).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_duque_dezena_fallback_tier_covers_one_selection_only() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await; // endings 01, 02, 03, 04
        let classifier = Classifier::new(&catalog);

        // Both bet dozens are endings of the same tier-1 animal; a single
        // tier cannot cover both selections
        let wager = number_wager(BetKind::DuqueDezena, PrizeScope::All, vec!["01", "02"]);
        let one_tier = draw_with(vec![tier(Some(avestruz.id), None)]);
        assert!(!classifier.classify(&wager, &one_tier).await.unwrap().won);

        let two_tiers = draw_with(vec![
            tier(Some(avestruz.id), None),
            tier(None, Some("7702")),
        ]);
        assert!(classifier.classify(&wager, &two_tiers).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_scope_on_unfilled_tier_loses() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(BetKind::Group, PrizeScope::Third, vec![avestruz.id]);
        assert!(!classifier.classify(&wager, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_group_derived_from_number_only_tier() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        // Tier 2 has a number but no animal; ending "03" belongs to group 1
        let draw = draw_with(vec![
            tier(None, Some("8845")),
            tier(None, Some("1703")),
        ]);
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(BetKind::Group, PrizeScope::Second, vec![avestruz.id]);
        assert!(classifier.classify(&wager, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_passe_ida_is_ordered() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let classifier = Classifier::new(&catalog);

        let draw = draw_with(vec![
            tier(Some(avestruz.id), None),
            tier(Some(aguia.id), None),
        ]);

        let ordered = group_wager(
            BetKind::PasseIda,
            PrizeScope::First,
            vec![avestruz.id, aguia.id],
        );
        assert!(classifier.classify(&ordered, &draw).await.unwrap().won);

        let reversed = group_wager(
            BetKind::PasseIda,
            PrizeScope::First,
            vec![aguia.id, avestruz.id],
        );
        assert!(!classifier.classify(&reversed, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_passe_ida_volta_accepts_either_order() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let aguia = animal(&catalog, 2).await;
        let burro = animal(&catalog, 3).await;
        let classifier = Classifier::new(&catalog);

        let draw = draw_with(vec![
            tier(Some(avestruz.id), None),
            tier(Some(aguia.id), None),
        ]);

        let reversed = group_wager(
            BetKind::PasseIdaVolta,
            PrizeScope::First,
            vec![aguia.id, avestruz.id],
        );
        assert!(classifier.classify(&reversed, &draw).await.unwrap().won);

        let miss = group_wager(
            BetKind::PasseIdaVolta,
            PrizeScope::First,
            vec![aguia.id, burro.id],
        );
        assert!(!classifier.classify(&miss, &draw).await.unwrap().won);
    }

    #[tokio::test]
    async fn test_unknown_selection_animal_is_consistency_error() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), None)]);
        let classifier = Classifier::new(&catalog);

        let wager = group_wager(BetKind::Group, PrizeScope::First, vec![Uuid::new_v4()]);
        let err = classifier.classify(&wager, &draw).await.unwrap_err();
        assert!(matches!(err, EngineError::Consistency(_)));
    }

    #[tokio::test]
    async fn test_malformed_selection_shape_is_consistency_error() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), Some("0102"))]);
        let classifier = Classifier::new(&catalog);

        // Duque carrying a single animal
        let wager = group_wager(BetKind::DuqueGrupo, PrizeScope::First, vec![avestruz.id]);
        assert!(matches!(
            classifier.classify(&wager, &draw).await.unwrap_err(),
            EngineError::Consistency(_)
        ));

        // Numeric wager carrying a non-numeric selection
        let bad = number_wager(BetKind::Dozen, PrizeScope::First, vec!["x2"]);
        assert!(matches!(
            classifier.classify(&bad, &draw).await.unwrap_err(),
            EngineError::Consistency(_)
        ));
    }

    #[tokio::test]
    async fn test_classification_is_deterministic() {
        let catalog = MemoryCatalog::seeded();
        let avestruz = animal(&catalog, 1).await;
        let draw = draw_with(vec![tier(Some(avestruz.id), Some("0102"))]);
        let classifier = Classifier::new(&catalog);
        let wager = group_wager(BetKind::Group, PrizeScope::All, vec![avestruz.id]);

        let first = classifier.classify(&wager, &draw).await.unwrap();
        let second = classifier.classify(&wager, &draw).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_tier_match_backtracks() {
        // Tier 1 offers both values; tier 2 offers only "a". A greedy
        // assignment of "a" to tier 1 would strand "b".
        let tiers = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["a".to_string()],
        ];
        let selections = vec!["a".to_string(), "b".to_string()];
        assert!(distinct_tier_match(&selections, &tiers));

        let impossible = vec!["b".to_string(), "b".to_string()];
        assert!(!distinct_tier_match(&impossible, &tiers));
    }
}
