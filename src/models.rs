//! Domain records shared across the engine and its store seams

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::numbers;

/// Prize tiers per draw
pub const TIER_COUNT: usize = 5;

/// One of the 25 catalog animals. Each animal owns a group and the four
/// 2-digit endings derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Animal {
    pub id: Uuid,
    /// Group number, 1-25, unique per animal
    pub group: u8,
    pub name: String,
    /// Exactly four 2-digit endings; group 25 includes "00"
    pub endings: [String; 4],
}

impl Animal {
    pub fn new(group: u8, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            name: name.into(),
            endings: numbers::endings_for_group(group),
        }
    }
}

/// A betting modality with its odds multiplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameMode {
    pub id: Uuid,
    pub name: String,
    /// Per-unit payout multiplier applied to the wager amount
    pub odds: u32,
    pub active: bool,
}

impl GameMode {
    pub fn new(name: impl Into<String>, odds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            odds,
            active: true,
        }
    }
}

/// Draw lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrawStatus {
    Pending,
    Completed,
}

/// Result slot for one prize tier. Either field may be absent on tiers 2-5;
/// tier 1 always carries both once the draw completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierResult {
    pub animal_id: Option<Uuid>,
    /// Canonical 4-digit, zero-padded
    pub number: Option<String>,
}

impl TierResult {
    pub fn is_empty(&self) -> bool {
        self.animal_id.is_none() && self.number.is_none()
    }
}

/// A scheduled lottery event with up to five prize tiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draw {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: DrawStatus,
    /// Bumped by the correction workflow; scopes ledger operation ids
    #[serde(default)]
    pub revision: u32,
    pub tiers: [TierResult; TIER_COUNT],
}

impl Draw {
    pub fn new(name: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            time,
            status: DrawStatus::Pending,
            revision: 0,
            tiers: Default::default(),
        }
    }
}

/// Bet modality
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    Group,
    DuqueGrupo,
    TernoGrupo,
    QuadraDuque,
    QuinaGrupo,
    Dozen,
    DuqueDezena,
    TernoDezena,
    Hundred,
    Thousand,
    PasseIda,
    PasseIdaVolta,
}

/// How a modality's selections are matched against a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalityFamily {
    /// Selections are animal groups
    Group,
    /// Selections are numbers compared at a fixed digit width
    Numeric,
    /// Two groups matched against tiers 1-2 specifically
    Passe,
}

impl BetKind {
    pub fn family(&self) -> ModalityFamily {
        match self {
            BetKind::Group
            | BetKind::DuqueGrupo
            | BetKind::TernoGrupo
            | BetKind::QuadraDuque
            | BetKind::QuinaGrupo => ModalityFamily::Group,
            BetKind::Dozen
            | BetKind::DuqueDezena
            | BetKind::TernoDezena
            | BetKind::Hundred
            | BetKind::Thousand => ModalityFamily::Numeric,
            BetKind::PasseIda | BetKind::PasseIdaVolta => ModalityFamily::Passe,
        }
    }

    /// How many animals or numbers a wager of this kind must carry
    pub fn selection_count(&self) -> usize {
        match self {
            BetKind::Group | BetKind::Dozen | BetKind::Hundred | BetKind::Thousand => 1,
            BetKind::DuqueGrupo
            | BetKind::DuqueDezena
            | BetKind::PasseIda
            | BetKind::PasseIdaVolta => 2,
            BetKind::TernoGrupo | BetKind::TernoDezena => 3,
            BetKind::QuadraDuque => 4,
            BetKind::QuinaGrupo => 5,
        }
    }

    /// Comparison width for numeric modalities
    pub fn digit_width(&self) -> Option<usize> {
        match self {
            BetKind::Dozen | BetKind::DuqueDezena | BetKind::TernoDezena => Some(2),
            BetKind::Hundred => Some(3),
            BetKind::Thousand => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BetKind::Group => "group",
            BetKind::DuqueGrupo => "duque_grupo",
            BetKind::TernoGrupo => "terno_grupo",
            BetKind::QuadraDuque => "quadra_duque",
            BetKind::QuinaGrupo => "quina_grupo",
            BetKind::Dozen => "dozen",
            BetKind::DuqueDezena => "duque_dezena",
            BetKind::TernoDezena => "terno_dezena",
            BetKind::Hundred => "hundred",
            BetKind::Thousand => "thousand",
            BetKind::PasseIda => "passe_ida",
            BetKind::PasseIdaVolta => "passe_ida_volta",
        };
        write!(f, "{}", name)
    }
}

/// Which prize tiers a wager plays against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PrizeScope {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
    /// All five tiers at a fifth of the payout
    #[serde(rename = "1-5")]
    All,
}

impl PrizeScope {
    /// Zero-based indexes of the tiers this scope checks
    pub fn tier_indexes(&self) -> &'static [usize] {
        match self {
            PrizeScope::First => &[0],
            PrizeScope::Second => &[1],
            PrizeScope::Third => &[2],
            PrizeScope::Fourth => &[3],
            PrizeScope::Fifth => &[4],
            PrizeScope::All => &[0, 1, 2, 3, 4],
        }
    }
}

impl fmt::Display for PrizeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrizeScope::First => write!(f, "1"),
            PrizeScope::Second => write!(f, "2"),
            PrizeScope::Third => write!(f, "3"),
            PrizeScope::Fourth => write!(f, "4"),
            PrizeScope::Fifth => write!(f, "5"),
            PrizeScope::All => write!(f, "1-5"),
        }
    }
}

/// Wager lifecycle. `Processing` is the claimed state while a settlement
/// run owns the wager; `Won`/`Lost` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WagerStatus {
    Pending,
    Processing,
    Won,
    Lost,
}

/// A placed bet. Funds were debited at placement; settlement only ever
/// moves the wager to a terminal state and credits winners.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wager {
    pub id: Uuid,
    pub user_id: Uuid,
    pub draw_id: Uuid,
    pub game_mode_id: Uuid,
    #[serde(rename = "type")]
    pub kind: BetKind,
    pub scope: PrizeScope,
    /// Group-family selections, 1-5 animal ids
    pub animal_ids: Vec<Uuid>,
    /// Numeric-family selections, canonicalized at classification time
    pub bet_numbers: Vec<String>,
    /// Stake in currency minor units
    pub amount: u64,
    /// Odds snapshot captured at placement; settlement never re-reads the
    /// game mode's current odds
    pub odds: u32,
    pub potential_win_amount: u64,
    pub win_amount: Option<u64>,
    pub status: WagerStatus,
    pub created_at: DateTime<Utc>,
}

impl Wager {
    /// A group-family or passe wager on the given animals
    pub fn on_animals(
        user_id: Uuid,
        draw_id: Uuid,
        mode: &GameMode,
        kind: BetKind,
        scope: PrizeScope,
        animal_ids: Vec<Uuid>,
        amount: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            draw_id,
            game_mode_id: mode.id,
            kind,
            scope,
            animal_ids,
            bet_numbers: Vec::new(),
            amount,
            odds: mode.odds,
            potential_win_amount: amount.saturating_mul(mode.odds as u64),
            win_amount: None,
            status: WagerStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// A numeric-family wager on the given numbers
    pub fn on_numbers(
        user_id: Uuid,
        draw_id: Uuid,
        mode: &GameMode,
        kind: BetKind,
        scope: PrizeScope,
        bet_numbers: Vec<String>,
        amount: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            draw_id,
            game_mode_id: mode.id,
            kind,
            scope,
            animal_ids: Vec::new(),
            bet_numbers,
            amount,
            odds: mode.odds,
            potential_win_amount: amount.saturating_mul(mode.odds as u64),
            win_amount: None,
            status: WagerStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, WagerStatus::Won | WagerStatus::Lost)
    }
}

/// One prize tier as submitted by the operator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeSubmission {
    pub animal_id: Option<Uuid>,
    pub number: Option<String>,
}

impl PrizeSubmission {
    pub fn full(animal_id: Uuid, number: impl Into<String>) -> Self {
        Self {
            animal_id: Some(animal_id),
            number: Some(number.into()),
        }
    }

    pub fn animal_only(animal_id: Uuid) -> Self {
        Self {
            animal_id: Some(animal_id),
            number: None,
        }
    }

    pub fn number_only(number: impl Into<String>) -> Self {
        Self {
            animal_id: None,
            number: Some(number.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
