//! In-memory reference stores
//!
//! `DashMap`-backed implementations of the store seams. Per-entry shard
//! locking gives the claim and ledger operations the atomicity the traits
//! demand, which is enough for tests and single-node deployments.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::errors::{EngineError, Result};
use crate::models::{Animal, Draw, GameMode, Wager, WagerStatus};
use crate::numbers;
use crate::store::traits::{BalanceLedger, BetStore, CatalogStore, DrawStore};

/// The classic 25-group table, group order
const ANIMAL_NAMES: [&str; 25] = [
    "Avestruz", "Aguia", "Burro", "Borboleta", "Cachorro", "Cabra", "Carneiro", "Camelo", "Cobra",
    "Coelho", "Cavalo", "Elefante", "Galo", "Gato", "Jacare", "Leao", "Macaco", "Porco", "Pavao",
    "Peru", "Touro", "Tigre", "Urso", "Veado", "Vaca",
];

/// Canonical catalog, materialized once per process
static STANDARD_TABLE: Lazy<Vec<Animal>> = Lazy::new(|| {
    ANIMAL_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Animal::new((i + 1) as u8, *name))
        .collect()
});

/// In-memory catalog of animals and game modes
pub struct MemoryCatalog {
    animals: DashMap<Uuid, Animal>,
    by_group: DashMap<u8, Uuid>,
    modes: DashMap<Uuid, GameMode>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            animals: DashMap::new(),
            by_group: DashMap::new(),
            modes: DashMap::new(),
        }
    }

    /// Catalog pre-populated with the standard 25-animal table
    pub fn seeded() -> Self {
        let catalog = Self::new();
        for animal in STANDARD_TABLE.iter() {
            catalog.insert_animal(animal.clone());
        }
        catalog
    }

    pub fn insert_animal(&self, animal: Animal) {
        self.by_group.insert(animal.group, animal.id);
        self.animals.insert(animal.id, animal);
    }

    pub fn insert_mode(&self, mode: GameMode) {
        self.modes.insert(mode.id, mode);
    }

    pub fn remove_mode(&self, id: Uuid) {
        self.modes.remove(&id);
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn animal(&self, id: Uuid) -> Result<Option<Animal>> {
        Ok(self.animals.get(&id).map(|a| a.clone()))
    }

    async fn animal_by_group(&self, group: u8) -> Result<Option<Animal>> {
        // Copy the id out so no shard guard lives across the lookup
        let id = match self.by_group.get(&group) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.animal(id).await
    }

    async fn animal_by_ending(&self, ending: &str) -> Result<Option<Animal>> {
        match numbers::group_for_ending(ending) {
            Some(group) => self.animal_by_group(group).await,
            None => Ok(None),
        }
    }

    async fn game_mode(&self, id: Uuid) -> Result<Option<GameMode>> {
        Ok(self.modes.get(&id).map(|m| m.clone()))
    }
}

/// In-memory draw store
#[derive(Default)]
pub struct MemoryDrawStore {
    draws: DashMap<Uuid, Draw>,
}

impl MemoryDrawStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrawStore for MemoryDrawStore {
    async fn draw(&self, id: Uuid) -> Result<Option<Draw>> {
        Ok(self.draws.get(&id).map(|d| d.clone()))
    }

    async fn put_draw(&self, draw: &Draw) -> Result<()> {
        self.draws.insert(draw.id, draw.clone());
        Ok(())
    }
}

/// In-memory bet store. Status transitions happen under the entry's shard
/// lock, which makes `claim` a true test-and-set.
#[derive(Default)]
pub struct MemoryBetStore {
    wagers: DashMap<Uuid, Wager>,
}

impl MemoryBetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BetStore for MemoryBetStore {
    async fn wager(&self, id: Uuid) -> Result<Option<Wager>> {
        Ok(self.wagers.get(&id).map(|w| w.clone()))
    }

    async fn put_wager(&self, wager: &Wager) -> Result<()> {
        self.wagers.insert(wager.id, wager.clone());
        Ok(())
    }

    async fn wagers_by_draw(&self, draw_id: Uuid) -> Result<Vec<Wager>> {
        Ok(self
            .wagers
            .iter()
            .filter(|w| w.draw_id == draw_id)
            .map(|w| w.clone())
            .collect())
    }

    async fn claim(&self, wager_id: Uuid) -> Result<bool> {
        match self.wagers.get_mut(&wager_id) {
            Some(mut wager) if wager.status == WagerStatus::Pending => {
                wager.status = WagerStatus::Processing;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(EngineError::not_found("wager", wager_id)),
        }
    }

    async fn release(&self, wager_id: Uuid) -> Result<()> {
        match self.wagers.get_mut(&wager_id) {
            Some(mut wager) if wager.status == WagerStatus::Processing => {
                wager.status = WagerStatus::Pending;
                Ok(())
            }
            Some(wager) => Err(EngineError::Store(format!(
                "cannot release wager {} from state {:?}",
                wager_id, wager.status
            ))),
            None => Err(EngineError::not_found("wager", wager_id)),
        }
    }

    async fn record_outcome(
        &self,
        wager_id: Uuid,
        status: WagerStatus,
        win_amount: Option<u64>,
    ) -> Result<()> {
        match self.wagers.get_mut(&wager_id) {
            Some(mut wager) if wager.status == WagerStatus::Processing => {
                wager.status = status;
                wager.win_amount = win_amount;
                Ok(())
            }
            Some(wager) => Err(EngineError::Store(format!(
                "cannot settle wager {} from state {:?}",
                wager_id, wager.status
            ))),
            None => Err(EngineError::not_found("wager", wager_id)),
        }
    }

    async fn reset_won_to_pending(&self, wager_id: Uuid) -> Result<Option<u64>> {
        match self.wagers.get_mut(&wager_id) {
            Some(mut wager) if wager.status == WagerStatus::Won => {
                let reversed = wager.win_amount.take();
                wager.status = WagerStatus::Pending;
                Ok(reversed)
            }
            Some(_) => Ok(None),
            None => Err(EngineError::not_found("wager", wager_id)),
        }
    }
}

/// In-memory balance ledger with per-operation idempotency
#[derive(Default)]
pub struct MemoryLedger {
    balances: DashMap<Uuid, u64>,
    applied: DashMap<String, ()>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, user_id: Uuid, amount: u64) {
        self.balances.insert(user_id, amount);
    }
}

#[async_trait]
impl BalanceLedger for MemoryLedger {
    async fn credit(&self, user_id: Uuid, amount: u64, op_id: &str) -> Result<()> {
        match self.applied.entry(op_id.to_string()) {
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                let mut balance = self.balances.entry(user_id).or_insert(0);
                *balance = balance.checked_add(amount).ok_or_else(|| {
                    EngineError::Ledger(format!("balance overflow for user {}", user_id))
                })?;
                slot.insert(());
                Ok(())
            }
        }
    }

    async fn debit(&self, user_id: Uuid, amount: u64, op_id: &str) -> Result<()> {
        match self.applied.entry(op_id.to_string()) {
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                let mut balance = self.balances.entry(user_id).or_insert(0);
                *balance = balance.checked_sub(amount).ok_or_else(|| {
                    EngineError::Ledger(format!(
                        "insufficient balance for user {}: {} < {}",
                        user_id, *balance, amount
                    ))
                })?;
                slot.insert(());
                Ok(())
            }
        }
    }

    async fn balance(&self, user_id: Uuid) -> Result<u64> {
        Ok(self.balances.get(&user_id).map(|b| *b).unwrap_or(0))
    }
}
