//! Persistence seams and their in-memory reference implementations

pub mod memory;
pub mod traits;

pub use memory::{MemoryBetStore, MemoryCatalog, MemoryDrawStore, MemoryLedger};
pub use traits::{BalanceLedger, BetStore, CatalogStore, DrawStore};
