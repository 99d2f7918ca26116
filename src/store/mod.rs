//! Key-value record store for the catalog, ledgers and quote history
//!
//! A `RecordStore` only knows opaque JSON documents keyed by collection.
//! `PricingStore` layers the typed catalog operations on top of it, so the
//! engine and its tests never depend on a storage technology.

mod memory;
mod json_file;
mod service;
mod validate;
pub mod backup;

pub use memory::MemoryStore;
pub use json_file::{JsonFileStore, DEFAULT_DATA_DIR};
pub use service::PricingStore;
pub use backup::{Backup, BACKUP_VERSION};

use crate::error::Result;

/// Minimal get/set persistence for whole collections
pub trait RecordStore: Send + Sync {
    /// Raw JSON document for `key`, or None if never saved
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document for `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Forget `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// The collections kept by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Categories,
    Quotes,
    FixedCosts,
    Debts,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Products,
        Collection::Categories,
        Collection::Quotes,
        Collection::FixedCosts,
        Collection::Debts,
    ];

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Quotes => "quotes",
            Collection::FixedCosts => "fixed_costs",
            Collection::Debts => "debts",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
