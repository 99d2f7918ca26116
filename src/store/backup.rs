//! Whole-store backup and restore as a single JSON document

use super::{Collection, PricingStore, RecordStore};
use crate::catalog::{CategoryTemplate, LedgerEntry, Product, Quote};
use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Backup format version written by this build
pub const BACKUP_VERSION: u32 = 1;

/// Snapshot of every collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<CategoryTemplate>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub fixed_costs: Vec<LedgerEntry>,
    #[serde(default)]
    pub debts: Vec<LedgerEntry>,
}

impl Backup {
    /// Parse a backup document, mapping any format problem to `InvalidBackup`
    pub fn from_json(json: &str) -> Result<Self> {
        let backup: Backup =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidBackup(e.to_string()))?;
        backup.validate()?;
        Ok(backup)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Backup written to {}", path.as_ref().display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.version != BACKUP_VERSION {
            return Err(StoreError::InvalidBackup(format!(
                "unsupported version {} (expected {})",
                self.version, BACKUP_VERSION
            )));
        }
        check_unique("products", self.products.iter().map(|p| p.id))?;
        check_unique("categories", self.categories.iter().map(|c| c.id))?;
        check_unique("quotes", self.quotes.iter().map(|q| q.id))?;
        check_unique("fixedCosts", self.fixed_costs.iter().map(|e| e.id))?;
        check_unique("debts", self.debts.iter().map(|e| e.id))?;
        Ok(())
    }
}

fn check_unique(collection: &str, ids: impl Iterator<Item = u64>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::InvalidBackup(format!("duplicate id {} in {}", id, collection)));
        }
    }
    Ok(())
}

impl<S: RecordStore> PricingStore<S> {
    /// Snapshot of the current state, seed data included
    pub fn export_backup(&self) -> Result<Backup> {
        Ok(Backup {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            products: self.list_products()?,
            categories: self.list_categories()?,
            quotes: self.list_quotes()?,
            fixed_costs: self.list_fixed_costs()?,
            debts: self.list_debts()?,
        })
    }

    /// Overwrite every collection with the backup's contents
    ///
    /// All five documents are checked and serialized before the first write,
    /// so a bad record leaves the store untouched. An I/O failure during the
    /// writes themselves can still leave earlier collections restored.
    pub fn import_backup(&self, backup: &Backup) -> Result<()> {
        backup.validate()?;
        let documents = [
            (Collection::Products, Self::encode(&backup.products)?),
            (Collection::Categories, Self::encode(&backup.categories)?),
            (Collection::Quotes, Self::encode(&backup.quotes)?),
            (Collection::FixedCosts, Self::encode(&backup.fixed_costs)?),
            (Collection::Debts, Self::encode(&backup.debts)?),
        ];
        for (collection, json) in &documents {
            self.records().set(collection.key(), json)?;
        }
        log::info!(
            "Restored backup from {}: {} products, {} quotes",
            backup.exported_at,
            backup.products.len(),
            backup.quotes.len()
        );
        Ok(())
    }
}
