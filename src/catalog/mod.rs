//! Catalog records and their storage shapes

mod data;
mod legacy;
pub mod defaults;
pub mod loader;

pub use data::{ledger_total, CategoryTemplate, LedgerEntry, Product, Quote};
pub use legacy::LegacyCosts;
pub use loader::{load_products, load_products_from_reader};
