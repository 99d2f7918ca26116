//! Apparel Pricing - pricing and margin calculator for a small apparel catalog
//!
//! This library provides:
//! - A pure profitability engine (margins, fees, break-even, ROI, cost breakdown)
//! - Monthly break-even estimates from fixed-cost and debt ledgers
//! - A product catalog, category templates and quote history over a key-value store
//! - Scenario sweeps and catalog summaries

pub mod engine;
pub mod catalog;
pub mod store;
pub mod scenario;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use engine::{
    compute_financials, compute_financials_with, BreakEven, CostLineItem, FeeSchedule,
    FinancialReport, GlobalBreakEven, ScenarioInput,
};
pub use catalog::{CategoryTemplate, LedgerEntry, Product, Quote};
pub use store::{JsonFileStore, MemoryStore, PricingStore, RecordStore};
pub use scenario::{CatalogSummary, ScenarioRunner};
pub use config::AppConfig;
pub use error::StoreError;
