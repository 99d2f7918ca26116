//! Typed catalog, ledger and quote operations over a `RecordStore`

use super::validate::FiniteRecord;
use super::{Collection, RecordStore};
use crate::catalog::defaults;
use crate::catalog::{ledger_total, CategoryTemplate, LedgerEntry, Product, Quote};
use crate::engine::{FinancialReport, ScenarioInput};
use crate::error::{Result, StoreError};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Catalog and ledger operations backed by any record store
#[derive(Debug)]
pub struct PricingStore<S: RecordStore> {
    records: S,
}

impl<S: RecordStore> PricingStore<S> {
    pub fn new(records: S) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &S {
        &self.records
    }

    // ---- Generic collection access ----

    /// Stored list for `collection`, or None if it was never saved
    pub(crate) fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<Vec<T>>> {
        match self.records.get(collection.key())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Check and serialize a list without touching the record store
    pub(crate) fn encode<T: Serialize + FiniteRecord>(items: &[T]) -> Result<String> {
        for item in items {
            item.check_finite()?;
        }
        Ok(serde_json::to_string_pretty(items)?)
    }

    pub(crate) fn save<T: Serialize + FiniteRecord>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let json = Self::encode(items)?;
        self.records.set(collection.key(), &json)?;
        log::debug!("Saved {} {} record(s)", items.len(), collection);
        Ok(())
    }

    fn load_or<T: DeserializeOwned>(&self, collection: Collection, seed: impl FnOnce() -> Vec<T>) -> Result<Vec<T>> {
        Ok(self.load(collection)?.unwrap_or_else(seed))
    }

    // ---- Products ----

    /// All products; the seed catalog until products are first saved
    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.load_or(Collection::Products, defaults::default_products)
    }

    pub fn save_products(&self, products: &[Product]) -> Result<()> {
        self.save(Collection::Products, products)
    }

    pub fn get_product(&self, id: u64) -> Result<Product> {
        self.list_products()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { collection: "product", id })
    }

    /// Insert a new product with a fresh id and creation time
    pub fn add_product(&self, mut product: Product) -> Result<Product> {
        validate_name("product name", &product.name)?;
        let mut products = self.list_products()?;
        product.id = next_id(products.iter().map(|p| p.id));
        product.created_at = Utc::now();
        products.push(product.clone());
        self.save_products(&products)?;
        log::info!("Added product {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Replace the product with the same id, or add it if unknown
    pub fn upsert_product(&self, product: Product) -> Result<Product> {
        validate_name("product name", &product.name)?;
        let mut products = self.list_products()?;
        match products.iter_mut().find(|p| p.id == product.id && product.id != 0) {
            Some(existing) => {
                *existing = product.clone();
                self.save_products(&products)?;
                log::info!("Updated product {} ({})", product.id, product.name);
                Ok(product)
            }
            None => self.add_product(product),
        }
    }

    /// Remove a product and return the remaining catalog
    pub fn delete_product(&self, id: u64) -> Result<Vec<Product>> {
        let mut products = self.list_products()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(StoreError::NotFound { collection: "product", id });
        }
        self.save_products(&products)?;
        log::info!("Deleted product {}", id);
        Ok(products)
    }

    /// Scenario for a stored product at its default price
    pub fn scenario_for_product(&self, id: u64, quantity: f64) -> Result<ScenarioInput> {
        Ok(self.get_product(id)?.scenario(quantity))
    }

    // ---- Category templates ----

    pub fn list_categories(&self) -> Result<Vec<CategoryTemplate>> {
        self.load_or(Collection::Categories, defaults::default_categories)
    }

    pub fn add_category(&self, mut template: CategoryTemplate) -> Result<CategoryTemplate> {
        validate_name("category name", &template.name)?;
        let mut categories = self.list_categories()?;
        template.id = next_id(categories.iter().map(|c| c.id));
        categories.push(template.clone());
        self.save(Collection::Categories, &categories)?;
        Ok(template)
    }

    pub fn update_category(&self, template: CategoryTemplate) -> Result<Vec<CategoryTemplate>> {
        validate_name("category name", &template.name)?;
        let mut categories = self.list_categories()?;
        let existing = categories
            .iter_mut()
            .find(|c| c.id == template.id)
            .ok_or(StoreError::NotFound { collection: "category", id: template.id })?;
        *existing = template;
        self.save(Collection::Categories, &categories)?;
        Ok(categories)
    }

    pub fn delete_category(&self, id: u64) -> Result<Vec<CategoryTemplate>> {
        let mut categories = self.list_categories()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(StoreError::NotFound { collection: "category", id });
        }
        self.save(Collection::Categories, &categories)?;
        Ok(categories)
    }

    /// Create and store a product from a category template
    pub fn product_from_template(&self, template_id: u64, name: &str) -> Result<Product> {
        let template = self
            .list_categories()?
            .into_iter()
            .find(|c| c.id == template_id)
            .ok_or(StoreError::NotFound { collection: "category", id: template_id })?;
        self.add_product(template.instantiate(name))
    }

    // ---- Ledgers ----

    pub fn list_fixed_costs(&self) -> Result<Vec<LedgerEntry>> {
        self.load_or(Collection::FixedCosts, defaults::default_fixed_costs)
    }

    pub fn save_fixed_costs(&self, entries: &[LedgerEntry]) -> Result<()> {
        self.save(Collection::FixedCosts, entries)
    }

    pub fn list_debts(&self) -> Result<Vec<LedgerEntry>> {
        self.load_or(Collection::Debts, defaults::default_debts)
    }

    pub fn save_debts(&self, entries: &[LedgerEntry]) -> Result<()> {
        self.save(Collection::Debts, entries)
    }

    pub fn total_fixed_costs(&self) -> Result<f64> {
        Ok(ledger_total(&self.list_fixed_costs()?))
    }

    pub fn total_debts(&self) -> Result<f64> {
        Ok(ledger_total(&self.list_debts()?))
    }

    /// Append an entry with a fresh id to a ledger
    pub fn add_ledger_entry(&self, ledger: Collection, name: &str, value: f64) -> Result<LedgerEntry> {
        let mut entries = match ledger {
            Collection::FixedCosts => self.list_fixed_costs()?,
            Collection::Debts => self.list_debts()?,
            other => {
                return Err(StoreError::invalid_input("ledger", format!("{} is not a ledger", other)))
            }
        };
        let entry = LedgerEntry::new(next_id(entries.iter().map(|e| e.id)), name, value);
        entries.push(entry.clone());
        self.save(ledger, &entries)?;
        Ok(entry)
    }

    // ---- Quotes ----

    pub fn list_quotes(&self) -> Result<Vec<Quote>> {
        self.load_or(Collection::Quotes, Vec::new)
    }

    /// Freeze a simulation into the quote history
    pub fn save_quote(
        &self,
        product: Option<&Product>,
        scenario: &ScenarioInput,
        report: &FinancialReport,
    ) -> Result<Quote> {
        let mut quotes = self.list_quotes()?;
        let quote = Quote {
            id: next_id(quotes.iter().map(|q| q.id)),
            product_id: product.map(|p| p.id),
            product_name: product.map(|p| p.name.clone()).unwrap_or_else(|| "Custom".to_string()),
            scenario: scenario.clone(),
            report: report.clone(),
            created_at: Utc::now(),
        };
        quotes.push(quote.clone());
        self.save(Collection::Quotes, &quotes)?;
        log::info!("Saved quote {} for {}", quote.id, quote.product_name);
        Ok(quote)
    }

    /// Remove a quote and return the remaining history
    pub fn delete_quote(&self, id: u64) -> Result<Vec<Quote>> {
        let mut quotes = self.list_quotes()?;
        let before = quotes.len();
        quotes.retain(|q| q.id != id);
        if quotes.len() == before {
            return Err(StoreError::NotFound { collection: "quote", id });
        }
        self.save(Collection::Quotes, &quotes)?;
        Ok(quotes)
    }
}

/// One past the largest id in use (1 for an empty collection)
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

fn validate_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StoreError::invalid_input(field, "must not be empty"));
    }
    Ok(())
}
