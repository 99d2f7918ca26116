//! Catalog records: products, category templates, ledger entries and saved quotes

use crate::engine::{CostLineItem, FinancialReport, ScenarioInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::legacy::{RawCategoryTemplate, RawProduct};

/// A product in the catalog with its unit cost structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProduct")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit cost components, in display order
    pub costs: Vec<CostLineItem>,
    /// List price used when simulating this product
    #[serde(rename = "defaultPvp")]
    pub default_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Unsaved product; the store assigns `id` and `created_at` on insert
    pub fn new(name: impl Into<String>, costs: Vec<CostLineItem>, default_price: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: None,
            costs,
            default_price,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn unit_cost(&self) -> f64 {
        self.costs.iter().map(|item| item.value).sum()
    }

    /// Scenario at the product's default price, no discount or extra shipping
    pub fn scenario(&self, quantity: f64) -> ScenarioInput {
        ScenarioInput::new(self.costs.clone(), self.default_price, quantity)
    }
}

/// Reusable cost template for creating products of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCategoryTemplate")]
pub struct CategoryTemplate {
    pub id: u64,
    pub name: String,
    pub costs: Vec<CostLineItem>,
    #[serde(rename = "suggestedPvp")]
    pub suggested_price: f64,
}

impl CategoryTemplate {
    pub fn new(name: impl Into<String>, costs: Vec<CostLineItem>, suggested_price: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            costs,
            suggested_price,
        }
    }

    pub fn unit_cost(&self) -> f64 {
        self.costs.iter().map(|item| item.value).sum()
    }

    /// Unsaved product pre-filled from this template
    pub fn instantiate(&self, product_name: impl Into<String>) -> Product {
        Product::new(product_name, self.costs.clone(), self.suggested_price)
            .with_category(self.name.clone())
    }
}

/// A named monthly amount: a fixed cost or an outstanding debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

impl LedgerEntry {
    pub fn new(id: u64, name: impl Into<String>, value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}

/// Sum of ledger values, skipping non-finite amounts
pub fn ledger_total(entries: &[LedgerEntry]) -> f64 {
    entries
        .iter()
        .map(|entry| entry.value)
        .filter(|value| value.is_finite())
        .sum()
}

/// Frozen snapshot of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: u64,
    #[serde(default)]
    pub product_id: Option<u64>,
    pub product_name: String,
    pub scenario: ScenarioInput,
    pub report: FinancialReport,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_instantiation() {
        let template = CategoryTemplate::new(
            "Camiseta Premium",
            vec![CostLineItem::new("Tela", 12_000.0), CostLineItem::new("Empaque", 2_500.0)],
            85_000.0,
        );
        let product = template.instantiate("Logo Tee");

        assert_eq!(product.name, "Logo Tee");
        assert_eq!(product.category.as_deref(), Some("Camiseta Premium"));
        assert_eq!(product.unit_cost(), 14_500.0);
        assert_eq!(product.default_price, 85_000.0);
    }

    #[test]
    fn test_ledger_total_skips_non_finite() {
        let entries = vec![
            LedgerEntry::new(1, "Arriendo", 1_200_000.0),
            LedgerEntry::new(2, "Roto", f64::NAN),
            LedgerEntry::new(3, "Servicios", 200_000.0),
        ];
        assert_eq!(ledger_total(&entries), 1_400_000.0);
        assert_eq!(ledger_total(&[]), 0.0);
    }

    #[test]
    fn test_product_scenario_uses_default_price() {
        let product = Product::new("Cargo Pants", vec![CostLineItem::new("Tela", 28_000.0)], 135_000.0);
        let scenario = product.scenario(12.0);

        assert_eq!(scenario.unit_price, 135_000.0);
        assert_eq!(scenario.quantity, 12.0);
        assert_eq!(scenario.discount_percent, 0.0);
        assert_eq!(scenario.cost_line_items, product.costs);
    }
}
