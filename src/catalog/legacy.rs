//! Adapter for records saved before costs became a free-form list
//!
//! Older products and templates stored exactly four cost fields (fabric,
//! confection, print, packaging). They are converted into named line items
//! when read, so nothing past the store boundary sees the old shape.

use super::data::{CategoryTemplate, Product};
use crate::engine::CostLineItem;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const FABRIC_LABEL: &str = "Tela";
pub const CONFECTION_LABEL: &str = "Confección";
pub const PRINT_LABEL: &str = "Estampado";
pub const PACKAGING_LABEL: &str = "Empaque";

/// The four fixed cost fields of the legacy shape
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegacyCosts {
    pub fabric: f64,
    pub confection: f64,
    pub print: f64,
    pub packaging: f64,
}

impl LegacyCosts {
    pub fn into_line_items(self) -> Vec<CostLineItem> {
        vec![
            CostLineItem::new(FABRIC_LABEL, self.fabric),
            CostLineItem::new(CONFECTION_LABEL, self.confection),
            CostLineItem::new(PRINT_LABEL, self.print),
            CostLineItem::new(PACKAGING_LABEL, self.packaging),
        ]
    }
}

/// Product as found in storage: current or legacy shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProduct {
    #[serde(default)]
    id: u64,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    costs: Option<Vec<CostLineItem>>,
    #[serde(default)]
    default_pvp: f64,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,

    // Legacy fixed fields
    #[serde(default)]
    fabric_cost: Option<f64>,
    #[serde(default)]
    confection_cost: Option<f64>,
    #[serde(default)]
    default_print_cost: Option<f64>,
    #[serde(default)]
    packaging_cost: Option<f64>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let costs = raw.costs.unwrap_or_else(|| {
            log::debug!("Migrating legacy cost fields for product {} ({})", raw.id, raw.name);
            LegacyCosts {
                fabric: raw.fabric_cost.unwrap_or(0.0),
                confection: raw.confection_cost.unwrap_or(0.0),
                print: raw.default_print_cost.unwrap_or(0.0),
                packaging: raw.packaging_cost.unwrap_or(0.0),
            }
            .into_line_items()
        });

        Product {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            costs,
            default_price: raw.default_pvp,
            created_at: raw.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Category template as found in storage: current or legacy shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCategoryTemplate {
    #[serde(default)]
    id: u64,
    name: String,
    #[serde(default)]
    costs: Option<Vec<CostLineItem>>,
    #[serde(default)]
    suggested_pvp: f64,

    #[serde(default)]
    fabric_cost: Option<f64>,
    #[serde(default)]
    confection_cost: Option<f64>,
    #[serde(default)]
    print_cost: Option<f64>,
    #[serde(default)]
    packaging_cost: Option<f64>,
}

impl From<RawCategoryTemplate> for CategoryTemplate {
    fn from(raw: RawCategoryTemplate) -> Self {
        let costs = raw.costs.unwrap_or_else(|| {
            LegacyCosts {
                fabric: raw.fabric_cost.unwrap_or(0.0),
                confection: raw.confection_cost.unwrap_or(0.0),
                print: raw.print_cost.unwrap_or(0.0),
                packaging: raw.packaging_cost.unwrap_or(0.0),
            }
            .into_line_items()
        });

        CategoryTemplate {
            id: raw.id,
            name: raw.name,
            costs,
            suggested_price: raw.suggested_pvp,
        }
    }
}
