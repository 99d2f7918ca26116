//! Seed data used when a collection has never been saved

use super::data::{CategoryTemplate, LedgerEntry, Product};
use super::legacy::LegacyCosts;
use chrono::Utc;

fn product(id: u64, name: &str, category: &str, costs: LegacyCosts, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: Some(category.to_string()),
        costs: costs.into_line_items(),
        default_price: price,
        created_at: Utc::now(),
    }
}

fn template(id: u64, name: &str, costs: LegacyCosts, price: f64) -> CategoryTemplate {
    CategoryTemplate {
        id,
        name: name.to_string(),
        costs: costs.into_line_items(),
        suggested_price: price,
    }
}

const HOODIE: LegacyCosts = LegacyCosts {
    fabric: 35_000.0,
    confection: 15_000.0,
    print: 8_000.0,
    packaging: 2_500.0,
};

const TEE: LegacyCosts = LegacyCosts {
    fabric: 12_000.0,
    confection: 8_000.0,
    print: 5_000.0,
    packaging: 2_500.0,
};

const CARGO: LegacyCosts = LegacyCosts {
    fabric: 28_000.0,
    confection: 18_000.0,
    print: 0.0,
    packaging: 2_500.0,
};

pub fn default_products() -> Vec<Product> {
    vec![
        product(1, "Oversize Hoodie", "Hoodies", HOODIE, 145_000.0),
        product(2, "Premium Tee", "Camisetas", TEE, 85_000.0),
        product(3, "Cargo Pants", "Pants", CARGO, 135_000.0),
    ]
}

pub fn default_categories() -> Vec<CategoryTemplate> {
    vec![
        template(1, "Hoodie Heavyweight", HOODIE, 145_000.0),
        template(2, "Camiseta Premium", TEE, 85_000.0),
        template(3, "Cargo Pants", CARGO, 135_000.0),
    ]
}

/// Monthly fixed costs of a small studio: 1,900,000 in total
pub fn default_fixed_costs() -> Vec<LedgerEntry> {
    vec![
        LedgerEntry::new(1, "Arriendo", 1_200_000.0),
        LedgerEntry::new(2, "Servicios", 200_000.0),
        LedgerEntry::new(3, "Nómina", 0.0),
        LedgerEntry::new(4, "Marketing", 500_000.0),
    ]
}

pub fn default_debts() -> Vec<LedgerEntry> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::data::ledger_total;

    #[test]
    fn test_default_ledger_total() {
        assert_eq!(ledger_total(&default_fixed_costs()), 1_900_000.0);
        assert!(default_debts().is_empty());
    }

    #[test]
    fn test_default_catalog_costs() {
        let products = default_products();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].unit_cost(), 60_500.0);
        assert_eq!(products[2].unit_cost(), 48_500.0);

        let categories = default_categories();
        assert_eq!(categories[1].unit_cost(), 27_500.0);
    }
}
