//! Scenario inputs: the cost structure and what-if parameters for one calculation

use serde::{Deserialize, Serialize};

/// One component of the unit production cost (fabric, labor, printing, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    /// Display name of the cost component
    pub name: String,

    /// Cost per unit, in currency units
    pub value: f64,
}

impl CostLineItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Everything the engine needs for one calculation
///
/// Built fresh by the caller for every calculation, usually from a stored
/// product's line items and default price plus the simulator's what-if fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    /// Units in the batch. Callers should pass whole units >= 0; the engine
    /// computes with whatever it is given.
    pub quantity: f64,

    /// Unit production cost components
    pub cost_line_items: Vec<CostLineItem>,

    /// List price per unit, before discount
    pub unit_price: f64,

    /// Extra shipping cost per unit
    #[serde(default)]
    pub extra_shipping_per_unit: f64,

    /// Discount on the list price, expected in [0, 100]
    #[serde(default)]
    pub discount_percent: f64,
}

impl ScenarioInput {
    /// Scenario with no discount and no extra shipping
    pub fn new(cost_line_items: Vec<CostLineItem>, unit_price: f64, quantity: f64) -> Self {
        Self {
            quantity,
            cost_line_items,
            unit_price,
            extra_shipping_per_unit: 0.0,
            discount_percent: 0.0,
        }
    }

    pub fn with_discount(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_extra_shipping(mut self, extra_shipping_per_unit: f64) -> Self {
        self.extra_shipping_per_unit = extra_shipping_per_unit;
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Sum of the cost line items
    pub fn unit_production_cost(&self) -> f64 {
        self.cost_line_items.iter().map(|item| item.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_keep_costs() {
        let scenario = ScenarioInput::new(vec![CostLineItem::new("Tela", 35_000.0)], 145_000.0, 50.0)
            .with_discount(10.0)
            .with_extra_shipping(5_000.0);

        assert_eq!(scenario.discount_percent, 10.0);
        assert_eq!(scenario.extra_shipping_per_unit, 5_000.0);
        assert_eq!(scenario.quantity, 50.0);
        assert_eq!(scenario.unit_production_cost(), 35_000.0);
    }

    #[test]
    fn test_what_if_fields_default_to_zero() {
        let json = r#"{"quantity":10,"costLineItems":[],"unitPrice":85000}"#;
        let scenario: ScenarioInput = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.discount_percent, 0.0);
        assert_eq!(scenario.extra_shipping_per_unit, 0.0);
        assert_eq!(scenario.unit_production_cost(), 0.0);
    }
}
