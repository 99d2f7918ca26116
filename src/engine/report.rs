//! Output structures for a profitability calculation

use serde::{Deserialize, Serialize};

/// Display colors cycled through for cost line items
pub const LINE_ITEM_COLORS: [&str; 4] = ["#404040", "#525252", "#737373", "#a3a3a3"];
pub const GATEWAY_COLOR: &str = "#dc2626";
pub const WITHHOLDING_COLOR: &str = "#ea580c";
pub const EXTRA_SHIPPING_COLOR: &str = "#eab308";
pub const NET_MARGIN_COLOR: &str = "#22c55e";

/// Break-even outcome for a batch
///
/// `Unreachable` means the price never recovers the production cost because
/// each unit sold loses money after variable costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "units", rename_all = "camelCase")]
pub enum BreakEven {
    /// Minimum number of units whose contribution covers the cost
    Reachable(u64),
    /// No number of units covers the cost
    Unreachable,
}

impl BreakEven {
    pub fn is_reachable(&self) -> bool {
        matches!(self, BreakEven::Reachable(_))
    }

    pub fn units(&self) -> Option<u64> {
        match self {
            BreakEven::Reachable(units) => Some(*units),
            BreakEven::Unreachable => None,
        }
    }

    /// Integer view used by exports: unreachable collapses to 0
    pub fn units_or_zero(&self) -> u64 {
        self.units().unwrap_or(0)
    }
}

impl std::fmt::Display for BreakEven {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakEven::Reachable(units) => write!(f, "{} units", units),
            BreakEven::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// What a cost-breakdown slice represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakdownKind {
    CostItem,
    GatewayFee,
    Withholding,
    ExtraShipping,
    NetMargin,
}

/// One slice of the per-unit price breakdown (chart data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdownEntry {
    pub label: String,
    pub amount: f64,
    pub color_hint: String,
    pub kind: BreakdownKind,
}

impl CostBreakdownEntry {
    pub fn new(label: impl Into<String>, amount: f64, color_hint: &str, kind: BreakdownKind) -> Self {
        Self {
            label: label.into(),
            amount,
            color_hint: color_hint.to_string(),
            kind,
        }
    }
}

/// Full profitability report for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    // Production cost
    pub unit_production_cost: f64,
    pub total_production_cost: f64,
    /// Production cost plus extra shipping, per unit
    pub unit_real_cost: f64,

    // Price
    pub effective_unit_price: f64,

    // Variable costs per unit
    pub gateway_fee_per_unit: f64,
    pub withholding_per_unit: f64,
    pub total_variable_cost_per_unit: f64,

    // Margins
    pub gross_margin_per_unit: f64,
    pub gross_margin_percent: f64,
    pub net_margin_per_unit: f64,
    pub net_margin_percent: f64,
    pub contribution_margin_per_unit: f64,

    // Batch totals
    pub total_profit: f64,
    pub break_even_units: BreakEven,
    pub return_on_investment: f64,

    /// Chart slices, only those with a positive amount
    pub cost_breakdown: Vec<CostBreakdownEntry>,
}

impl FinancialReport {
    /// True when every unit sold adds profit after all costs
    pub fn is_profitable(&self) -> bool {
        self.net_margin_per_unit > 0.0
    }

    /// Sum of the breakdown slices (approximates the effective price)
    pub fn breakdown_total(&self) -> f64 {
        self.cost_breakdown.iter().map(|entry| entry.amount).sum()
    }
}
