//! Numeric checks applied before a record is persisted
//!
//! JSON has no encoding for NaN or infinity (serde_json writes `null`), and a
//! `null` cannot be read back into an `f64`. A single such value would make
//! the whole collection unreadable, so records carrying one are refused.

use crate::catalog::{CategoryTemplate, LedgerEntry, Product, Quote};
use crate::engine::{CostLineItem, FinancialReport, ScenarioInput};
use crate::error::{Result, StoreError};

/// Records that can be checked for non-finite numbers
pub(crate) trait FiniteRecord {
    fn check_finite(&self) -> Result<()>;
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ))
    }
}

fn check_costs(items: &[CostLineItem]) -> Result<()> {
    for item in items {
        require_finite(&format!("cost '{}'", item.name), item.value)?;
    }
    Ok(())
}

fn check_scenario(scenario: &ScenarioInput) -> Result<()> {
    require_finite("quantity", scenario.quantity)?;
    require_finite("unitPrice", scenario.unit_price)?;
    require_finite("extraShippingPerUnit", scenario.extra_shipping_per_unit)?;
    require_finite("discountPercent", scenario.discount_percent)?;
    check_costs(&scenario.cost_line_items)
}

fn check_report(report: &FinancialReport) -> Result<()> {
    let fields = [
        ("unitProductionCost", report.unit_production_cost),
        ("totalProductionCost", report.total_production_cost),
        ("unitRealCost", report.unit_real_cost),
        ("effectiveUnitPrice", report.effective_unit_price),
        ("gatewayFeePerUnit", report.gateway_fee_per_unit),
        ("withholdingPerUnit", report.withholding_per_unit),
        ("totalVariableCostPerUnit", report.total_variable_cost_per_unit),
        ("grossMarginPerUnit", report.gross_margin_per_unit),
        ("grossMarginPercent", report.gross_margin_percent),
        ("netMarginPerUnit", report.net_margin_per_unit),
        ("netMarginPercent", report.net_margin_percent),
        ("contributionMarginPerUnit", report.contribution_margin_per_unit),
        ("totalProfit", report.total_profit),
        ("returnOnInvestment", report.return_on_investment),
    ];
    for (field, value) in fields {
        require_finite(field, value)?;
    }
    for entry in &report.cost_breakdown {
        require_finite(&format!("breakdown '{}'", entry.label), entry.amount)?;
    }
    Ok(())
}

impl FiniteRecord for Product {
    fn check_finite(&self) -> Result<()> {
        require_finite("defaultPvp", self.default_price)?;
        check_costs(&self.costs)
    }
}

impl FiniteRecord for CategoryTemplate {
    fn check_finite(&self) -> Result<()> {
        require_finite("suggestedPvp", self.suggested_price)?;
        check_costs(&self.costs)
    }
}

impl FiniteRecord for LedgerEntry {
    fn check_finite(&self) -> Result<()> {
        require_finite("value", self.value)
    }
}

impl FiniteRecord for Quote {
    fn check_finite(&self) -> Result<()> {
        check_scenario(&self.scenario)?;
        check_report(&self.report)
    }
}
