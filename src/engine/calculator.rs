//! Profitability calculation for a single pricing scenario
//!
//! Pure and total: every numeric input yields a fully populated report.
//! Degenerate prices or cost lists produce zeros, never an error.

use super::break_even::break_even_units;
use super::fees::FeeSchedule;
use super::report::{
    BreakdownKind, CostBreakdownEntry, FinancialReport, EXTRA_SHIPPING_COLOR, GATEWAY_COLOR,
    LINE_ITEM_COLORS, NET_MARGIN_COLOR, WITHHOLDING_COLOR,
};
use super::scenario::ScenarioInput;

/// Compute the report with the default fee schedule
pub fn compute_financials(input: &ScenarioInput) -> FinancialReport {
    compute_financials_with(input, &FeeSchedule::default())
}

/// Compute the report with an explicit fee schedule
pub fn compute_financials_with(input: &ScenarioInput, fees: &FeeSchedule) -> FinancialReport {
    let quantity = input.quantity;

    let unit_production_cost = input.unit_production_cost();
    let total_production_cost = unit_production_cost * quantity;

    let effective_unit_price = input.unit_price * (1.0 - input.discount_percent / 100.0);

    let gateway_fee_per_unit = fees.gateway_fee(effective_unit_price);
    let withholding_per_unit = fees.withholding(effective_unit_price);
    let total_variable_cost_per_unit =
        gateway_fee_per_unit + withholding_per_unit + input.extra_shipping_per_unit;

    let gross_margin_per_unit = effective_unit_price - unit_production_cost;
    let gross_margin_percent = percent_of_price(gross_margin_per_unit, effective_unit_price);

    let net_margin_per_unit =
        effective_unit_price - unit_production_cost - total_variable_cost_per_unit;
    let net_margin_percent = percent_of_price(net_margin_per_unit, effective_unit_price);

    let total_profit = net_margin_per_unit * quantity;

    let contribution_margin_per_unit = effective_unit_price - total_variable_cost_per_unit;
    let break_even = break_even_units(total_production_cost, contribution_margin_per_unit);

    let return_on_investment = if total_production_cost > 0.0 {
        total_profit / total_production_cost * 100.0
    } else {
        0.0
    };

    let cost_breakdown = build_breakdown(
        input,
        gateway_fee_per_unit,
        withholding_per_unit,
        net_margin_per_unit,
    );

    FinancialReport {
        unit_production_cost,
        total_production_cost,
        unit_real_cost: unit_production_cost + input.extra_shipping_per_unit,
        effective_unit_price,
        gateway_fee_per_unit,
        withholding_per_unit,
        total_variable_cost_per_unit,
        gross_margin_per_unit,
        gross_margin_percent,
        net_margin_per_unit,
        net_margin_percent,
        contribution_margin_per_unit,
        total_profit,
        break_even_units: break_even,
        return_on_investment,
        cost_breakdown,
    }
}

/// `amount` as a percentage of `price`, 0 for a non-positive price
fn percent_of_price(amount: f64, price: f64) -> f64 {
    if price > 0.0 {
        amount / price * 100.0
    } else {
        0.0
    }
}

fn build_breakdown(
    input: &ScenarioInput,
    gateway_fee_per_unit: f64,
    withholding_per_unit: f64,
    net_margin_per_unit: f64,
) -> Vec<CostBreakdownEntry> {
    let line_items = input.cost_line_items.iter().enumerate().map(|(i, item)| {
        CostBreakdownEntry::new(
            item.name.clone(),
            item.value,
            LINE_ITEM_COLORS[i % LINE_ITEM_COLORS.len()],
            BreakdownKind::CostItem,
        )
    });

    let fixed = [
        CostBreakdownEntry::new("Gateway fee", gateway_fee_per_unit, GATEWAY_COLOR, BreakdownKind::GatewayFee),
        CostBreakdownEntry::new("Withholding", withholding_per_unit, WITHHOLDING_COLOR, BreakdownKind::Withholding),
        CostBreakdownEntry::new(
            "Extra shipping",
            input.extra_shipping_per_unit,
            EXTRA_SHIPPING_COLOR,
            BreakdownKind::ExtraShipping,
        ),
        CostBreakdownEntry::new(
            "Net margin",
            net_margin_per_unit.max(0.0),
            NET_MARGIN_COLOR,
            BreakdownKind::NetMargin,
        ),
    ];

    // `> 0.0` also drops NaN amounts
    line_items
        .chain(fixed)
        .filter(|entry| entry.amount > 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::report::BreakEven;
    use crate::engine::scenario::CostLineItem;
    use approx::assert_relative_eq;

    fn hoodie_costs() -> Vec<CostLineItem> {
        vec![
            CostLineItem::new("Tela", 35_000.0),
            CostLineItem::new("Confección", 15_000.0),
            CostLineItem::new("Estampado", 8_000.0),
            CostLineItem::new("Empaque", 2_500.0),
        ]
    }

    fn hoodie_batch() -> ScenarioInput {
        ScenarioInput::new(hoodie_costs(), 145_000.0, 50.0)
    }

    #[test]
    fn test_hoodie_batch() {
        let report = compute_financials(&hoodie_batch());

        assert_eq!(report.unit_production_cost, 60_500.0);
        assert_eq!(report.total_production_cost, 3_025_000.0);
        assert_eq!(report.effective_unit_price, 145_000.0);
        assert_relative_eq!(report.gateway_fee_per_unit, 5_540.0, epsilon = 1e-6);
        assert_relative_eq!(report.withholding_per_unit, 3_190.0, epsilon = 1e-6);
        assert_relative_eq!(report.total_variable_cost_per_unit, 8_730.0, epsilon = 1e-6);
        assert_relative_eq!(report.net_margin_per_unit, 75_770.0, epsilon = 1e-6);
        assert_relative_eq!(report.total_profit, 3_788_500.0, epsilon = 1e-4);
        assert_relative_eq!(report.contribution_margin_per_unit, 136_270.0, epsilon = 1e-6);
        assert_eq!(report.break_even_units, BreakEven::Reachable(23));

        assert_relative_eq!(report.gross_margin_per_unit, 84_500.0, epsilon = 1e-6);
        assert_relative_eq!(report.gross_margin_percent, 84_500.0 / 145_000.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(report.return_on_investment, 3_788_500.0 / 3_025_000.0 * 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_full_discount_is_unreachable() {
        let report = compute_financials(&hoodie_batch().with_discount(100.0));

        assert_eq!(report.effective_unit_price, 0.0);
        assert_eq!(report.gateway_fee_per_unit, 900.0);
        assert_eq!(report.withholding_per_unit, 0.0);
        assert_eq!(report.contribution_margin_per_unit, -900.0);
        assert_eq!(report.break_even_units, BreakEven::Unreachable);
        assert_eq!(report.net_margin_per_unit, -61_400.0);
        assert_eq!(report.total_profit, -61_400.0 * 50.0);
        assert_eq!(report.gross_margin_percent, 0.0);
        assert_eq!(report.net_margin_percent, 0.0);
    }

    #[test]
    fn test_empty_cost_list() {
        let input = ScenarioInput::new(Vec::new(), 100_000.0, 1.0);
        let report = compute_financials(&input);

        assert_eq!(report.unit_production_cost, 0.0);
        assert_eq!(report.total_production_cost, 0.0);
        assert_eq!(report.gross_margin_per_unit, report.effective_unit_price);
        assert_eq!(report.gross_margin_percent, 100.0);
        assert_eq!(report.return_on_investment, 0.0);
        assert_eq!(report.break_even_units, BreakEven::Reachable(0));
        assert!(report
            .cost_breakdown
            .iter()
            .all(|entry| entry.kind != BreakdownKind::CostItem));
    }

    #[test]
    fn test_zero_quantity() {
        let report = compute_financials(&hoodie_batch().with_quantity(0.0));

        assert_eq!(report.total_production_cost, 0.0);
        assert_eq!(report.total_profit, 0.0);
        assert_eq!(report.return_on_investment, 0.0);
        // Nothing to recover, but the margin is positive so it is reachable
        assert_eq!(report.break_even_units, BreakEven::Reachable(0));
    }

    #[test]
    fn test_negative_quantity_is_not_clamped() {
        let report = compute_financials(&hoodie_batch().with_quantity(-2.0));

        assert_eq!(report.total_production_cost, -121_000.0);
        assert!(report.total_profit < 0.0);
        assert_eq!(report.total_profit, report.net_margin_per_unit * -2.0);
        assert_eq!(report.return_on_investment, 0.0);
    }

    #[test]
    fn test_zero_and_negative_price_guard() {
        for price in [0.0, -10_000.0] {
            let report = compute_financials(&ScenarioInput::new(hoodie_costs(), price, 10.0));

            assert_eq!(report.gross_margin_percent, 0.0);
            assert_eq!(report.net_margin_percent, 0.0);
            assert_eq!(report.break_even_units, BreakEven::Unreachable);
            // ROI is guarded on production cost only, so a costed batch reports the loss
            assert!(report.return_on_investment < 0.0);

            let uncosted = compute_financials(&ScenarioInput::new(Vec::new(), price, 10.0));
            assert_eq!(uncosted.gross_margin_percent, 0.0);
            assert_eq!(uncosted.net_margin_percent, 0.0);
            assert_eq!(uncosted.return_on_investment, 0.0);
        }
    }

    #[test]
    fn test_no_discount_keeps_list_price() {
        let report = compute_financials(&ScenarioInput::new(hoodie_costs(), 85_000.0, 3.0));
        assert_eq!(report.effective_unit_price, 85_000.0);
    }

    #[test]
    fn test_total_profit_is_margin_times_quantity() {
        for quantity in [0.0, 1.0, 7.0, 50.0, 1_234.0] {
            for discount in [0.0, 15.0, 60.0, 100.0] {
                let input = hoodie_batch()
                    .with_quantity(quantity)
                    .with_discount(discount)
                    .with_extra_shipping(3_000.0);
                let report = compute_financials(&input);

                assert_eq!(report.total_profit, report.net_margin_per_unit * quantity);
                assert_eq!(report.total_production_cost, report.unit_production_cost * quantity);
            }
        }
    }

    #[test]
    fn test_net_margin_monotonic_in_price() {
        let mut last = f64::NEG_INFINITY;
        for step in 0..=40 {
            let price = -20_000.0 + step as f64 * 7_500.0;
            let report = compute_financials(&hoodie_batch().with_unit_price(price).with_discount(20.0));

            assert!(report.net_margin_per_unit >= last);
            last = report.net_margin_per_unit;
        }
    }

    #[test]
    fn test_breakdown_excludes_non_positive_amounts() {
        let mut costs = hoodie_costs();
        costs.push(CostLineItem::new("Etiqueta", 0.0));
        costs.push(CostLineItem::new("Devolución", -500.0));
        let input = ScenarioInput::new(costs, 50_000.0, 10.0);
        let report = compute_financials(&input);

        assert!(report.cost_breakdown.iter().all(|entry| entry.amount > 0.0));
        // Losing money: no net margin slice, no extra shipping slice
        assert!(!report
            .cost_breakdown
            .iter()
            .any(|entry| matches!(entry.kind, BreakdownKind::NetMargin | BreakdownKind::ExtraShipping)));
    }

    #[test]
    fn test_breakdown_order_and_colors() {
        let report = compute_financials(&hoodie_batch().with_extra_shipping(4_000.0));
        let labels: Vec<_> = report.cost_breakdown.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "Tela",
                "Confección",
                "Estampado",
                "Empaque",
                "Gateway fee",
                "Withholding",
                "Extra shipping",
                "Net margin"
            ]
        );
        assert_eq!(report.cost_breakdown[0].color_hint, "#404040");
        assert_eq!(report.cost_breakdown[3].color_hint, "#a3a3a3");
        assert_eq!(report.cost_breakdown[7].color_hint, NET_MARGIN_COLOR);
    }

    #[test]
    fn test_profitable_breakdown_sums_to_effective_price() {
        let report = compute_financials(&hoodie_batch().with_discount(10.0).with_extra_shipping(4_000.0));

        assert!(report.is_profitable());
        assert_relative_eq!(report.breakdown_total(), report.effective_unit_price, epsilon = 1e-6);
    }

    #[test]
    fn test_idempotent() {
        let input = hoodie_batch().with_discount(12.5).with_extra_shipping(1_750.0);
        let first = compute_financials(&input);
        let second = compute_financials(&input);

        assert_eq!(first, second);
        assert_eq!(first.total_profit.to_bits(), second.total_profit.to_bits());
    }

    #[test]
    fn test_custom_fee_schedule() {
        let fees = FeeSchedule {
            gateway_rate: 0.0,
            gateway_flat_fee: 0.0,
            withholding_rates: Vec::new(),
        };
        let report = compute_financials_with(&hoodie_batch(), &fees);

        assert_eq!(report.total_variable_cost_per_unit, 0.0);
        assert_eq!(report.net_margin_per_unit, report.gross_margin_per_unit);
    }
}
