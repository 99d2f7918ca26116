//! Break-even derivation shared by the batch report and the global estimator
//!
//! Both answer the same question: how many units, each contributing
//! `margin_per_unit`, are needed to recover `cost_to_recover`.

use super::report::BreakEven;
use serde::{Deserialize, Serialize};

/// Average ticket assumed for the global estimator
pub const DEFAULT_AVERAGE_TICKET: f64 = 120_000.0;

/// Target margin fraction assumed for the global estimator (40%)
pub const DEFAULT_TARGET_MARGIN: f64 = 0.40;

/// Fraction of outstanding debt paid down each month (10%)
pub const DEFAULT_DEBT_SERVICE_FRACTION: f64 = 0.10;

/// Units needed to recover `cost_to_recover` at `margin_per_unit` each
///
/// A non-positive margin can never recover anything. A negative cost
/// (only possible with a negative batch size) needs no units.
pub fn break_even_units(cost_to_recover: f64, margin_per_unit: f64) -> BreakEven {
    if margin_per_unit > 0.0 {
        let units = (cost_to_recover / margin_per_unit).ceil();
        BreakEven::Reachable(units.max(0.0) as u64)
    } else {
        BreakEven::Unreachable
    }
}

/// Monthly units needed to cover `fixed_costs` at an average ticket and target margin
pub fn global_break_even_units(fixed_costs: f64, average_ticket: f64, target_margin: f64) -> BreakEven {
    if target_margin <= 0.0 {
        return BreakEven::Unreachable;
    }
    break_even_units(fixed_costs, average_ticket * target_margin)
}

/// Assumptions for the monthly break-even estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalBreakEvenParams {
    pub average_ticket: f64,
    /// Target margin as a fraction (0.40 = 40%)
    pub target_margin: f64,
    /// Fraction of total debt serviced each month
    pub debt_service_fraction: f64,
}

impl Default for GlobalBreakEvenParams {
    fn default() -> Self {
        Self {
            average_ticket: DEFAULT_AVERAGE_TICKET,
            target_margin: DEFAULT_TARGET_MARGIN,
            debt_service_fraction: DEFAULT_DEBT_SERVICE_FRACTION,
        }
    }
}

/// Monthly break-even with and without debt service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalBreakEven {
    pub total_fixed_costs: f64,
    pub total_debt: f64,
    pub margin_per_unit: f64,
    pub monthly_debt_payment: f64,
    pub units: BreakEven,
    pub units_with_debt: BreakEven,
}

impl GlobalBreakEven {
    pub fn estimate(total_fixed_costs: f64, total_debt: f64, params: &GlobalBreakEvenParams) -> Self {
        let monthly_debt_payment = total_debt * params.debt_service_fraction;
        Self {
            total_fixed_costs,
            total_debt,
            margin_per_unit: params.average_ticket * params.target_margin,
            monthly_debt_payment,
            units: global_break_even_units(
                total_fixed_costs,
                params.average_ticket,
                params.target_margin,
            ),
            units_with_debt: global_break_even_units(
                total_fixed_costs + monthly_debt_payment,
                params.average_ticket,
                params.target_margin,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_ledger_break_even() {
        // 1,200,000 + 200,000 + 0 + 500,000
        let units = global_break_even_units(1_900_000.0, 120_000.0, 0.40);
        assert_eq!(units, BreakEven::Reachable(40));
    }

    #[test]
    fn test_zero_margin_is_unreachable() {
        assert_eq!(global_break_even_units(1_900_000.0, 120_000.0, 0.0), BreakEven::Unreachable);
        assert_eq!(global_break_even_units(1_900_000.0, 120_000.0, -0.1), BreakEven::Unreachable);
        assert_eq!(break_even_units(1_000.0, 0.0), BreakEven::Unreachable);
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        assert_eq!(break_even_units(96_000.0, 48_000.0), BreakEven::Reachable(2));
        assert_eq!(break_even_units(0.0, 48_000.0), BreakEven::Reachable(0));
    }

    #[test]
    fn test_negative_cost_clamps_to_zero_units() {
        assert_eq!(break_even_units(-5_000.0, 1_000.0), BreakEven::Reachable(0));
    }

    #[test]
    fn test_debt_service_variant() {
        let params = GlobalBreakEvenParams::default();
        let estimate = GlobalBreakEven::estimate(1_900_000.0, 5_000_000.0, &params);

        assert_relative_eq!(estimate.monthly_debt_payment, 500_000.0, epsilon = 1e-6);
        assert_eq!(estimate.units, BreakEven::Reachable(40));
        // 2,400,000 / 48,000 = 50
        assert_eq!(estimate.units_with_debt, BreakEven::Reachable(50));
    }
}
