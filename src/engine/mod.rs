//! Financial engine: pure profitability calculations for pricing scenarios

mod scenario;
mod fees;
mod report;
mod calculator;
pub mod break_even;

pub use scenario::{CostLineItem, ScenarioInput};
pub use fees::{FeeSchedule, GATEWAY_FLAT_FEE, GATEWAY_RATE, ICA_WITHHOLDING_RATE, INCOME_WITHHOLDING_RATE};
pub use report::{BreakEven, BreakdownKind, CostBreakdownEntry, FinancialReport};
pub use calculator::{compute_financials, compute_financials_with};
pub use break_even::{
    break_even_units, global_break_even_units, GlobalBreakEven, GlobalBreakEvenParams,
    DEFAULT_AVERAGE_TICKET, DEFAULT_DEBT_SERVICE_FRACTION, DEFAULT_TARGET_MARGIN,
};
