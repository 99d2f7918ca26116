//! Per-unit fees charged on the effective price: payment gateway and tax withholding

use serde::{Deserialize, Serialize};

/// Payment gateway commission as a fraction of the effective price (3.2%)
pub const GATEWAY_RATE: f64 = 0.032;

/// Flat gateway fee per transaction, charged even at zero price
pub const GATEWAY_FLAT_FEE: f64 = 900.0;

/// Municipal (ICA) withholding rate (0.7%)
pub const ICA_WITHHOLDING_RATE: f64 = 0.007;

/// Income tax withholding rate (1.5%)
pub const INCOME_WITHHOLDING_RATE: f64 = 0.015;

/// Fee policy applied per unit sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Percentage part of the gateway fee, as a fraction
    pub gateway_rate: f64,

    /// Flat part of the gateway fee
    pub gateway_flat_fee: f64,

    /// Withholding rates, each applied separately to the effective price
    pub withholding_rates: Vec<f64>,
}

impl FeeSchedule {
    /// Gateway commission for one unit sold at `effective_price`
    pub fn gateway_fee(&self, effective_price: f64) -> f64 {
        effective_price * self.gateway_rate + self.gateway_flat_fee
    }

    /// Total withholding for one unit sold at `effective_price`
    pub fn withholding(&self, effective_price: f64) -> f64 {
        self.withholding_rates
            .iter()
            .map(|rate| effective_price * rate)
            .sum()
    }

    /// Combined withholding rate
    pub fn total_withholding_rate(&self) -> f64 {
        self.withholding_rates.iter().sum()
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            gateway_rate: GATEWAY_RATE,
            gateway_flat_fee: GATEWAY_FLAT_FEE,
            withholding_rates: vec![ICA_WITHHOLDING_RATE, INCOME_WITHHOLDING_RATE],
        }
    }
}
