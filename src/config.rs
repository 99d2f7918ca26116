//! Application settings read from environment variables
//!
//! Recognized variables:
//!   PRICING_DATA_DIR, PRICING_AVG_TICKET, PRICING_TARGET_MARGIN,
//!   PRICING_DEBT_SERVICE, PRICING_DEFAULT_QTY
//! Unset or unparsable values fall back to the defaults below.

use crate::engine::{
    GlobalBreakEvenParams, DEFAULT_AVERAGE_TICKET, DEFAULT_DEBT_SERVICE_FRACTION, DEFAULT_TARGET_MARGIN,
};
use crate::store::DEFAULT_DATA_DIR;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Batch size the simulator starts from
pub const DEFAULT_QUANTITY: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory of the JSON record store
    pub data_dir: PathBuf,

    /// Average ticket for the monthly break-even
    pub average_ticket: f64,

    /// Target margin in percent (40 = 40%)
    pub target_margin_percent: f64,

    /// Fraction of total debt serviced monthly
    pub debt_service_fraction: f64,

    /// Default simulator batch size
    pub default_quantity: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            average_ticket: DEFAULT_AVERAGE_TICKET,
            target_margin_percent: DEFAULT_TARGET_MARGIN * 100.0,
            debt_service_fraction: DEFAULT_DEBT_SERVICE_FRACTION,
            default_quantity: DEFAULT_QUANTITY,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: lookup("PRICING_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            average_ticket: parse_var(&lookup, "PRICING_AVG_TICKET", defaults.average_ticket),
            target_margin_percent: parse_var(&lookup, "PRICING_TARGET_MARGIN", defaults.target_margin_percent),
            debt_service_fraction: parse_var(&lookup, "PRICING_DEBT_SERVICE", defaults.debt_service_fraction),
            default_quantity: parse_var(&lookup, "PRICING_DEFAULT_QTY", defaults.default_quantity),
        }
    }

    /// Parameters for the monthly break-even estimate
    pub fn break_even_params(&self) -> GlobalBreakEvenParams {
        GlobalBreakEvenParams {
            average_ticket: self.average_ticket,
            target_margin: self.target_margin_percent / 100.0,
            debt_service_fraction: self.debt_service_fraction,
        }
    }
}

/// Read one variable from the process environment, warning on bad values
pub fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    parse_var(&|key: &str| env::var(key).ok(), name, default)
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}: not a number, using {}", name, raw, default);
            default
        }),
        None => default,
    }
}
