//! Sweep a product over a range of list prices
//!
//! Outputs one row per price point for comparing margins and break-even
//! Accepts config via environment variables:
//!   SWEEP_PRODUCT_ID, SWEEP_MIN_PRICE, SWEEP_MAX_PRICE, SWEEP_STEP,
//!   SWEEP_QUANTITY, SWEEP_DISCOUNT, SWEEP_SHIPPING
//! plus PRICING_DATA_DIR for the record store.

use anyhow::{Context, Result};
use apparel_pricing::config::env_or;
use apparel_pricing::scenario::price_grid;
use apparel_pricing::{AppConfig, JsonFileStore, PricingStore, ScenarioRunner};
use serde::Serialize;
use std::time::Instant;

/// One price point of the sweep
#[derive(Debug, Serialize)]
struct SweepRow {
    unit_price: f64,
    effective_unit_price: f64,
    unit_production_cost: f64,
    variable_cost_per_unit: f64,
    net_margin_per_unit: f64,
    net_margin_percent: f64,
    total_profit: f64,
    roi_percent: f64,
    /// Empty when break-even is unreachable
    break_even_units: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let config = AppConfig::from_env();

    let product_id: u64 = env_or("SWEEP_PRODUCT_ID", 1);
    let min_price: f64 = env_or("SWEEP_MIN_PRICE", 60_000.0);
    let max_price: f64 = env_or("SWEEP_MAX_PRICE", 200_000.0);
    let step: f64 = env_or("SWEEP_STEP", 5_000.0);
    let quantity: f64 = env_or("SWEEP_QUANTITY", config.default_quantity);
    let discount: f64 = env_or("SWEEP_DISCOUNT", 0.0);
    let shipping: f64 = env_or("SWEEP_SHIPPING", 0.0);

    let prices = price_grid(min_price, max_price, step).context("building the price grid")?;

    let store = PricingStore::new(JsonFileStore::open(&config.data_dir)?);
    let product = store
        .get_product(product_id)
        .with_context(|| format!("loading product {}", product_id))?;
    println!("Sweeping {} ({}) from {:.0} to {:.0}", product.name, product.id, min_price, max_price);

    let base = product
        .scenario(quantity)
        .with_discount(discount)
        .with_extra_shipping(shipping);
    let runner = ScenarioRunner::new();
    let reports = runner.run_prices(&base, &prices);

    let output_path = "price_sweep_output.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path))?;
    for (price, report) in prices.iter().zip(&reports) {
        writer.serialize(SweepRow {
            unit_price: *price,
            effective_unit_price: report.effective_unit_price,
            unit_production_cost: report.unit_production_cost,
            variable_cost_per_unit: report.total_variable_cost_per_unit,
            net_margin_per_unit: report.net_margin_per_unit,
            net_margin_percent: report.net_margin_percent,
            total_profit: report.total_profit,
            roi_percent: report.return_on_investment,
            break_even_units: report.break_even_units.units(),
        })?;
    }
    writer.flush()?;
    println!("Output written to {}", output_path);

    // First price that makes money per unit
    match prices.iter().zip(&reports).find(|(_, r)| r.net_margin_per_unit > 0.0) {
        Some((price, report)) => println!(
            "  Lowest profitable price: {:.0} (net {:.1}%, break-even {})",
            price, report.net_margin_percent, report.break_even_units
        ),
        None => println!("  No profitable price in range"),
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
