//! Scenario runner for what-if sweeps and catalog-wide summaries
//!
//! Holds one fee schedule and runs as many calculations as needed against
//! it. Every run recomputes from scratch; reports are never cached.

use crate::catalog::Product;
use crate::engine::{compute_financials_with, FeeSchedule, FinancialReport, ScenarioInput};
use crate::error::{Result, StoreError};
use rayon::prelude::*;
use serde::Serialize;

/// Runs profitability calculations under a shared fee schedule
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = product.scenario(50.0);
///
/// // Compare several list prices for the same batch
/// for report in runner.run_prices(&base, &[120_000.0, 135_000.0, 145_000.0]) {
///     println!("{:.1}%", report.net_margin_percent);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    fees: FeeSchedule,
}

impl ScenarioRunner {
    /// Runner with the standard gateway and withholding fees
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fees(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &ScenarioInput) -> FinancialReport {
        compute_financials_with(scenario, &self.fees)
    }

    /// Same scenario at several batch sizes
    pub fn run_quantities(&self, base: &ScenarioInput, quantities: &[f64]) -> Vec<FinancialReport> {
        quantities
            .iter()
            .map(|&quantity| self.run(&base.clone().with_quantity(quantity)))
            .collect()
    }

    /// Same scenario at several list prices
    pub fn run_prices(&self, base: &ScenarioInput, prices: &[f64]) -> Vec<FinancialReport> {
        prices
            .par_iter()
            .map(|&price| self.run(&base.clone().with_unit_price(price)))
            .collect()
    }

    /// Every product at its default price, in catalog order
    pub fn run_catalog(&self, products: &[Product], quantity: f64) -> Vec<(u64, FinancialReport)> {
        products
            .par_iter()
            .map(|product| (product.id, self.run(&product.scenario(quantity))))
            .collect()
    }

    /// Dashboard view of the catalog: one unit of each product at its default price
    pub fn summarize_catalog(&self, products: &[Product], total_quotes: usize) -> CatalogSummary {
        let reports = self.run_catalog(products, 1.0);

        let average_net_margin_percent = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|(_, r)| r.net_margin_percent).sum::<f64>() / reports.len() as f64
        };

        // First product wins ties
        let mut top: Option<(&Product, &FinancialReport)> = None;
        for (product, (_, report)) in products.iter().zip(&reports) {
            let better = top.map_or(true, |(_, best)| report.net_margin_percent > best.net_margin_percent);
            if better {
                top = Some((product, report));
            }
        }

        log::debug!("Summarized {} products", products.len());

        CatalogSummary {
            total_products: products.len(),
            total_quotes,
            average_net_margin_percent,
            top_product: top.map(|(product, report)| TopProduct {
                id: product.id,
                name: product.name.clone(),
                net_margin_percent: report.net_margin_percent,
                net_margin_per_unit: report.net_margin_per_unit,
            }),
        }
    }
}

/// Best product by net margin percent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: u64,
    pub name: String,
    pub net_margin_percent: f64,
    pub net_margin_per_unit: f64,
}

/// Headline numbers across the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_products: usize,
    pub total_quotes: usize,
    pub average_net_margin_percent: f64,
    pub top_product: Option<TopProduct>,
}

/// Most points a single price sweep may evaluate
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Prices from `min` to `max` inclusive in `step` increments
///
/// Rejects empty or non-finite ranges and grids over `MAX_SWEEP_POINTS`.
pub fn price_grid(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || max < min {
        return Err(StoreError::invalid_input(
            "sweep range",
            format!("{}..={} step {}", min, max, step),
        ));
    }
    let points = ((max - min) / step).floor() + 1.0;
    if points > MAX_SWEEP_POINTS as f64 {
        return Err(StoreError::invalid_input(
            "sweep step",
            format!("{} points exceeds the limit of {}", points, MAX_SWEEP_POINTS),
        ));
    }
    Ok((0..points as usize).map(|i| min + i as f64 * step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::default_products;
    use crate::engine::{compute_financials, BreakEven};

    #[test]
    fn test_price_grid() {
        let grid = price_grid(60_000.0, 80_000.0, 5_000.0).unwrap();
        assert_eq!(grid, vec![60_000.0, 65_000.0, 70_000.0, 75_000.0, 80_000.0]);
        assert_eq!(price_grid(50_000.0, 50_000.0, 1_000.0).unwrap(), vec![50_000.0]);
    }

    #[test]
    fn test_price_grid_rejects_bad_ranges() {
        assert!(price_grid(60_000.0, 200_000.0, 1e-6).is_err());
        assert!(price_grid(60_000.0, 200_000.0, 0.0).is_err());
        assert!(price_grid(200_000.0, 60_000.0, 5_000.0).is_err());
        assert!(price_grid(f64::NAN, 60_000.0, 5_000.0).is_err());
        assert!(price_grid(0.0, f64::INFINITY, 5_000.0).is_err());
        assert_eq!(price_grid(0.0, 9_999.0, 1.0).unwrap().len(), MAX_SWEEP_POINTS);
    }

    #[test]
    fn test_runner_matches_engine() {
        let runner = ScenarioRunner::new();
        let scenario = default_products()[0].scenario(50.0);

        assert_eq!(runner.run(&scenario), compute_financials(&scenario));
        assert_eq!(runner.run(&scenario).break_even_units, BreakEven::Reachable(23));
    }

    #[test]
    fn test_price_sweep_preserves_order() {
        let runner = ScenarioRunner::new();
        let base = default_products()[0].scenario(50.0);
        let prices = [100_000.0, 120_000.0, 145_000.0, 170_000.0];

        let reports = runner.run_prices(&base, &prices);
        assert_eq!(reports.len(), 4);
        for (report, price) in reports.iter().zip(prices) {
            assert_eq!(report.effective_unit_price, price);
        }
        // Higher price, higher margin
        assert!(reports[3].net_margin_per_unit > reports[0].net_margin_per_unit);
    }

    #[test]
    fn test_quantity_sweep_scales_profit() {
        let runner = ScenarioRunner::new();
        let base = default_products()[1].scenario(1.0);

        let reports = runner.run_quantities(&base, &[10.0, 20.0]);
        assert_eq!(reports[1].total_profit, reports[1].net_margin_per_unit * 20.0);
        assert_eq!(reports[0].net_margin_per_unit, reports[1].net_margin_per_unit);
    }

    #[test]
    fn test_catalog_summary() {
        let runner = ScenarioRunner::new();
        let products = default_products();
        let summary = runner.summarize_catalog(&products, 2);

        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.total_quotes, 2);

        let reports = runner.run_catalog(&products, 1.0);
        let best = reports
            .iter()
            .max_by(|a, b| a.1.net_margin_percent.total_cmp(&b.1.net_margin_percent))
            .unwrap();
        let top = summary.top_product.unwrap();
        assert_eq!(top.id, best.0);
        assert_eq!(top.net_margin_percent, best.1.net_margin_percent);
    }

    #[test]
    fn test_empty_catalog_summary() {
        let summary = ScenarioRunner::new().summarize_catalog(&[], 0);

        assert_eq!(summary.average_net_margin_percent, 0.0);
        assert_eq!(summary.top_product, None);
    }
}
