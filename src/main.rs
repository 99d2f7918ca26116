//! Apparel Pricing CLI
//!
//! Command-line interface for simulating batches, managing the catalog and
//! checking the monthly break-even.

use anyhow::{bail, Context, Result};
use apparel_pricing::catalog::load_products;
use apparel_pricing::store::{Backup, Collection};
use apparel_pricing::{
    AppConfig, CostLineItem, FinancialReport, GlobalBreakEven, JsonFileStore, PricingStore,
    Product, ScenarioInput, ScenarioRunner,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pricing", version, about = "Pricing and margin calculator")]
struct Cli {
    /// Directory of the record store (overrides PRICING_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Profitability report for a batch
    Simulate {
        /// Stored product to start from
        #[arg(long)]
        product: Option<u64>,

        /// Cost line item as NAME=VALUE (repeatable, replaces the product's costs)
        #[arg(long = "cost", value_parser = parse_cost)]
        costs: Vec<CostLineItem>,

        /// List price per unit (defaults to the product's price)
        #[arg(long)]
        price: Option<f64>,

        /// Units in the batch
        #[arg(long)]
        quantity: Option<f64>,

        /// Discount percent on the list price
        #[arg(long, default_value_t = 0.0)]
        discount: f64,

        /// Extra shipping per unit
        #[arg(long, default_value_t = 0.0)]
        shipping: f64,

        /// Store the result in the quote history
        #[arg(long)]
        save: bool,
    },
    /// List catalog products
    Products,
    /// Add products from a CSV sheet
    ImportProducts { path: PathBuf },
    /// List category templates
    Categories,
    /// List saved quotes
    Quotes,
    /// Delete a saved quote
    DeleteQuote { id: u64 },
    /// Add a fixed cost or debt entry
    AddLedgerEntry {
        #[arg(value_enum)]
        ledger: LedgerKind,
        name: String,
        value: f64,
    },
    /// Ledger totals and monthly break-even
    Finance {
        /// Average ticket (overrides PRICING_AVG_TICKET)
        #[arg(long)]
        avg_ticket: Option<f64>,

        /// Target margin percent (overrides PRICING_TARGET_MARGIN)
        #[arg(long)]
        target_margin: Option<f64>,
    },
    /// Catalog headline numbers
    Summary,
    /// Export or restore the whole store
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LedgerKind {
    Fixed,
    Debt,
}

#[derive(Debug, Subcommand)]
enum BackupAction {
    Export { path: PathBuf },
    Import { path: PathBuf },
}

fn parse_cost(raw: &str) -> std::result::Result<CostLineItem, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value for {}: {}", name, e))?;
    Ok(CostLineItem::new(name.trim(), value))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    let records = JsonFileStore::open(&config.data_dir)
        .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
    let store = PricingStore::new(records);
    let runner = ScenarioRunner::new();

    match cli.command {
        Command::Simulate { product, costs, price, quantity, discount, shipping, save } => {
            let product = product
                .map(|id| store.get_product(id))
                .transpose()
                .context("loading product")?;

            let quantity = quantity.unwrap_or(config.default_quantity);
            let mut scenario = match (&product, price) {
                (Some(p), _) => p.scenario(quantity),
                (None, Some(_)) => ScenarioInput::new(Vec::new(), 0.0, quantity),
                (None, None) => bail!("either --product or --price is required"),
            };
            if let Some(price) = price {
                scenario.unit_price = price;
            }
            if !costs.is_empty() {
                scenario.cost_line_items = costs;
            }
            let scenario = scenario.with_discount(discount).with_extra_shipping(shipping);

            let report = runner.run(&scenario);
            emit(cli.json, &report, || print_report(product.as_ref(), &report))?;

            if save {
                let quote = store
                    .save_quote(product.as_ref(), &scenario, &report)
                    .context("saving quote")?;
                eprintln!("Saved quote {}", quote.id);
            }
        }
        Command::Products => {
            let products = store.list_products()?;
            emit(cli.json, &products, || {
                println!("{:>4}  {:<28} {:>12} {:>12}", "ID", "Name", "Unit cost", "Price");
                println!("{}", "-".repeat(60));
                for p in &products {
                    println!("{:>4}  {:<28} {:>12.0} {:>12.0}", p.id, p.name, p.unit_cost(), p.default_price);
                }
            })?;
        }
        Command::ImportProducts { path } => {
            let imported = load_products(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for product in imported {
                let added = store.add_product(product)?;
                println!("Added {} ({})", added.id, added.name);
            }
        }
        Command::Categories => {
            let categories = store.list_categories()?;
            emit(cli.json, &categories, || {
                for c in &categories {
                    println!("{:>4}  {:<28} cost {:>10.0}  suggested {:>10.0}", c.id, c.name, c.unit_cost(), c.suggested_price);
                }
            })?;
        }
        Command::Quotes => {
            let quotes = store.list_quotes()?;
            emit(cli.json, &quotes, || {
                println!("{:>4}  {:<20} {:<24} {:>8} {:>14} {:>12}", "ID", "Date", "Product", "Qty", "Profit", "Break-even");
                println!("{}", "-".repeat(88));
                for q in &quotes {
                    println!(
                        "{:>4}  {:<20} {:<24} {:>8} {:>14.0} {:>12}",
                        q.id,
                        q.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        q.product_name,
                        q.scenario.quantity,
                        q.report.total_profit,
                        q.report.break_even_units.to_string(),
                    );
                }
            })?;
        }
        Command::DeleteQuote { id } => {
            let remaining = store.delete_quote(id)?;
            println!("Deleted quote {} ({} left)", id, remaining.len());
        }
        Command::AddLedgerEntry { ledger, name, value } => {
            let collection = match ledger {
                LedgerKind::Fixed => Collection::FixedCosts,
                LedgerKind::Debt => Collection::Debts,
            };
            let entry = store.add_ledger_entry(collection, &name, value)?;
            println!("Added {} entry {} ({})", collection, entry.id, entry.name);
        }
        Command::Finance { avg_ticket, target_margin } => {
            if let Some(ticket) = avg_ticket {
                config.average_ticket = ticket;
            }
            if let Some(margin) = target_margin {
                config.target_margin_percent = margin;
            }
            let estimate = GlobalBreakEven::estimate(
                store.total_fixed_costs()?,
                store.total_debts()?,
                &config.break_even_params(),
            );
            emit(cli.json, &estimate, || {
                println!("Fixed costs:        {:>14.0}", estimate.total_fixed_costs);
                println!("Total debt:         {:>14.0}", estimate.total_debt);
                println!("Margin per unit:    {:>14.0}", estimate.margin_per_unit);
                println!("Monthly break-even: {:>14}", estimate.units.to_string());
                println!(
                    "With debt payment:  {:>14}  (pays {:.0}/month)",
                    estimate.units_with_debt.to_string(),
                    estimate.monthly_debt_payment
                );
            })?;
        }
        Command::Summary => {
            let products = store.list_products()?;
            let summary = runner.summarize_catalog(&products, store.list_quotes()?.len());
            emit(cli.json, &summary, || {
                println!("Products: {}", summary.total_products);
                println!("Quotes:   {}", summary.total_quotes);
                println!("Average net margin: {:.1}%", summary.average_net_margin_percent);
                if let Some(top) = &summary.top_product {
                    println!("Top product: {} ({:.1}%, {:.0}/unit)", top.name, top.net_margin_percent, top.net_margin_per_unit);
                }
            })?;
        }
        Command::Backup { action } => match action {
            BackupAction::Export { path } => {
                store.export_backup()?.write_to(&path)?;
                println!("Backup written to {}", path.display());
            }
            BackupAction::Import { path } => {
                let backup = Backup::read_from(&path)
                    .with_context(|| format!("reading backup {}", path.display()))?;
                store.import_backup(&backup)?;
                println!("Restored backup exported at {}", backup.exported_at);
            }
        },
    }

    Ok(())
}

/// Print `value` as JSON, or run the text printer
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn print_report(product: Option<&Product>, report: &FinancialReport) {
    if let Some(p) = product {
        println!("Product: {} ({})", p.name, p.id);
    }
    println!("{:<28} {:>14.0}", "Unit production cost", report.unit_production_cost);
    println!("{:<28} {:>14.0}", "Total production cost", report.total_production_cost);
    println!("{:<28} {:>14.0}", "Effective unit price", report.effective_unit_price);
    println!("{:<28} {:>14.0}", "Gateway fee / unit", report.gateway_fee_per_unit);
    println!("{:<28} {:>14.0}", "Withholding / unit", report.withholding_per_unit);
    println!("{:<28} {:>14.0}", "Variable costs / unit", report.total_variable_cost_per_unit);
    println!("{:<28} {:>14.0} {:>7.1}%", "Gross margin / unit", report.gross_margin_per_unit, report.gross_margin_percent);
    println!("{:<28} {:>14.0} {:>7.1}%", "Net margin / unit", report.net_margin_per_unit, report.net_margin_percent);
    println!("{:<28} {:>14.0}", "Total profit", report.total_profit);
    println!("{:<28} {:>14}", "Break-even", report.break_even_units.to_string());
    println!("{:<28} {:>13.1}%", "ROI", report.return_on_investment);

    println!("\nBreakdown per unit:");
    for entry in &report.cost_breakdown {
        println!("  {:<24} {:>12.0}  {}", entry.label, entry.amount, entry.color_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cost() {
        let item = parse_cost("Tela=35000").unwrap();
        assert_eq!(item, CostLineItem::new("Tela", 35_000.0));

        let spaced = parse_cost(" Confección = 12000.5 ").unwrap();
        assert_eq!(spaced.name, "Confección");
        assert_eq!(spaced.value, 12_000.5);
    }

    #[test]
    fn test_parse_cost_rejects_malformed() {
        let missing = parse_cost("Tela35000").unwrap_err();
        assert!(missing.contains("expected NAME=VALUE"));

        let not_a_number = parse_cost("Tela=mucho").unwrap_err();
        assert!(not_a_number.contains("bad value for Tela"));
    }

    #[test]
    fn test_cli_collects_repeated_costs() {
        let cli = Cli::try_parse_from([
            "pricing", "simulate", "--price", "90000", "--cost", "Tela=20000", "--cost", "Empaque=2500",
        ])
        .unwrap();
        match cli.command {
            Command::Simulate { costs, price, .. } => {
                assert_eq!(costs.len(), 2);
                assert_eq!(price, Some(90_000.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["pricing", "simulate", "--cost", "Tela"]).is_err());
    }
}
