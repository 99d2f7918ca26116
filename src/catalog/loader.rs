//! Load products from a CSV catalog sheet
//!
//! Expected header: `name,category,default_price,<cost columns...>`.
//! Every column after `default_price` is a cost line item named after its
//! header, so the old four-column sheets (Tela, Confección, Estampado,
//! Empaque) load the same way as sheets with any other cost columns.

use super::data::Product;
use crate::engine::CostLineItem;
use crate::error::{Result, StoreError};
use csv::{Reader, StringRecord};
use std::path::Path;

const NAME_COLUMN: usize = 0;
const CATEGORY_COLUMN: usize = 1;
const PRICE_COLUMN: usize = 2;
const FIRST_COST_COLUMN: usize = 3;

/// Load all products from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
    let file = std::fs::File::open(path.as_ref())?;
    log::info!("Loading products from {}", path.as_ref().display());
    load_products_from_reader(file)
}

/// Load products from any reader (e.g., string buffer, uploaded file)
pub fn load_products_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Product>> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    if headers.len() < FIRST_COST_COLUMN {
        return Err(StoreError::invalid_input(
            "header",
            "expected at least name, category and default_price columns",
        ));
    }

    let mut products = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        products.push(record_to_product(&headers, &record, row + 1)?);
    }

    log::debug!("Loaded {} products", products.len());
    Ok(products)
}

fn record_to_product(headers: &StringRecord, record: &StringRecord, row: usize) -> Result<Product> {
    let name = record.get(NAME_COLUMN).unwrap_or("").trim();
    if name.is_empty() {
        return Err(StoreError::invalid_input(format!("row {} name", row), "empty product name"));
    }

    let category = record
        .get(CATEGORY_COLUMN)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let default_price = parse_amount(record.get(PRICE_COLUMN), row, "default_price")?;

    let mut costs = Vec::new();
    for (column, header) in headers.iter().enumerate().skip(FIRST_COST_COLUMN) {
        let value = parse_amount(record.get(column), row, header)?;
        costs.push(CostLineItem::new(header.trim(), value));
    }

    let mut product = Product::new(name, costs, default_price);
    product.category = category;
    Ok(product)
}

/// Empty cells read as 0
fn parse_amount(cell: Option<&str>, row: usize, column: &str) -> Result<f64> {
    let cell = cell.unwrap_or("").trim();
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.parse::<f64>().map_err(|e| {
        StoreError::invalid_input(format!("row {} {}", row, column), e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_products_from_reader() {
        let data = "\
name,category,default_price,Tela,Confección,Estampado,Empaque
Oversize Hoodie,Hoodies,145000,35000,15000,8000,2500
Cargo Pants,,135000,28000,18000,,2500
";
        let products = load_products_from_reader(data.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);

        let hoodie = &products[0];
        assert_eq!(hoodie.name, "Oversize Hoodie");
        assert_eq!(hoodie.category.as_deref(), Some("Hoodies"));
        assert_eq!(hoodie.default_price, 145_000.0);
        assert_eq!(hoodie.unit_cost(), 60_500.0);
        assert_eq!(hoodie.costs[1].name, "Confección");

        let cargo = &products[1];
        assert_eq!(cargo.category, None);
        assert_eq!(cargo.costs[2].value, 0.0);
    }

    #[test]
    fn test_arbitrary_cost_columns() {
        let data = "name,category,default_price,Lona,Serigrafía\nTote,Bolsos,40000,9000,3500\n";
        let products = load_products_from_reader(data.as_bytes()).unwrap();

        assert_eq!(products[0].costs.len(), 2);
        assert_eq!(products[0].unit_cost(), 12_500.0);
    }

    #[test]
    fn test_bad_amount_is_reported() {
        let data = "name,category,default_price,Tela\nHoodie,,abc,35000\n";
        let err = load_products_from_reader(data.as_bytes()).unwrap_err();

        assert!(matches!(err, StoreError::InvalidInput { .. }));
        assert!(err.to_string().contains("default_price"));
    }

    #[test]
    fn test_short_header_is_rejected() {
        let data = "name,category\nHoodie,Hoodies\n";
        assert!(load_products_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_products_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, "name,category,default_price,Tela\nTee,Camisetas,85000,12000\n").unwrap();

        let products = load_products(&path).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].unit_cost(), 12_000.0);
    }
}
