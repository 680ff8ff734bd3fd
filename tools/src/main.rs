//! report-runner: headless loader + report printer for the wine dashboard.
//!
//! Owns everything the core treats as external: reading the four delimited
//! source files, auto-detecting the delimiter, coercing loosely typed cells
//! into the typed records, then computing the full dashboard report and
//! printing it as JSON.
//!
//! Usage:
//!   report-runner --data-dir ./data

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use vinalytics_core::{Customer, DashboardReport, Location, Sale, Wine};

const CUSTOMERS_FILE: &str = "Customers_Dataset.csv";
const SALES_FILE: &str = "Sales_Data_Dataset.csv";
const WINES_FILE: &str = "Wine_Dataset.csv";
const ZIPCODES_FILE: &str = "ZipCodes_Dataset.csv";

/// Delimiters we guess between, by counting occurrences in the header row.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

// ── Raw rows (source column names, loosely typed) ────────────────────────────

#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(rename = "CustomerID")]
    customer_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "Phone", default)]
    phone: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Gender", default)]
    gender: String,
    #[serde(rename = "PurchaseHistory", default)]
    purchase_history: String,
    #[serde(rename = "LoyaltyPoints", default)]
    loyalty_points: String,
}

#[derive(Debug, Deserialize)]
struct SaleRow {
    #[serde(rename = "SaleID")]
    sale_id: String,
    #[serde(rename = "CustomerID")]
    customer_id: String,
    #[serde(rename = "WineDesignation")]
    wine_designation: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "SaleAmount")]
    sale_amount: String,
    #[serde(rename = "SaleDate")]
    sale_date: String,
}

#[derive(Debug, Deserialize)]
struct WineRow {
    #[serde(rename = "WineID")]
    wine_id: String,
    #[serde(rename = "WineDesignation")]
    wine_designation: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "CountryOfOrigin", default)]
    country: String,
    #[serde(rename = "Region", default)]
    region: String,
    #[serde(rename = "GrapeVariety", default)]
    grape_variety: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "AlcoholContent", default)]
    alcohol_content: String,
    #[serde(rename = "BottleSize", default)]
    bottle_size: String,
    #[serde(rename = "PriceRange", default)]
    price_range: String,
}

#[derive(Debug, Deserialize)]
struct ZipCodeRow {
    #[serde(rename = "ZipCode")]
    zip_code: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Region", default)]
    region: String,
    #[serde(rename = "City", default)]
    city: String,
}

// ── Loader ───────────────────────────────────────────────────────────────────

fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    // max_by_key keeps the last maximum, so scan in reverse preference
    // order; a tie (or an empty header) falls back to the comma.
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .rev()
        .max_by_key(|d| header.bytes().filter(|b| b == d).count())
        .unwrap_or(b',')
}

fn read_rows<T: for<'de> Deserialize<'de>>(dir: &Path, filename: &str) -> Result<Vec<T>> {
    let path = dir.join(filename);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let delimiter = detect_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("{filename}: skipping row {}: {e}", line + 2),
        }
    }
    Ok(rows)
}

/// Dates arrive as yyyy-mm-dd or dd/mm/yyyy depending on the export.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

fn split_history(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

fn load_customers(dir: &Path) -> Result<Vec<Customer>> {
    let rows: Vec<CustomerRow> = read_rows(dir, CUSTOMERS_FILE)?;
    let mut customers = Vec::with_capacity(rows.len());
    for row in rows {
        let (Ok(id), Ok(age)) = (row.customer_id.parse(), row.age.parse()) else {
            log::warn!("{CUSTOMERS_FILE}: skipping customer '{}'", row.name);
            continue;
        };
        customers.push(Customer {
            id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            age,
            gender: row.gender,
            purchase_history: split_history(&row.purchase_history),
            loyalty_points: row.loyalty_points.parse().unwrap_or(0.0),
        });
    }
    Ok(customers)
}

fn load_sales(dir: &Path) -> Result<Vec<Sale>> {
    let rows: Vec<SaleRow> = read_rows(dir, SALES_FILE)?;
    let mut sales = Vec::with_capacity(rows.len());
    for row in rows {
        let parsed = (
            row.sale_id.parse(),
            row.customer_id.parse(),
            row.quantity.parse(),
            row.sale_amount.parse(),
            parse_date(&row.sale_date),
        );
        let (Ok(sale_id), Ok(customer_id), Ok(quantity), Ok(sale_amount), Some(sale_date)) =
            parsed
        else {
            log::warn!("{SALES_FILE}: skipping sale row '{}'", row.sale_id);
            continue;
        };
        sales.push(Sale {
            sale_id,
            customer_id,
            wine_designation: row.wine_designation,
            quantity,
            sale_amount,
            sale_date,
        });
    }
    Ok(sales)
}

fn load_wines(dir: &Path) -> Result<Vec<Wine>> {
    let rows: Vec<WineRow> = read_rows(dir, WINES_FILE)?;
    let mut wines = Vec::with_capacity(rows.len());
    for row in rows {
        let Ok(id) = row.wine_id.parse() else {
            log::warn!("{WINES_FILE}: skipping wine '{}'", row.wine_designation);
            continue;
        };
        wines.push(Wine {
            id,
            wine_designation: row.wine_designation,
            category: row.category,
            country: row.country,
            region: row.region,
            grape_variety: row.grape_variety,
            year: row.year.parse().unwrap_or(0),
            alcohol_content: row.alcohol_content.parse().unwrap_or(0.0),
            bottle_size: row.bottle_size,
            price_range: row.price_range,
        });
    }
    Ok(wines)
}

fn load_locations(dir: &Path) -> Result<Vec<Location>> {
    let rows: Vec<ZipCodeRow> = read_rows(dir, ZIPCODES_FILE)?;
    Ok(rows
        .into_iter()
        .map(|row| Location {
            postal_code: row.zip_code,
            country: row.country,
            state: row.region,
            city: row.city,
        })
        .collect())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let dir = Path::new(data_dir);

    let customers = load_customers(dir)?;
    let sales = load_sales(dir)?;
    let wines = load_wines(dir)?;
    let locations = load_locations(dir)?;

    log::info!(
        "loaded {} customers, {} sales, {} wines, {} locations from {}",
        customers.len(),
        sales.len(),
        wines.len(),
        locations.len(),
        dir.display(),
    );

    let report = DashboardReport::compute(&customers, &sales, &wines, &locations);
    println!("{}", report.to_json()?);

    Ok(())
}
