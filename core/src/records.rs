//! Typed domain records.
//!
//! All four collections are produced once per load cycle by the external
//! loader and never mutated afterwards. The core receives them fully
//! materialized and performs no I/O of its own.

use crate::types::{CustomerId, SaleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display sentinel for a sale whose customer id resolves to nothing.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
/// Display sentinel for a sale whose wine designation resolves to nothing.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
/// Generic sentinel used where a joined descriptive field is missing.
pub const UNKNOWN: &str = "Unknown";
/// Sentinel for unresolved location fields.
pub const NO_LOCATION: &str = "-";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free text; may embed a 5-digit postal code used for the location join.
    pub address: String,
    pub age: u32,
    /// Free-form as provided by the source; grouping is case-sensitive.
    pub gender: String,
    pub purchase_history: Vec<String>,
    pub loyalty_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: SaleId,
    /// May reference a customer absent from the customer collection.
    pub customer_id: CustomerId,
    /// May reference a wine absent from the wine catalog.
    pub wine_designation: String,
    pub quantity: u32,
    pub sale_amount: f64,
    pub sale_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wine {
    pub id: i64,
    /// The unique business key. All joins use this exact string, not `id`.
    pub wine_designation: String,
    pub category: String,
    pub country: String,
    pub region: String,
    pub grape_variety: String,
    pub year: i32,
    pub alcohol_content: f64,
    pub bottle_size: String,
    pub price_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub postal_code: String,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// A sale flattened with its joined display fields.
///
/// Unresolved joins fall back to the sentinels above instead of failing;
/// the sale itself still participates in every dataset-wide total.
/// `sale_date` carries the dd/mm/yyyy display form used by the grid view
/// and re-parsed by the monthly-category aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSale {
    pub sale_id: SaleId,
    pub customer_name: String,
    pub wine_designation: String,
    pub quantity: u32,
    pub sale_amount: f64,
    pub sale_date: String,
    pub wine_category: String,
    pub wine_country: String,
    pub customer_country: String,
    pub customer_state: String,
}
