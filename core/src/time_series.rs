//! Time-series aggregation — calendar-month buckets over the sale history.

use crate::rank::Grouped;
use crate::records::{EnrichedSale, Sale};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const NOT_ENOUGH_DATA: &str = "Not enough data to compare months";

/// Buckets fewer than this cannot support a month-over-month comparison:
/// the most recent bucket is excluded as still accumulating, and the two
/// before it are compared.
pub const MIN_COMPARISON_BUCKETS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub total_qty: u64,
    pub total_amount: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCategorySales {
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub quantity: u64,
    pub total_amount: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesComparison {
    /// The bucket being evaluated: second-to-last of the ascending series.
    pub current_month: Option<MonthlySales>,
    /// The bucket before it.
    pub previous_month: Option<MonthlySales>,
    pub growth_percentage: Option<f64>,
    pub is_growth: Option<bool>,
    pub message: String,
}

/// Sum of sale amounts per (year, month), in first-encounter order.
/// Callers sort ascending before display; bucketing conserves total
/// revenue.
pub fn monthly_sales(sales: &[Sale]) -> Vec<MonthlySales> {
    let mut buckets: Grouped<(i32, u32), f64> = Grouped::new();
    for sale in sales {
        let key = (sale.sale_date.year(), sale.sale_date.month());
        *buckets.entry_with(&key, || 0.0) += sale.sale_amount;
    }
    buckets
        .into_entries()
        .into_iter()
        .map(|((year, month), total_amount)| MonthlySales {
            year,
            month,
            total_amount,
        })
        .collect()
}

pub fn sort_monthly(buckets: &mut [MonthlySales]) {
    buckets.sort_by_key(|b| (b.year, b.month));
}

/// Per-month quantity, amount, and average unit price.
///
/// Average price is total amount over total quantity for the month (the
/// source's running formula mixed units; see DESIGN.md).
pub fn monthly_sales_stats(sales: &[Sale]) -> Vec<MonthlyStats> {
    let mut buckets: Grouped<(i32, u32), (u64, f64)> = Grouped::new();
    for sale in sales {
        let key = (sale.sale_date.year(), sale.sale_date.month());
        let entry = buckets.entry_with(&key, || (0, 0.0));
        entry.0 += u64::from(sale.quantity);
        entry.1 += sale.sale_amount;
    }
    buckets
        .into_entries()
        .into_iter()
        .map(|((year, month), (total_qty, total_amount))| MonthlyStats {
            year,
            month,
            total_qty,
            total_amount,
            avg_price: if total_qty > 0 {
                total_amount / total_qty as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Compare the second-to-last month against the third-to-last.
///
/// The most recent bucket is deliberately excluded as a still-accumulating
/// partial period. Fewer than [`MIN_COMPARISON_BUCKETS`] distinct months
/// yields the "not enough data" result instead of a percentage.
pub fn compare_with_previous_month(sales: &[Sale]) -> SalesComparison {
    let mut buckets = monthly_sales(sales);
    sort_monthly(&mut buckets);

    if buckets.len() < MIN_COMPARISON_BUCKETS {
        return SalesComparison {
            current_month: buckets.last().cloned(),
            previous_month: None,
            growth_percentage: None,
            is_growth: None,
            message: NOT_ENOUGH_DATA.to_string(),
        };
    }

    let current = buckets[buckets.len() - 2].clone();
    let previous = buckets[buckets.len() - 3].clone();
    let growth = (current.total_amount - previous.total_amount) / previous.total_amount * 100.0;

    let message = if growth > 0.0 {
        format!("The sales have increased by {growth:.2}% compared to last month")
    } else if growth < 0.0 {
        format!(
            "The sales have decreased by {:.2}% compared to last month",
            growth.abs()
        )
    } else {
        "The sales are unchanged compared to last month".to_string()
    };

    SalesComparison {
        current_month: Some(current),
        previous_month: Some(previous),
        growth_percentage: Some(growth),
        is_growth: Some(growth > 0.0),
        message,
    }
}

/// Parse the dd/mm/yyyy display form back into a calendar date.
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

/// Bucket enriched sales by (year, month, category).
///
/// Records whose display date does not parse are skipped, never fatal.
/// Result is sorted by (year, month, category) ascending.
pub fn monthly_sales_by_category(sales: &[EnrichedSale]) -> Vec<MonthlyCategorySales> {
    let mut buckets: Grouped<(i32, u32, String), (u64, f64)> = Grouped::new();
    for sale in sales {
        let Some(date) = parse_display_date(&sale.sale_date) else {
            log::debug!(
                "skipping sale {} with malformed date '{}'",
                sale.sale_id,
                sale.sale_date
            );
            continue;
        };
        let key = (date.year(), date.month(), sale.wine_category.clone());
        let entry = buckets.entry_with(&key, || (0, 0.0));
        entry.0 += u64::from(sale.quantity);
        entry.1 += sale.sale_amount;
    }

    let mut rows: Vec<MonthlyCategorySales> = buckets
        .into_entries()
        .into_iter()
        .map(|((year, month, category), (quantity, total_amount))| MonthlyCategorySales {
            year,
            month,
            category,
            quantity,
            total_amount,
            avg_price: if quantity > 0 {
                total_amount / quantity as f64
            } else {
                0.0
            },
        })
        .collect();
    rows.sort_by(|a, b| {
        (a.year, a.month, a.category.as_str()).cmp(&(b.year, b.month, b.category.as_str()))
    });
    rows
}

/// Drop the first and last bucket of a sorted monthly series — both are
/// partial-period artifacts at the dataset's start and end boundary.
/// Series of two or fewer buckets are returned unchanged.
pub fn trim_boundary_months(buckets: Vec<MonthlySales>) -> Vec<MonthlySales> {
    if buckets.len() <= 2 {
        return buckets;
    }
    let last = buckets.len() - 1;
    buckets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != 0 && *i != last)
        .map(|(_, b)| b)
        .collect()
}
