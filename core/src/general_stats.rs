//! General statistics — scalar summaries over the customer and sale
//! collections.
//!
//! Empty-input policy: customer-side statistics return `None` on an empty
//! collection; `avg_sale_amount` returns 0.0. Both are deliberate,
//! documented edge cases rather than arithmetic surprises.

use crate::join_index::JoinIndex;
use crate::rank::FreqTable;
use crate::records::{Customer, Sale, UNKNOWN};
use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ── Customer statistics ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderPercentages {
    pub men_percentage: f64,
    pub women_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOverview {
    pub total: usize,
    pub avg_age: Option<f64>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub avg_loyalty_points: Option<f64>,
    pub most_common_gender: Option<String>,
    pub men_percentage: f64,
    pub women_percentage: f64,
}

pub fn avg_age(customers: &[Customer]) -> Option<f64> {
    if customers.is_empty() {
        return None;
    }
    let total: u64 = customers.iter().map(|c| u64::from(c.age)).sum();
    Some(round2(total as f64 / customers.len() as f64))
}

pub fn min_age(customers: &[Customer]) -> Option<u32> {
    customers.iter().map(|c| c.age).min()
}

pub fn max_age(customers: &[Customer]) -> Option<u32> {
    customers.iter().map(|c| c.age).max()
}

pub fn avg_loyalty_points(customers: &[Customer]) -> Option<f64> {
    if customers.is_empty() {
        return None;
    }
    let total: f64 = customers.iter().map(|c| c.loyalty_points).sum();
    Some(round2(total / customers.len() as f64))
}

/// The first gender value, in original record order, to reach the maximum
/// count. Ties are NOT resolved alphabetically.
pub fn most_common_gender(customers: &[Customer]) -> Option<String> {
    let mut counts = FreqTable::new();
    for customer in customers {
        counts.bump(&customer.gender);
    }
    counts.most_common().map(str::to_string)
}

/// Share of customers whose gender matches the literal "male" / "female"
/// case-insensitively. Any other value counts toward neither percentage,
/// so the two need not sum to 100.
pub fn gender_percentages(customers: &[Customer]) -> GenderPercentages {
    if customers.is_empty() {
        return GenderPercentages {
            men_percentage: 0.0,
            women_percentage: 0.0,
        };
    }
    let total = customers.len() as f64;
    let men = customers
        .iter()
        .filter(|c| c.gender.eq_ignore_ascii_case("male"))
        .count() as f64;
    let women = customers
        .iter()
        .filter(|c| c.gender.eq_ignore_ascii_case("female"))
        .count() as f64;
    GenderPercentages {
        men_percentage: round2(men / total * 100.0),
        women_percentage: round2(women / total * 100.0),
    }
}

pub fn customer_overview(customers: &[Customer]) -> CustomerOverview {
    let percentages = gender_percentages(customers);
    CustomerOverview {
        total: customers.len(),
        avg_age: avg_age(customers),
        min_age: min_age(customers),
        max_age: max_age(customers),
        avg_loyalty_points: avg_loyalty_points(customers),
        most_common_gender: most_common_gender(customers),
        men_percentage: percentages.men_percentage,
        women_percentage: percentages.women_percentage,
    }
}

// ── Sales statistics ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub name: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverview {
    pub total_sales: usize,
    pub total_revenue: f64,
    pub avg_sale_amount: f64,
    pub best_selling_wine: Option<String>,
    pub worst_selling_wine: Option<String>,
    pub customer_with_highest_purchase: Option<TopCustomer>,
}

/// Dataset-wide revenue; ignores join quality entirely.
pub fn total_revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(|s| s.sale_amount).sum()
}

/// 0.0 on an empty collection, by contract.
pub fn avg_sale_amount(sales: &[Sale]) -> f64 {
    if sales.is_empty() {
        return 0.0;
    }
    total_revenue(sales) / sales.len() as f64
}

/// Summed sale amount per wine designation, in first-encounter order.
fn revenue_by_wine(sales: &[Sale]) -> Vec<(&str, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for sale in sales {
        let designation = sale.wine_designation.as_str();
        if !sums.contains_key(designation) {
            order.push(designation);
        }
        *sums.entry(designation).or_insert(0.0) += sale.sale_amount;
    }
    order
        .into_iter()
        .map(|d| (d, sums.get(d).copied().unwrap_or(0.0)))
        .collect()
}

/// Wine with the highest summed sale amount. Strict `>` against a running
/// maximum starting at 0, so the first designation (in encounter order) to
/// reach the extreme wins ties.
pub fn best_selling_wine(sales: &[Sale]) -> Option<String> {
    let mut best: Option<&str> = None;
    let mut max_total = 0.0f64;
    for (designation, total) in revenue_by_wine(sales) {
        if total > max_total {
            max_total = total;
            best = Some(designation);
        }
    }
    best.map(str::to_string)
}

/// Wine with the lowest summed sale amount. Strict `<` against +∞ means a
/// wine whose sales sum to zero wins over any positive total — "lowest
/// total", not "least popular".
pub fn worst_selling_wine(sales: &[Sale]) -> Option<String> {
    let mut worst: Option<&str> = None;
    let mut min_total = f64::INFINITY;
    for (designation, total) in revenue_by_wine(sales) {
        if total < min_total {
            min_total = total;
            worst = Some(designation);
        }
    }
    worst.map(str::to_string)
}

/// The customer with the highest summed purchase amount, resolved to their
/// display name ("Unknown" when the id has no matching customer row).
pub fn customer_with_highest_purchase(
    sales: &[Sale],
    index: &JoinIndex<'_>,
) -> Option<TopCustomer> {
    let mut order: Vec<CustomerId> = Vec::new();
    let mut sums: HashMap<CustomerId, f64> = HashMap::new();
    for sale in sales {
        if !sums.contains_key(&sale.customer_id) {
            order.push(sale.customer_id);
        }
        *sums.entry(sale.customer_id).or_insert(0.0) += sale.sale_amount;
    }

    let mut top: Option<CustomerId> = None;
    let mut max_total = 0.0f64;
    for id in order {
        let total = sums.get(&id).copied().unwrap_or(0.0);
        if total > max_total {
            max_total = total;
            top = Some(id);
        }
    }

    top.map(|id| TopCustomer {
        name: index
            .customer(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        total_amount: max_total,
    })
}

pub fn sales_overview(sales: &[Sale], index: &JoinIndex<'_>) -> SalesOverview {
    SalesOverview {
        total_sales: sales.len(),
        total_revenue: total_revenue(sales),
        avg_sale_amount: avg_sale_amount(sales),
        best_selling_wine: best_selling_wine(sales),
        worst_selling_wine: worst_selling_wine(sales),
        customer_with_highest_purchase: customer_with_highest_purchase(sales, index),
    }
}
