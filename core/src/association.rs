//! Association engine — market-basket analysis over co-purchased wines.
//!
//! A customer's basket is the set of distinct wine designations they ever
//! purchased; repeat purchases collapse to membership. Pair counts are
//! stored directionally so that confidence can be asymmetric:
//! confidence(A→B) = customers who bought both / customers who bought A.

use crate::join_index::JoinIndex;
use crate::rank::{FreqTable, Grouped};
use crate::records::{Sale, UNKNOWN};
use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Base wines bought by fewer distinct customers than this are not
/// reported — their confidence figures are statistically meaningless.
pub const MIN_SUPPORT: u64 = 3;

/// Associated wines kept per qualifying base wine.
pub const TOP_ASSOCIATIONS: usize = 5;

/// Base wines kept in the final association report.
pub const TOP_BASE_WINES: usize = 50;

/// Associated categories kept per base category.
pub const TOP_CATEGORY_ASSOCIATIONS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineAssociation {
    pub associated_wine: String,
    pub associated_category: String,
    pub associated_country: String,
    /// Distinct customers who bought both wines.
    pub count: u64,
    /// `count / support(base) × 100`, always in [0, 100].
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineAssociationReport {
    pub wine: String,
    pub wine_category: String,
    pub wine_country: String,
    /// Support: distinct customers who bought the base wine at all.
    pub total_customers: u64,
    pub associations: Vec<WineAssociation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssociation {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAssociationReport {
    pub category: String,
    pub associations: Vec<CategoryAssociation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinePerformance {
    pub wine: String,
    pub category: String,
    pub country: String,
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub unique_customers: u64,
    pub avg_sale_amount: f64,
}

/// Per-customer distinct designation sets, insertion-ordered both across
/// customers and within each basket.
fn baskets(sales: &[Sale]) -> Grouped<CustomerId, Vec<String>> {
    let mut baskets: Grouped<CustomerId, Vec<String>> = Grouped::new();
    for sale in sales {
        let basket = baskets.entry_with(&sale.customer_id, Vec::new);
        if !basket.iter().any(|d| d == &sale.wine_designation) {
            basket.push(sale.wine_designation.clone());
        }
    }
    baskets
}

/// Directed co-purchase counts and per-item support over a set of baskets.
fn pair_counts(baskets: &Grouped<CustomerId, Vec<String>>) -> (Grouped<String, FreqTable>, FreqTable) {
    let mut pairs: Grouped<String, FreqTable> = Grouped::new();
    let mut support = FreqTable::new();
    for (_, basket) in baskets.iter() {
        for item in basket {
            support.bump(item);
        }
        for (i, a) in basket.iter().enumerate() {
            let assoc = pairs.entry_with(a, FreqTable::new);
            for (j, b) in basket.iter().enumerate() {
                if i != j {
                    assoc.bump(b);
                }
            }
        }
    }
    (pairs, support)
}

/// Pairwise wine associations with support and confidence scoring.
///
/// Qualifying base wines (support ≥ [`MIN_SUPPORT`], at least one
/// association) are ranked by support descending, ties in encounter
/// order, and truncated to [`TOP_BASE_WINES`].
pub fn wine_associations(sales: &[Sale], index: &JoinIndex<'_>) -> Vec<WineAssociationReport> {
    let baskets = baskets(sales);
    let (pairs, support) = pair_counts(&baskets);

    let mut reports: Vec<WineAssociationReport> = Vec::new();
    for (wine, assoc) in pairs.iter() {
        let wine_customers = support.count(wine);
        if wine_customers < MIN_SUPPORT {
            continue;
        }

        let mut associations: Vec<WineAssociation> = assoc
            .iter()
            .map(|(associated, count)| {
                let info = index.wine(associated);
                WineAssociation {
                    associated_wine: associated.to_string(),
                    associated_category: info
                        .map(|w| w.category.clone())
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    associated_country: info
                        .map(|w| w.country.clone())
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    count,
                    confidence: count as f64 / wine_customers as f64 * 100.0,
                }
            })
            .collect();
        associations.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        associations.truncate(TOP_ASSOCIATIONS);

        if associations.is_empty() {
            continue;
        }

        let info = index.wine(wine);
        reports.push(WineAssociationReport {
            wine: wine.to_string(),
            wine_category: info
                .map(|w| w.category.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            wine_country: info
                .map(|w| w.country.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            total_customers: wine_customers,
            associations,
        });
    }

    reports.sort_by(|a, b| b.total_customers.cmp(&a.total_customers));
    reports.truncate(TOP_BASE_WINES);
    reports
}

/// The same pairwise algorithm one level up, over distinct categories per
/// customer. No support threshold; top 3 associations per category;
/// result ordered by summed association count descending.
pub fn category_associations(
    sales: &[Sale],
    index: &JoinIndex<'_>,
) -> Vec<CategoryAssociationReport> {
    let wine_baskets = baskets(sales);

    let mut category_baskets: Grouped<CustomerId, Vec<String>> = Grouped::new();
    for (customer_id, basket) in wine_baskets.iter() {
        let categories = category_baskets.entry_with(customer_id, Vec::new);
        for designation in basket {
            let Some(wine) = index.wine(designation) else {
                continue;
            };
            if !categories.iter().any(|c| c == &wine.category) {
                categories.push(wine.category.clone());
            }
        }
    }

    let (pairs, _) = pair_counts(&category_baskets);

    let mut reports: Vec<CategoryAssociationReport> = pairs
        .iter()
        .map(|(category, assoc)| CategoryAssociationReport {
            category: category.clone(),
            associations: assoc
                .top_n(TOP_CATEGORY_ASSOCIATIONS)
                .into_iter()
                .map(|item| CategoryAssociation {
                    category: item.name,
                    count: item.count,
                })
                .collect(),
        })
        .collect();

    reports.sort_by_key(|r| {
        std::cmp::Reverse(r.associations.iter().map(|a| a.count).sum::<u64>())
    });
    reports
}

/// Revenue-ranked per-wine sales metrics. The full ranked list; callers
/// truncate for display.
pub fn wine_performance(sales: &[Sale], index: &JoinIndex<'_>) -> Vec<WinePerformance> {
    struct Acc {
        sales: u64,
        revenue: f64,
        quantity: u64,
        customers: Vec<CustomerId>,
    }

    let mut stats: Grouped<String, Acc> = Grouped::new();
    for sale in sales {
        let acc = stats.entry_with(&sale.wine_designation, || Acc {
            sales: 0,
            revenue: 0.0,
            quantity: 0,
            customers: Vec::new(),
        });
        acc.sales += 1;
        acc.revenue += sale.sale_amount;
        acc.quantity += u64::from(sale.quantity);
        if !acc.customers.contains(&sale.customer_id) {
            acc.customers.push(sale.customer_id);
        }
    }

    let mut rows: Vec<WinePerformance> = stats
        .into_entries()
        .into_iter()
        .map(|(wine, acc)| {
            let info = index.wine(&wine);
            WinePerformance {
                category: info
                    .map(|w| w.category.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                country: info
                    .map(|w| w.country.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                wine,
                total_sales: acc.sales,
                total_revenue: acc.revenue,
                total_quantity: acc.quantity,
                unique_customers: acc.customers.len() as u64,
                avg_sale_amount: acc.revenue / acc.sales as f64,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
    });
    rows
}
