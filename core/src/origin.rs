//! Origin aggregator — sales grouped by the wine's country and region.
//!
//! Both groupings strictly require the wine side of the join; a sale whose
//! designation is not in the catalog contributes to neither.

use crate::join_index::JoinIndex;
use crate::rank::{FreqTable, Grouped, RankedItem};
use crate::records::Sale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Region rows kept in the region-level summary.
pub const TOP_REGIONS: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub unique_wines: u64,
    pub avg_revenue_per_sale: f64,
    pub top_categories: Vec<RankedItem>,
    pub top_regions: Vec<RankedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSummary {
    /// `"{region}, {country}"` composite display key.
    pub region: String,
    pub country: String,
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_quantity: u64,
    pub avg_revenue_per_sale: f64,
}

/// Per-country sales summary, sorted by revenue descending.
pub fn sales_by_country(sales: &[Sale], index: &JoinIndex<'_>) -> Vec<CountrySummary> {
    struct Acc {
        sales: u64,
        revenue: f64,
        quantity: u64,
        wines: Vec<String>,
        categories: FreqTable,
        regions: FreqTable,
    }

    let mut countries: Grouped<String, Acc> = Grouped::new();
    for sale in sales {
        let Some(wine) = index.wine(&sale.wine_designation) else {
            continue;
        };
        let acc = countries.entry_with(&wine.country, || Acc {
            sales: 0,
            revenue: 0.0,
            quantity: 0,
            wines: Vec::new(),
            categories: FreqTable::new(),
            regions: FreqTable::new(),
        });
        acc.sales += 1;
        acc.revenue += sale.sale_amount;
        acc.quantity += u64::from(sale.quantity);
        if !acc.wines.contains(&wine.wine_designation) {
            acc.wines.push(wine.wine_designation.clone());
        }
        acc.categories.bump(&wine.category);
        acc.regions.bump(&wine.region);
    }

    let mut rows: Vec<CountrySummary> = countries
        .into_entries()
        .into_iter()
        .map(|(country, acc)| CountrySummary {
            country,
            total_sales: acc.sales,
            total_revenue: acc.revenue,
            total_quantity: acc.quantity,
            unique_wines: acc.wines.len() as u64,
            avg_revenue_per_sale: acc.revenue / acc.sales as f64,
            top_categories: acc.categories.top_n(3),
            top_regions: acc.regions.top_n(3),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Independent region-level grouping on the `"{region}, {country}"`
/// composite key. Wines with an empty region are skipped. Sorted by
/// revenue descending, truncated to [`TOP_REGIONS`].
pub fn sales_by_region(sales: &[Sale], index: &JoinIndex<'_>) -> Vec<RegionSummary> {
    struct Acc {
        country: String,
        sales: u64,
        revenue: f64,
        quantity: u64,
    }

    let mut regions: Grouped<String, Acc> = Grouped::new();
    for sale in sales {
        let Some(wine) = index.wine(&sale.wine_designation) else {
            continue;
        };
        if wine.region.is_empty() {
            continue;
        }
        let key = format!("{}, {}", wine.region, wine.country);
        let acc = regions.entry_with(&key, || Acc {
            country: wine.country.clone(),
            sales: 0,
            revenue: 0.0,
            quantity: 0,
        });
        acc.sales += 1;
        acc.revenue += sale.sale_amount;
        acc.quantity += u64::from(sale.quantity);
    }

    let mut rows: Vec<RegionSummary> = regions
        .into_entries()
        .into_iter()
        .map(|(region, acc)| RegionSummary {
            region,
            country: acc.country,
            total_sales: acc.sales,
            total_revenue: acc.revenue,
            total_quantity: acc.quantity,
            avg_revenue_per_sale: acc.revenue / acc.sales as f64,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(TOP_REGIONS);
    rows
}
