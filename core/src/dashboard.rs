//! Dashboard assembly — one pass computing every report section.
//!
//! Pure and idempotent: identical input collections always yield an
//! identical report, so any caching policy (e.g. once per page render)
//! lives entirely with the caller.

use crate::association::{
    category_associations, wine_associations, wine_performance, CategoryAssociationReport,
    WineAssociationReport, WinePerformance,
};
use crate::enrich::enrich_sales;
use crate::error::AnalyticsResult;
use crate::general_stats::{customer_overview, sales_overview, CustomerOverview, SalesOverview};
use crate::join_index::JoinIndex;
use crate::origin::{sales_by_country, sales_by_region, CountrySummary, RegionSummary};
use crate::records::{Customer, EnrichedSale, Location, Sale, Wine};
use crate::segmentation::{
    purchase_profiles, segment_by_age_group, segment_by_gender, segment_by_gender_and_age,
    AgeGroupSegment, CombinedSegment, GenderSegment,
};
use crate::time_series::{
    compare_with_previous_month, monthly_sales, monthly_sales_by_category, monthly_sales_stats,
    sort_monthly, MonthlyCategorySales, MonthlySales, MonthlyStats, SalesComparison,
};
use serde::{Deserialize, Serialize};

/// Wine-performance rows kept in the report's display section.
pub const TOP_PERFORMERS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub customers: CustomerOverview,
    pub sales: SalesOverview,
    /// Monthly revenue buckets, sorted ascending by (year, month).
    pub monthly_sales: Vec<MonthlySales>,
    pub monthly_stats: Vec<MonthlyStats>,
    pub sales_comparison: SalesComparison,
    pub monthly_sales_by_category: Vec<MonthlyCategorySales>,
    pub gender_segments: Vec<GenderSegment>,
    pub age_segments: Vec<AgeGroupSegment>,
    pub combined_segments: Vec<CombinedSegment>,
    pub wine_associations: Vec<WineAssociationReport>,
    pub category_associations: Vec<CategoryAssociationReport>,
    /// Top [`TOP_PERFORMERS`] of the revenue ranking.
    pub wine_performance: Vec<WinePerformance>,
    pub country_summary: Vec<CountrySummary>,
    pub region_summary: Vec<RegionSummary>,
    /// The flattened grid-view rows.
    pub enriched_sales: Vec<EnrichedSale>,
}

impl DashboardReport {
    pub fn compute(
        customers: &[Customer],
        sales: &[Sale],
        wines: &[Wine],
        locations: &[Location],
    ) -> Self {
        let index = JoinIndex::build(customers, wines, locations);
        let enriched = enrich_sales(sales, &index);
        let profiles = purchase_profiles(customers, sales, &index);

        let mut monthly = monthly_sales(sales);
        sort_monthly(&mut monthly);
        let mut stats = monthly_sales_stats(sales);
        stats.sort_by_key(|s| (s.year, s.month));

        let mut performance = wine_performance(sales, &index);
        performance.truncate(TOP_PERFORMERS);

        Self {
            customers: customer_overview(customers),
            sales: sales_overview(sales, &index),
            monthly_sales: monthly,
            monthly_stats: stats,
            sales_comparison: compare_with_previous_month(sales),
            monthly_sales_by_category: monthly_sales_by_category(&enriched),
            gender_segments: segment_by_gender(&profiles),
            age_segments: segment_by_age_group(&profiles),
            combined_segments: segment_by_gender_and_age(&profiles),
            wine_associations: wine_associations(sales, &index),
            category_associations: category_associations(sales, &index),
            wine_performance: performance,
            country_summary: sales_by_country(sales, &index),
            region_summary: sales_by_region(sales, &index),
            enriched_sales: enriched,
        }
    }

    pub fn to_json(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
