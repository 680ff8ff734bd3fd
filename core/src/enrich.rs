//! Sale enrichment — the flattened base records of the grid view and the
//! monthly-category aggregation.

use crate::join_index::JoinIndex;
use crate::records::{
    EnrichedSale, Sale, NO_LOCATION, UNKNOWN_CATEGORY, UNKNOWN_CUSTOMER,
};

/// dd/mm/yyyy — the display form of a sale date.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Flatten each sale with its joined customer, wine, and location fields.
///
/// Unresolved joins produce the display sentinels; every input sale yields
/// exactly one enriched row regardless of join quality, so dataset-wide
/// totals over the output match totals over the input.
pub fn enrich_sales(sales: &[Sale], index: &JoinIndex<'_>) -> Vec<EnrichedSale> {
    sales
        .iter()
        .map(|sale| {
            let customer = index.customer(sale.customer_id);
            let wine = index.wine(&sale.wine_designation);
            let location = customer.and_then(|c| index.location_for(c));

            EnrichedSale {
                sale_id: sale.sale_id,
                customer_name: customer
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
                wine_designation: sale.wine_designation.clone(),
                quantity: sale.quantity,
                sale_amount: sale.sale_amount,
                sale_date: sale.sale_date.format(DISPLAY_DATE_FORMAT).to_string(),
                wine_category: wine
                    .map(|w| w.category.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                wine_country: wine
                    .map(|w| w.country.clone())
                    .unwrap_or_else(|| NO_LOCATION.to_string()),
                customer_country: location
                    .map(|l| l.country.clone())
                    .unwrap_or_else(|| NO_LOCATION.to_string()),
                customer_state: location
                    .map(|l| l.state.clone())
                    .unwrap_or_else(|| NO_LOCATION.to_string()),
            }
        })
        .collect()
}
