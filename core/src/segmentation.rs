//! Segmentation engine — demographic groupings with wine-preference
//! profiles.
//!
//! Works over the customer × sale × wine join: each customer is paired
//! with the wines they purchased (one entry per sale line, duplicates
//! kept), then grouped by gender, age band, and gender × age band.
//! Customers with no resolved purchase still belong to their segment,
//! just with an empty preference profile. Sales whose customer or wine
//! does not resolve contribute no preference counts — that accounting
//! strictly requires both sides of the join.

use crate::join_index::JoinIndex;
use crate::rank::{FreqTable, Grouped, RankedItem};
use crate::records::{Customer, Sale, Wine};
use crate::types::CustomerId;
use serde::{Deserialize, Serialize};

/// (min, max, label) — inclusive on both ends; a customer matching no band
/// is silently excluded. 55 lands in "46-55", the first matching band.
const AGE_BANDS: [(u32, u32, &str); 5] = [
    (18, 25, "18-25"),
    (26, 35, "26-35"),
    (36, 45, "36-45"),
    (46, 55, "46-55"),
    (55, 150, "55+"),
];

/// Coarser bands for the combined gender × age view.
const COARSE_AGE_BANDS: [(u32, u32, &str); 3] = [
    (18, 35, "18-35"),
    (36, 55, "36-55"),
    (55, 150, "55+"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderSegment {
    pub gender: String,
    pub customer_count: u64,
    pub top_categories: Vec<RankedItem>,
    pub top_varieties: Vec<RankedItem>,
    pub top_countries: Vec<RankedItem>,
    pub top_price_ranges: Vec<RankedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeGroupSegment {
    pub age_group: String,
    pub customer_count: u64,
    /// Integer-rounded mean age of the band's customers; 0 when empty.
    pub avg_age: u32,
    pub top_categories: Vec<RankedItem>,
    pub top_varieties: Vec<RankedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedSegment {
    /// `"{gender} ({band})"`, e.g. `"Female (36-55)"`.
    pub segment: String,
    pub customer_count: u64,
    pub top_categories: Vec<RankedItem>,
    pub top_varieties: Vec<RankedItem>,
}

/// One customer with every wine line they purchased.
pub struct PurchaseProfile<'a> {
    pub customer: &'a Customer,
    pub wines: Vec<&'a Wine>,
}

/// Pair every customer (in record order) with their resolved wine lines.
/// Sales referencing an unknown customer or wine add nothing.
pub fn purchase_profiles<'a>(
    customers: &'a [Customer],
    sales: &[Sale],
    index: &JoinIndex<'a>,
) -> Vec<PurchaseProfile<'a>> {
    let mut profiles: Grouped<CustomerId, PurchaseProfile<'a>> = Grouped::new();
    for customer in customers {
        profiles.entry_with(&customer.id, || PurchaseProfile {
            customer,
            wines: Vec::new(),
        });
    }
    for sale in sales {
        let Some(wine) = index.wine(&sale.wine_designation) else {
            continue;
        };
        let Some(customer) = index.customer(sale.customer_id) else {
            continue;
        };
        profiles
            .entry_with(&sale.customer_id, || PurchaseProfile {
                customer,
                wines: Vec::new(),
            })
            .wines
            .push(wine);
    }
    profiles.into_entries().into_iter().map(|(_, p)| p).collect()
}

fn band_for(age: u32, bands: &'static [(u32, u32, &str)]) -> Option<&'static str> {
    bands
        .iter()
        .find(|(min, max, _)| age >= *min && age <= *max)
        .map(|(_, _, label)| *label)
}

struct PreferenceCounts {
    customers: u64,
    total_age: u64,
    categories: FreqTable,
    varieties: FreqTable,
    countries: FreqTable,
    price_ranges: FreqTable,
}

impl PreferenceCounts {
    fn new() -> Self {
        Self {
            customers: 0,
            total_age: 0,
            categories: FreqTable::new(),
            varieties: FreqTable::new(),
            countries: FreqTable::new(),
            price_ranges: FreqTable::new(),
        }
    }

    fn add(&mut self, profile: &PurchaseProfile<'_>) {
        self.customers += 1;
        self.total_age += u64::from(profile.customer.age);
        for wine in &profile.wines {
            self.categories.bump(&wine.category);
            self.varieties.bump(&wine.grape_variety);
            self.countries.bump(&wine.country);
            self.price_ranges.bump(&wine.price_range);
        }
    }

    fn avg_age(&self) -> u32 {
        if self.customers == 0 {
            return 0;
        }
        (self.total_age as f64 / self.customers as f64).round() as u32
    }
}

/// Group purchasing customers by their exact gender string.
pub fn segment_by_gender(profiles: &[PurchaseProfile<'_>]) -> Vec<GenderSegment> {
    let mut segments: Grouped<String, PreferenceCounts> = Grouped::new();
    for profile in profiles {
        segments
            .entry_with(&profile.customer.gender, PreferenceCounts::new)
            .add(profile);
    }
    segments
        .into_entries()
        .into_iter()
        .map(|(gender, counts)| GenderSegment {
            gender,
            customer_count: counts.customers,
            top_categories: counts.categories.top_n(5),
            top_varieties: counts.varieties.top_n(5),
            top_countries: counts.countries.top_n(3),
            top_price_ranges: counts.price_ranges.top_n(3),
        })
        .collect()
}

/// Group purchasing customers into the five fixed age bands. Every band is
/// emitted, empty or not; under-18 customers appear in none.
pub fn segment_by_age_group(profiles: &[PurchaseProfile<'_>]) -> Vec<AgeGroupSegment> {
    let mut segments: Grouped<&'static str, PreferenceCounts> = Grouped::new();
    for (_, _, label) in &AGE_BANDS {
        segments.entry_with(label, PreferenceCounts::new);
    }
    for profile in profiles {
        if let Some(label) = band_for(profile.customer.age, &AGE_BANDS) {
            segments.entry_with(&label, PreferenceCounts::new).add(profile);
        }
    }
    segments
        .into_entries()
        .into_iter()
        .map(|(label, counts)| AgeGroupSegment {
            age_group: label.to_string(),
            customer_count: counts.customers,
            avg_age: counts.avg_age(),
            top_categories: counts.categories.top_n(5),
            top_varieties: counts.varieties.top_n(5),
        })
        .collect()
}

/// Group by gender and coarse age band combined. Only segments with at
/// least one customer are emitted.
pub fn segment_by_gender_and_age(profiles: &[PurchaseProfile<'_>]) -> Vec<CombinedSegment> {
    let mut segments: Grouped<String, PreferenceCounts> = Grouped::new();
    for profile in profiles {
        let Some(label) = band_for(profile.customer.age, &COARSE_AGE_BANDS) else {
            continue;
        };
        let key = format!("{} ({label})", profile.customer.gender);
        segments.entry_with(&key, PreferenceCounts::new).add(profile);
    }
    segments
        .into_entries()
        .into_iter()
        .map(|(segment, counts)| CombinedSegment {
            segment,
            customer_count: counts.customers,
            top_categories: counts.categories.top_n(3),
            top_varieties: counts.varieties.top_n(3),
        })
        .collect()
}
