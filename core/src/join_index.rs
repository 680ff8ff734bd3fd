//! Join Index Builder.
//!
//! Builds the three lookup maps every downstream aggregator shares:
//! customer id → customer, wine designation → wine, postal code → location.
//! Built once per report computation, read-only afterwards.

use crate::records::{Customer, Location, Wine};
use crate::types::CustomerId;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn postal_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{5}\b").expect("postal code pattern is valid"))
}

/// First contiguous standalone 5-digit run in a free-text address.
///
/// No match yields `None`, never an error. When the address contains more
/// than one candidate the first one is taken.
pub fn extract_postal_code(address: &str) -> Option<&str> {
    postal_code_re().find(address).map(|m| m.as_str())
}

pub struct JoinIndex<'a> {
    customers: HashMap<CustomerId, &'a Customer>,
    wines: HashMap<&'a str, &'a Wine>,
    locations: HashMap<&'a str, &'a Location>,
}

impl<'a> JoinIndex<'a> {
    /// Build the lookup maps. Keys are expected to be unique within each
    /// collection; on a duplicate the last row wins.
    pub fn build(
        customers: &'a [Customer],
        wines: &'a [Wine],
        locations: &'a [Location],
    ) -> Self {
        let customers: HashMap<CustomerId, &Customer> =
            customers.iter().map(|c| (c.id, c)).collect();
        let wines: HashMap<&str, &Wine> = wines
            .iter()
            .map(|w| (w.wine_designation.as_str(), w))
            .collect();
        let locations: HashMap<&str, &Location> = locations
            .iter()
            .map(|l| (l.postal_code.as_str(), l))
            .collect();
        Self {
            customers,
            wines,
            locations,
        }
    }

    pub fn customer(&self, id: CustomerId) -> Option<&'a Customer> {
        self.customers.get(&id).copied()
    }

    /// Wine lookup is by the exact designation string, case-sensitively.
    pub fn wine(&self, designation: &str) -> Option<&'a Wine> {
        self.wines.get(designation).copied()
    }

    pub fn location(&self, postal_code: &str) -> Option<&'a Location> {
        self.locations.get(postal_code).copied()
    }

    /// Resolve a customer's location through the postal code embedded in
    /// their address. Either missing link leaves the join unresolved.
    pub fn location_for(&self, customer: &Customer) -> Option<&'a Location> {
        let code = extract_postal_code(&customer.address)?;
        self.location(code)
    }
}
