use vinalytics_core::enrich::enrich_sales;
use vinalytics_core::join_index::{extract_postal_code, JoinIndex};
use vinalytics_core::records::{Customer, Location, Sale, Wine};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_customer(id: i64, name: &str, address: &str) -> Customer {
    Customer {
        id,
        name: name.into(),
        email: format!("{name}@example.com"),
        phone: "555-0100".into(),
        address: address.into(),
        age: 40,
        gender: "Female".into(),
        purchase_history: vec![],
        loyalty_points: 10.0,
    }
}

fn make_wine(designation: &str, category: &str, country: &str) -> Wine {
    Wine {
        id: 1,
        wine_designation: designation.into(),
        category: category.into(),
        country: country.into(),
        region: "Rioja".into(),
        grape_variety: "Tempranillo".into(),
        year: 2018,
        alcohol_content: 13.5,
        bottle_size: "750ml".into(),
        price_range: "20-30".into(),
    }
}

fn make_location(postal_code: &str, country: &str, state: &str) -> Location {
    Location {
        postal_code: postal_code.into(),
        country: country.into(),
        state: state.into(),
        city: "Springfield".into(),
    }
}

fn make_sale(sale_id: i64, customer_id: i64, designation: &str) -> Sale {
    Sale {
        sale_id,
        customer_id,
        wine_designation: designation.into(),
        quantity: 2,
        sale_amount: 45.0,
        sale_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    }
}

// ── Postal code extraction ───────────────────────────────────────────────────

/// A standalone 5-digit run anywhere in the address is the postal code.
#[test]
fn postal_code_found_in_free_text() {
    assert_eq!(
        extract_postal_code("123 Main St, 90210 Springfield"),
        Some("90210")
    );
}

#[test]
fn postal_code_absent_yields_none() {
    assert_eq!(extract_postal_code("no digits here"), None);
    assert_eq!(extract_postal_code(""), None);
}

/// 4- and 6-digit runs are not postal codes — the match must be exactly
/// five digits wide with boundaries on both sides.
#[test]
fn postal_code_requires_exactly_five_digits() {
    assert_eq!(extract_postal_code("PO 1234"), None);
    assert_eq!(extract_postal_code("serial 123456 inside"), None);
}

/// With several candidates the first one wins.
#[test]
fn postal_code_takes_first_of_multiple() {
    assert_eq!(
        extract_postal_code("11111 then 22222"),
        Some("11111")
    );
}

// ── Lookup maps ──────────────────────────────────────────────────────────────

#[test]
fn index_resolves_customers_wines_and_locations() {
    let customers = vec![make_customer(1, "Ada", "1 Elm St 90210")];
    let wines = vec![make_wine("Gran Reserva", "Red", "Spain")];
    let locations = vec![make_location("90210", "USA", "CA")];
    let index = JoinIndex::build(&customers, &wines, &locations);

    assert_eq!(index.customer(1).map(|c| c.name.as_str()), Some("Ada"));
    assert!(index.customer(99).is_none());
    assert_eq!(
        index.wine("Gran Reserva").map(|w| w.country.as_str()),
        Some("Spain")
    );
    assert_eq!(
        index.location("90210").map(|l| l.state.as_str()),
        Some("CA")
    );
}

/// The wine business key is the designation string, matched exactly.
#[test]
fn wine_lookup_is_case_sensitive() {
    let wines = vec![make_wine("Gran Reserva", "Red", "Spain")];
    let index = JoinIndex::build(&[], &wines, &[]);

    assert!(index.wine("Gran Reserva").is_some());
    assert!(index.wine("gran reserva").is_none());
    assert!(index.wine("GRAN RESERVA").is_none());
}

/// Duplicate keys should not occur, but when they do the last row wins.
#[test]
fn duplicate_designation_last_write_wins() {
    let wines = vec![
        make_wine("Twin", "Red", "Spain"),
        make_wine("Twin", "White", "France"),
    ];
    let index = JoinIndex::build(&[], &wines, &[]);

    assert_eq!(
        index.wine("Twin").map(|w| w.category.as_str()),
        Some("White")
    );
}

#[test]
fn location_for_resolves_through_the_address() {
    let customers = vec![
        make_customer(1, "Ada", "1 Elm St 90210"),
        make_customer(2, "Bo", "no code at all"),
        make_customer(3, "Cy", "2 Oak St 11111"),
    ];
    let locations = vec![make_location("90210", "USA", "CA")];
    let index = JoinIndex::build(&customers, &[], &locations);

    assert!(index.location_for(&customers[0]).is_some());
    // No postal code in the address.
    assert!(index.location_for(&customers[1]).is_none());
    // Postal code extracted but no matching location row.
    assert!(index.location_for(&customers[2]).is_none());
}

// ── Enrichment ───────────────────────────────────────────────────────────────

#[test]
fn enriched_sale_carries_joined_display_fields() {
    let customers = vec![make_customer(1, "Ada", "1 Elm St 90210")];
    let wines = vec![make_wine("Gran Reserva", "Red", "Spain")];
    let locations = vec![make_location("90210", "USA", "CA")];
    let index = JoinIndex::build(&customers, &wines, &locations);

    let sales = vec![make_sale(10, 1, "Gran Reserva")];
    let enriched = enrich_sales(&sales, &index);

    assert_eq!(enriched.len(), 1);
    let row = &enriched[0];
    assert_eq!(row.customer_name, "Ada");
    assert_eq!(row.wine_category, "Red");
    assert_eq!(row.wine_country, "Spain");
    assert_eq!(row.customer_country, "USA");
    assert_eq!(row.customer_state, "CA");
    assert_eq!(row.sale_date, "05/01/2024");
}

/// A sale referencing a missing wine still produces a row; its descriptive
/// fields fall back to the sentinels and the amounts stay countable.
#[test]
fn unresolved_wine_yields_sentinels_not_failure() {
    let customers = vec![make_customer(1, "Ada", "1 Elm St")];
    let index = JoinIndex::build(&customers, &[], &[]);

    let sales = vec![make_sale(10, 1, "Ghost Wine")];
    let enriched = enrich_sales(&sales, &index);

    let row = &enriched[0];
    assert_eq!(row.wine_category, "Unknown Category");
    assert_eq!(row.wine_country, "-");
    assert_eq!(row.sale_amount, 45.0);
    assert_eq!(row.quantity, 2);
}

#[test]
fn unresolved_customer_yields_unknown_customer() {
    let wines = vec![make_wine("Gran Reserva", "Red", "Spain")];
    let index = JoinIndex::build(&[], &wines, &[]);

    let enriched = enrich_sales(&[make_sale(10, 77, "Gran Reserva")], &index);

    assert_eq!(enriched[0].customer_name, "Unknown Customer");
    assert_eq!(enriched[0].customer_country, "-");
    assert_eq!(enriched[0].customer_state, "-");
}
