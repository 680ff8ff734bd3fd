use chrono::NaiveDate;
use vinalytics_core::records::{Customer, Location, Sale, Wine};
use vinalytics_core::time_series::NOT_ENOUGH_DATA;
use vinalytics_core::DashboardReport;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_customer(id: i64, name: &str, age: u32, gender: &str, address: &str) -> Customer {
    Customer {
        id,
        name: name.into(),
        email: format!("{name}@example.com"),
        phone: "555-0100".into(),
        address: address.into(),
        age,
        gender: gender.into(),
        purchase_history: vec![],
        loyalty_points: 100.0,
    }
}

fn make_wine(id: i64, designation: &str, category: &str, country: &str, region: &str) -> Wine {
    Wine {
        id,
        wine_designation: designation.into(),
        category: category.into(),
        country: country.into(),
        region: region.into(),
        grape_variety: "Merlot".into(),
        year: 2019,
        alcohol_content: 13.0,
        bottle_size: "750ml".into(),
        price_range: "10-20".into(),
    }
}

fn make_sale(sale_id: i64, customer_id: i64, designation: &str, amount: f64, date: (i32, u32, u32)) -> Sale {
    Sale {
        sale_id,
        customer_id,
        wine_designation: designation.into(),
        quantity: 1,
        sale_amount: amount,
        sale_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
}

fn fixture() -> (Vec<Customer>, Vec<Sale>, Vec<Wine>, Vec<Location>) {
    let customers = vec![
        make_customer(1, "Ada", 30, "Female", "1 Elm St 90210"),
        make_customer(2, "Bo", 62, "Male", "2 Oak St"),
    ];
    let wines = vec![
        make_wine(1, "Rioja Alta", "Red", "Spain", "Rioja"),
        make_wine(2, "Albariño", "White", "Spain", "Rías Baixas"),
    ];
    let sales = vec![
        make_sale(1, 1, "Rioja Alta", 60.0, (2024, 1, 5)),
        make_sale(2, 1, "Albariño", 30.0, (2024, 2, 10)),
        make_sale(3, 2, "Rioja Alta", 90.0, (2024, 3, 15)),
        make_sale(4, 2, "Ghost Wine", 10.0, (2024, 3, 20)),
    ];
    let locations = vec![Location {
        postal_code: "90210".into(),
        country: "USA".into(),
        state: "CA".into(),
        city: "Beverly Hills".into(),
    }];
    (customers, sales, wines, locations)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// One compute() fills every section consistently from the same join.
#[test]
fn report_sections_are_consistent() {
    let (customers, sales, wines, locations) = fixture();
    let report = DashboardReport::compute(&customers, &sales, &wines, &locations);

    // Dataset-wide totals ignore join quality: the Ghost Wine sale counts.
    assert_eq!(report.sales.total_sales, 4);
    assert_eq!(report.sales.total_revenue, 190.0);
    assert_eq!(report.enriched_sales.len(), 4);

    // Bucketing conserves revenue.
    let bucketed: f64 = report.monthly_sales.iter().map(|b| b.total_amount).sum();
    assert_eq!(bucketed, report.sales.total_revenue);

    // Monthly buckets arrive sorted ascending.
    let keys: Vec<(i32, u32)> = report.monthly_sales.iter().map(|b| (b.year, b.month)).collect();
    assert_eq!(keys, [(2024, 1), (2024, 2), (2024, 3)]);

    // Origin reports only see the resolved sales.
    assert_eq!(report.country_summary.len(), 1);
    assert_eq!(report.country_summary[0].total_revenue, 180.0);

    // Both customers purchased, so both gender segments carry preferences.
    assert_eq!(report.gender_segments.len(), 2);
    assert_eq!(report.customers.total, 2);
}

#[test]
fn report_serializes_to_json() {
    let (customers, sales, wines, locations) = fixture();
    let report = DashboardReport::compute(&customers, &sales, &wines, &locations);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"monthly_sales\""));
    assert!(json.contains("Rioja Alta"));
}

/// Identical inputs, identical report — the whole pass is pure.
#[test]
fn compute_is_idempotent() {
    let (customers, sales, wines, locations) = fixture();
    let a = DashboardReport::compute(&customers, &sales, &wines, &locations);
    let b = DashboardReport::compute(&customers, &sales, &wines, &locations);

    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

/// Entirely empty collections must produce an empty but well-formed
/// report, not a panic.
#[test]
fn empty_collections_produce_empty_report() {
    let report = DashboardReport::compute(&[], &[], &[], &[]);

    assert_eq!(report.customers.total, 0);
    assert_eq!(report.sales.total_sales, 0);
    assert_eq!(report.sales.avg_sale_amount, 0.0);
    assert_eq!(report.sales.best_selling_wine, None);
    assert_eq!(report.sales_comparison.message, NOT_ENOUGH_DATA);
    assert!(report.monthly_sales.is_empty());
    assert!(report.wine_associations.is_empty());
    assert!(report.country_summary.is_empty());
    // The five age bands are always present, all empty.
    assert_eq!(report.age_segments.len(), 5);
    assert!(report.age_segments.iter().all(|s| s.customer_count == 0));
}
