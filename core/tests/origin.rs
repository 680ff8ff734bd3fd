use chrono::NaiveDate;
use vinalytics_core::join_index::JoinIndex;
use vinalytics_core::origin::{sales_by_country, sales_by_region, TOP_REGIONS};
use vinalytics_core::records::{Sale, Wine};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_wine(designation: &str, category: &str, country: &str, region: &str) -> Wine {
    Wine {
        id: 0,
        wine_designation: designation.into(),
        category: category.into(),
        country: country.into(),
        region: region.into(),
        grape_variety: "Garnacha".into(),
        year: 2020,
        alcohol_content: 14.0,
        bottle_size: "750ml".into(),
        price_range: "10-20".into(),
    }
}

fn make_sale(customer_id: i64, designation: &str, amount: f64, quantity: u32) -> Sale {
    Sale {
        sale_id: 0,
        customer_id,
        wine_designation: designation.into(),
        quantity,
        sale_amount: amount,
        sale_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

// ── Country summaries ────────────────────────────────────────────────────────

#[test]
fn country_summary_aggregates_and_ranks() {
    let wines = vec![
        make_wine("Rioja Alta", "Red", "Spain", "Rioja"),
        make_wine("Albariño", "White", "Spain", "Rías Baixas"),
        make_wine("Chianti", "Red", "Italy", "Tuscany"),
    ];
    let sales = vec![
        make_sale(1, "Rioja Alta", 60.0, 2),
        make_sale(2, "Rioja Alta", 40.0, 1),
        make_sale(1, "Albariño", 30.0, 1),
        make_sale(3, "Chianti", 500.0, 3),
    ];
    let index = JoinIndex::build(&[], &wines, &[]);

    let summary = sales_by_country(&sales, &index);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].country, "Italy", "highest revenue first");

    let spain = &summary[1];
    assert_eq!(spain.total_sales, 3);
    assert_eq!(spain.total_revenue, 130.0);
    assert_eq!(spain.total_quantity, 4);
    assert_eq!(spain.unique_wines, 2);
    assert!((spain.avg_revenue_per_sale - 130.0 / 3.0).abs() < 1e-9);
    assert_eq!(spain.top_categories[0].name, "Red");
    assert_eq!(spain.top_categories[0].count, 2);
    assert_eq!(spain.top_regions.len(), 2);
}

/// A sale whose designation is missing from the catalog has no country to
/// group under and is excluded here.
#[test]
fn unresolved_sales_excluded_from_origin() {
    let wines = vec![make_wine("Rioja Alta", "Red", "Spain", "Rioja")];
    let sales = vec![
        make_sale(1, "Rioja Alta", 60.0, 1),
        make_sale(1, "Ghost", 999.0, 9),
    ];
    let index = JoinIndex::build(&[], &wines, &[]);

    let summary = sales_by_country(&sales, &index);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].total_revenue, 60.0);
}

// ── Region summaries ─────────────────────────────────────────────────────────

#[test]
fn region_summary_uses_composite_keys() {
    let wines = vec![
        make_wine("Rioja Alta", "Red", "Spain", "Rioja"),
        make_wine("Chianti", "Red", "Italy", "Tuscany"),
        make_wine("Mystery", "Red", "Italy", ""), // no region — skipped
    ];
    let sales = vec![
        make_sale(1, "Rioja Alta", 60.0, 1),
        make_sale(2, "Chianti", 100.0, 1),
        make_sale(3, "Mystery", 999.0, 1),
    ];
    let index = JoinIndex::build(&[], &wines, &[]);

    let summary = sales_by_region(&sales, &index);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].region, "Tuscany, Italy");
    assert_eq!(summary[0].country, "Italy");
    assert_eq!(summary[1].region, "Rioja, Spain");
    assert_eq!(summary[1].total_revenue, 60.0);
    assert_eq!(summary[1].avg_revenue_per_sale, 60.0);
}

/// The region report is capped; only the highest-revenue rows survive.
#[test]
fn region_summary_truncated_to_top_15() {
    let mut wines = Vec::new();
    let mut sales = Vec::new();
    for i in 0..20i64 {
        let designation = format!("W{i}");
        wines.push(make_wine(&designation, "Red", "Spain", &format!("R{i}")));
        // Revenue grows with i, so R19 ranks first and R0..R4 drop out.
        sales.push(make_sale(i, &designation, 10.0 + i as f64, 1));
    }
    let index = JoinIndex::build(&[], &wines, &[]);

    let summary = sales_by_region(&sales, &index);
    assert_eq!(summary.len(), TOP_REGIONS);
    assert_eq!(summary[0].region, "R19, Spain");
    assert!(summary.iter().all(|r| r.total_revenue >= 15.0));
}
