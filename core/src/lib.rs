//! vinalytics-core — the aggregation engine behind the wine-sales
//! dashboard.
//!
//! Joins the four flat record collections (customers, sales, wine catalog,
//! postal locations) by key and computes every report the presentation
//! layer shows: scalar statistics, monthly series, demographic segments,
//! market-basket associations, and origin summaries.
//!
//! RULES:
//!   - The core performs no I/O; the external loader hands it fully
//!     materialized, immutable collections.
//!   - Data-quality problems never abort an aggregation pass — unresolved
//!     joins become sentinels, malformed dates are skipped, empty inputs
//!     have documented results.
//!   - Every function here is pure; compute once per render and cache as
//!     you like.

pub mod association;
pub mod dashboard;
pub mod enrich;
pub mod error;
pub mod general_stats;
pub mod join_index;
pub mod origin;
pub mod rank;
pub mod records;
pub mod segmentation;
pub mod time_series;
pub mod types;

pub use dashboard::DashboardReport;
pub use error::{AnalyticsError, AnalyticsResult};
pub use join_index::JoinIndex;
pub use records::{Customer, EnrichedSale, Location, Sale, Wine};
