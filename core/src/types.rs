//! Shared primitive types used across the analytics core.

/// Stable numeric identifier of a customer row.
pub type CustomerId = i64;

/// Stable numeric identifier of a sale row.
pub type SaleId = i64;
