//! The built-in sample dataset: an in-process stand-in for a real database,
//! served without any backend record. Generation is pure and deterministic so
//! repeated fetches always agree.

mod dataset;

use crate::api::types::WireColumn;
use serde_json::{Map, Value};

pub const SAMPLE_TABLES: &[&str] = &["users", "products", "orders"];

pub fn table_names() -> Vec<&'static str> {
    SAMPLE_TABLES.to_vec()
}

/// Column layout of a sample table. Unknown tables yield an empty layout.
pub fn generate_structure(table: &str) -> Vec<WireColumn> {
    match table {
        "users" => dataset::users_structure(),
        "products" => dataset::products_structure(),
        "orders" => dataset::orders_structure(),
        _ => Vec::new(),
    }
}

/// Full row set of a sample table. Pagination and sorting are the consumer's
/// job; the generator always returns everything.
pub fn generate_rows(table: &str) -> Vec<Map<String, Value>> {
    match table {
        "users" => dataset::users_rows(),
        "products" => dataset::products_rows(),
        "orders" => dataset::orders_rows(),
        _ => Vec::new(),
    }
}
