use crate::api::types::WireColumn;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value, json};

const USER_COUNT: usize = 40;
const PRODUCT_COUNT: usize = 16;
const ORDER_COUNT: usize = 57;

// 2025-01-01T00:00:00Z, the epoch all generated dates count from.
const BASE_EPOCH: i64 = 1_735_689_600;

const PRODUCT_ADJECTIVES: &[&str] = &["Compact", "Deluxe", "Eco", "Heavy-Duty"];
const PRODUCT_NOUNS: &[&str] = &[
    "Anvil", "Beacon", "Crate", "Dynamo", "Easel", "Flask", "Gasket", "Hinge",
];
const ORDER_STATUSES: &[&str] = &["pending", "shipped", "delivered", "cancelled"];

fn column(
    name: &str,
    type_name: &str,
    nullable: bool,
    default: Option<&str>,
    key: Option<&str>,
) -> WireColumn {
    WireColumn {
        name: name.to_string(),
        type_name: type_name.to_string(),
        nullable,
        default: default.map(str::to_string),
        key: key.map(str::to_string),
    }
}

fn row(pairs: Vec<(&str, Value)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn instant(day: usize, second_of_day: i64) -> Value {
    let secs = BASE_EPOCH + day as i64 * 86_400 + second_of_day;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::Secs, true)))
        .unwrap_or(Value::Null)
}

fn day(day: usize) -> Value {
    let secs = BASE_EPOCH + day as i64 * 86_400;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|ts| Value::String(ts.format("%Y-%m-%d").to_string()))
        .unwrap_or(Value::Null)
}

fn decimal(cents: i64) -> Value {
    Number::from_f64(cents as f64 / 100.0)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn users_structure() -> Vec<WireColumn> {
    vec![
        column("id", "INTEGER", false, None, Some("PRI")),
        column("username", "VARCHAR(32)", false, None, Some("UNI")),
        column("email", "VARCHAR(255)", false, None, None),
        column("active", "BOOLEAN", false, Some("true"), None),
        column("login_count", "INTEGER", false, Some("0"), None),
        column("session_duration_seconds", "BIGINT", false, Some("0"), None),
        column("created_at", "TIMESTAMP", false, None, None),
        column("last_login", "TIMESTAMP", true, None, None),
    ]
}

pub fn users_rows() -> Vec<Map<String, Value>> {
    (0..USER_COUNT)
        .map(|i| {
            let username = format!("user{:03}", i + 1);
            let last_login = if i % 5 == 0 {
                Value::Null
            } else {
                instant(i + 3, (i as i64 * 2_141) % 86_400)
            };
            row(vec![
                ("id", json!(i as i64 + 1)),
                ("email", json!(format!("{username}@example.com"))),
                ("username", Value::String(username)),
                ("active", json!(i % 3 != 0)),
                ("login_count", json!((i as i64 * 7) % 180)),
                ("session_duration_seconds", json!((i as i64 + 1) * 40_927)),
                ("created_at", instant(i, 32_400)),
                ("last_login", last_login),
            ])
        })
        .collect()
}

pub fn products_structure() -> Vec<WireColumn> {
    vec![
        column("id", "INTEGER", false, None, Some("PRI")),
        column("sku", "VARCHAR(16)", false, None, Some("UNI")),
        column("name", "VARCHAR(64)", false, None, None),
        column("price", "DECIMAL(10,2)", false, None, None),
        column("in_stock", "BOOLEAN", false, Some("true"), None),
        column("added_on", "DATE", false, None, None),
    ]
}

pub fn products_rows() -> Vec<Map<String, Value>> {
    (0..PRODUCT_COUNT)
        .map(|i| {
            let name = format!(
                "{} {}",
                PRODUCT_ADJECTIVES[i % PRODUCT_ADJECTIVES.len()],
                PRODUCT_NOUNS[i % PRODUCT_NOUNS.len()]
            );
            row(vec![
                ("id", json!(i as i64 + 1)),
                ("sku", json!(format!("SKU-{}", 1000 + i * 37))),
                ("name", Value::String(name)),
                ("price", decimal((i as i64 * 315) % 9_000 + 199)),
                ("in_stock", json!(i % 4 != 1)),
                ("added_on", day(i * 5)),
            ])
        })
        .collect()
}

pub fn orders_structure() -> Vec<WireColumn> {
    vec![
        column("id", "INTEGER", false, None, Some("PRI")),
        column("user_id", "INTEGER", false, None, None),
        column("product_id", "INTEGER", false, None, None),
        column("quantity", "INTEGER", false, Some("1"), None),
        column("total", "DECIMAL(10,2)", false, None, None),
        column("status", "VARCHAR(16)", false, Some("pending"), None),
        column("ordered_at", "TIMESTAMP", false, None, None),
        column("note", "TEXT", true, None, None),
    ]
}

pub fn orders_rows() -> Vec<Map<String, Value>> {
    (0..ORDER_COUNT)
        .map(|i| {
            let note = if i % 9 == 0 {
                json!("gift wrap")
            } else {
                Value::Null
            };
            row(vec![
                ("id", json!(i as i64 + 1)),
                ("user_id", json!((i as i64 * 13) % USER_COUNT as i64 + 1)),
                ("product_id", json!((i as i64 * 7) % PRODUCT_COUNT as i64 + 1)),
                ("quantity", json!(i as i64 % 5 + 1)),
                ("total", decimal((i as i64 * 823) % 25_000 + 99)),
                ("status", json!(ORDER_STATUSES[i % ORDER_STATUSES.len()])),
                ("ordered_at", instant(i / 2, (i as i64 * 3_607) % 86_400)),
                ("note", note),
            ])
        })
        .collect()
}
