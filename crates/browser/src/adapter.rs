use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use model::{
    core::{cell, value_kind::ValueKind},
    schema::{
        column::RawColumnMeta,
        descriptor::{CellFormatter, ColumnDescriptor},
    },
};
use serde_json::Value;

pub const DEFAULT_WIDTH: u16 = 120;
pub const TEXT_WIDTH: u16 = 160;
pub const TEMPORAL_WIDTH: u16 = 190;

/// One classification rule: any pattern appearing in the lowercased declared
/// type selects the kind. Order matters; the first matching rule wins.
struct TypeRule {
    patterns: &'static [&'static str],
    kind: ValueKind,
    width: u16,
}

lazy_static! {
    static ref TYPE_RULES: Vec<TypeRule> = vec![
        TypeRule {
            patterns: &["int", "serial", "float", "double", "decimal", "numeric"],
            kind: ValueKind::Number,
            width: DEFAULT_WIDTH,
        },
        TypeRule {
            patterns: &["date", "time"],
            kind: ValueKind::Temporal,
            width: TEMPORAL_WIDTH,
        },
        TypeRule {
            patterns: &["bool"],
            kind: ValueKind::Boolean,
            width: DEFAULT_WIDTH,
        },
        TypeRule {
            patterns: &["text", "varchar"],
            kind: ValueKind::Text,
            width: TEXT_WIDTH,
        },
    ];
}

// Counter-style columns whose declared type is often a wide integer; they
// must render as plain numeric text whatever the source declares.
const FORCED_NUMERIC_NAMES: &[&str] = &["uptime", "duration", "elapsed"];

/// Maps one raw column to its display descriptor. Total: unknown declared
/// types degrade to text.
pub fn adapt(meta: &RawColumnMeta) -> ColumnDescriptor {
    let (value_kind, render_width) = classify(&meta.name, &meta.declared_type);
    ColumnDescriptor {
        field: meta.name.clone(),
        display_name: meta.name.clone(),
        value_kind,
        render_width,
        formatter: formatter_for(value_kind),
        tooltip: tooltip(meta),
    }
}

fn classify(name: &str, declared_type: &str) -> (ValueKind, u16) {
    let name = name.to_ascii_lowercase();
    if FORCED_NUMERIC_NAMES.iter().any(|n| name.contains(n)) {
        return (ValueKind::Number, DEFAULT_WIDTH);
    }

    let declared = declared_type.to_ascii_lowercase();
    for rule in TYPE_RULES.iter() {
        if rule.patterns.iter().any(|p| declared.contains(p)) {
            return (rule.kind, rule.width);
        }
    }
    (ValueKind::Text, DEFAULT_WIDTH)
}

fn formatter_for(kind: ValueKind) -> CellFormatter {
    match kind {
        ValueKind::Number => format_number,
        ValueKind::Temporal => format_temporal,
        ValueKind::Boolean => format_boolean,
        ValueKind::Text => format_text,
    }
}

/// Plain textual form: no thousands separators, '.' decimal point, never
/// locale-grouped.
fn format_number(raw: &Value) -> String {
    cell::text(raw)
}

fn format_temporal(raw: &Value) -> String {
    let Some(text) = raw.as_str() else {
        return cell::text(raw);
    };
    match parse_instant(text) {
        Some(instant) => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => text.to_string(),
    }
}

fn format_boolean(raw: &Value) -> String {
    match raw {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => (n.as_f64() != Some(0.0)).to_string(),
        other => cell::text(other),
    }
}

fn format_text(raw: &Value) -> String {
    cell::text(raw)
}

/// Parses a raw temporal value: RFC 3339 first, then the common SQL datetime
/// and date shapes.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

fn tooltip(meta: &RawColumnMeta) -> String {
    let mut parts = Vec::new();
    if !meta.declared_type.is_empty() {
        parts.push(meta.declared_type.clone());
    }
    parts.push(if meta.nullable { "nullable" } else { "not null" }.to_string());
    if let Some(default) = &meta.default_value {
        parts.push(format!("default {default}"));
    }
    if let Some(role) = meta.key_role.label() {
        parts.push(role.to_string());
    }
    parts.join(", ")
}
