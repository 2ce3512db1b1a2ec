use crate::adapter;
use model::{
    core::{cell, value_kind::ValueKind},
    query::{
        page::{RowPage, TableRow},
        window::{QueryWindow, SortDirection},
    },
    schema::descriptor::ColumnDescriptor,
};
use serde_json::Value;
use std::cmp::Ordering;

/// Client-side counterpart of server pagination, for sources that return
/// their full row set. Sorts by the window's sort field and slices the
/// requested page; rows with a missing or null sort value order last
/// regardless of direction.
pub fn apply_window(
    rows: &[TableRow],
    window: &QueryWindow,
    descriptors: &[ColumnDescriptor],
) -> RowPage {
    let mut ordered: Vec<&TableRow> = rows.iter().collect();

    if let Some(field) = &window.sort_field {
        let kind = descriptors
            .iter()
            .find(|d| d.field == *field)
            .map(|d| d.value_kind)
            .unwrap_or(ValueKind::Text);
        let descending = window.sort_direction == Some(SortDirection::Desc);

        ordered.sort_by(|a, b| {
            let ordering = compare_field(a.get(field), b.get(field), kind);
            match ordering {
                Some(ordering) if descending => ordering.reverse(),
                Some(ordering) => ordering,
                // Absent values sink to the end either way.
                None => rank(a.get(field)).cmp(&rank(b.get(field))),
            }
        });
    }

    let start = window.page_index.saturating_mul(window.page_size);
    let page_rows = ordered
        .into_iter()
        .skip(start)
        .take(window.page_size)
        .cloned()
        .collect();

    RowPage {
        rows: page_rows,
        total_count: rows.len() as u64,
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Null) | None => 1,
        Some(_) => 0,
    }
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, kind: ValueKind) -> Option<Ordering> {
    let (a, b) = (a?, b?);
    match kind {
        ValueKind::Number => cell::as_f64(a)
            .zip(cell::as_f64(b))
            .and_then(|(x, y)| x.partial_cmp(&y)),
        ValueKind::Temporal => {
            let parse = |v: &Value| v.as_str().and_then(adapter::parse_instant);
            match (parse(a), parse(b)) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                // Unparsable temporals fall back to their raw text order.
                _ => cell::compare(a, b),
            }
        }
        _ => cell::compare(a, b),
    }
}
