use model::{query::page::RowPage, schema::descriptor::ColumnDescriptor};
use serde_json::Value;

const MAX_CELL_WIDTH: usize = 40;

pub fn print_columns(descriptors: &[ColumnDescriptor]) {
    println!("{:<28} {:<10} {:<7} {}", "COLUMN", "KIND", "WIDTH", "DETAILS");
    for descriptor in descriptors {
        println!(
            "{:<28} {:<10} {:<7} {}",
            descriptor.display_name,
            descriptor.value_kind,
            descriptor.render_width,
            descriptor.tooltip
        );
    }
}

pub fn print_rows(descriptors: &[ColumnDescriptor], page: &RowPage) {
    let cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| {
            descriptors
                .iter()
                .map(|d| {
                    let raw = row.get(&d.field).unwrap_or(&Value::Null);
                    clip(&d.format(raw))
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = descriptors
        .iter()
        .enumerate()
        .map(|(col, d)| {
            cells
                .iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(d.display_name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = descriptors
        .iter()
        .zip(&widths)
        .map(|(d, w)| format!("{:<width$}", d.display_name, width = *w))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<width$}", width = *w))
            .collect();
        println!("{}", line.join("  "));
    }
}

pub fn print_page_summary(page: &RowPage, page_index: usize, mode: &str) {
    println!();
    println!(
        "{} of {} rows (page {}, {} pagination)",
        page.rows.len(),
        page.total_count,
        page_index,
        mode
    );
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{clipped}…")
}
