use crate::core::value_kind::ValueKind;
use serde_json::Value;

/// Turns one raw cell into its rendered text.
pub type CellFormatter = fn(&Value) -> String;

/// Display-ready description of one grid column, derived from exactly one
/// [`RawColumnMeta`](crate::schema::column::RawColumnMeta). `field` is unique
/// within a schema's descriptor list and equals the originating column name.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub field: String,
    pub display_name: String,
    pub value_kind: ValueKind,
    pub render_width: u16,
    pub formatter: CellFormatter,
    pub tooltip: String,
}

impl ColumnDescriptor {
    pub fn format(&self, raw: &Value) -> String {
        (self.formatter)(raw)
    }
}
