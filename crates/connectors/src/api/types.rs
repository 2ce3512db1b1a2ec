use model::{
    query::window::SortDirection,
    schema::column::{KeyRole, RawColumnMeta},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A registered connection as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: i64,
    pub name: String,
    pub engine: String,
    /// A backend record may itself be flagged as a sample/demo source.
    #[serde(default)]
    pub is_sample: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
}

/// One column entry in a schema response or sample structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl WireColumn {
    pub fn into_meta(self) -> RawColumnMeta {
        RawColumnMeta {
            key_role: KeyRole::from_wire(self.key.as_deref()),
            name: self.name,
            declared_type: self.type_name,
            nullable: self.nullable,
            default_value: self.default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaResponse {
    pub success: bool,
    #[serde(default)]
    pub tables: Vec<TableEntry>,
    #[serde(default)]
    pub table_columns: HashMap<String, Vec<WireColumn>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Row-query parameters as the backend expects them: 1-based page index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsQuery {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortDirection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowsResponse {
    pub success: bool,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub total_row_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}
