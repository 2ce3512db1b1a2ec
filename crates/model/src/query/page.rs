use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One fetched row: a mapping from column field name to raw value, carrying
/// a guaranteed `id` entry unique within its page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    values: Map<String, Value>,
}

impl TableRow {
    pub fn from_object(values: Map<String, Value>) -> Self {
        TableRow { values }
    }

    /// Guarantees an `id` entry. The source-provided key wins; otherwise one
    /// is synthesized from the page index and in-page offset. Synthesized ids
    /// are NOT stable across page or window changes.
    pub fn ensure_id(mut self, page_index: usize, offset: usize) -> Self {
        let missing = match self.values.get("id") {
            None | Some(Value::Null) => true,
            Some(_) => false,
        };
        if missing {
            self.values
                .insert("id".to_string(), Value::String(format!("{page_index}-{offset}")));
        }
        self
    }

    pub fn id(&self) -> String {
        self.values
            .get("id")
            .map(crate::core::cell::text)
            .unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// One page of rows plus the source's total row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowPage {
    pub rows: Vec<TableRow>,
    pub total_count: u64,
}

impl RowPage {
    pub fn empty() -> Self {
        RowPage {
            rows: Vec::new(),
            total_count: 0,
        }
    }
}
