use connectors::api::error::ApiError;
use thiserror::Error;

/// Everything that can go wrong in one pipeline run. None of these are
/// retried automatically; recovery is an explicit refresh. All are scoped to
/// a single table view.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Source lookup failed and the sample fallback did not apply.
    #[error("Failed to resolve source: {0}")]
    SourceResolution(String),

    /// The requested table is absent from the schema response.
    #[error("Table '{table}' not found in schema{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    SchemaNotFound {
        table: String,
        message: Option<String>,
    },

    /// The schema request itself failed.
    #[error("Failed to fetch schema: {0}")]
    SchemaTransport(#[source] ApiError),

    /// The backend reported a logical row-query failure.
    #[error("Row query failed: {0}")]
    RowQuery(String),

    /// The row request itself failed.
    #[error("Failed to fetch rows: {0}")]
    RowTransport(#[source] ApiError),
}
