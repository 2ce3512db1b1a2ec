use crate::api::{
    error::ApiError,
    types::{ConnectionRecord, RowsQuery, RowsResponse, SchemaResponse},
};
use async_trait::async_trait;

/// The backend seam the browsing pipeline consumes. One implementation talks
/// HTTP; tests substitute their own.
#[async_trait]
pub trait TableService: Send + Sync {
    /// Looks up a registered connection. `Ok(None)` means the backend has no
    /// record for this id (404).
    async fn connection_by_id(&self, id: &str) -> Result<Option<ConnectionRecord>, ApiError>;

    /// Fetches the full schema for a source: table list plus per-table
    /// column metadata.
    async fn schema(&self, source_id: &str) -> Result<SchemaResponse, ApiError>;

    /// Fetches one page of rows for a table.
    async fn table_rows(
        &self,
        source_id: &str,
        table: &str,
        query: &RowsQuery,
    ) -> Result<RowsResponse, ApiError>;
}
