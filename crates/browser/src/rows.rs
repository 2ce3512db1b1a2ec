use crate::error::BrowseError;
use connectors::{
    api::{service::TableService, types::RowsQuery},
    sample,
};
use model::{
    query::{
        page::{RowPage, TableRow},
        window::QueryWindow,
    },
    source::SourceDescriptor,
};
use std::sync::Arc;
use tracing::debug;

/// Retrieves one row page and normalizes every row to carry an `id`.
pub struct RowLoader {
    service: Arc<dyn TableService>,
}

impl RowLoader {
    pub fn new(service: Arc<dyn TableService>) -> Self {
        RowLoader { service }
    }

    pub async fn load(
        &self,
        source: &SourceDescriptor,
        table: &str,
        window: &QueryWindow,
    ) -> Result<RowPage, BrowseError> {
        if source.is_synthetic {
            // The generator returns its full deterministic row set; the
            // window's sort and page apply client-side in the consumer.
            let rows = sample::generate_rows(table);
            let total_count = rows.len() as u64;
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(offset, object)| {
                    TableRow::from_object(object).ensure_id(window.page_index, offset)
                })
                .collect();
            return Ok(RowPage { rows, total_count });
        }

        let query = RowsQuery {
            page: window.page_index + 1,
            limit: window.page_size,
            sort_by: window.sort_field.clone(),
            sort_order: window.sort_direction,
        };
        let response = self
            .service
            .table_rows(&source.source_id, table, &query)
            .await
            .map_err(BrowseError::RowTransport)?;

        if !response.success {
            return Err(BrowseError::RowQuery(
                response
                    .message
                    .unwrap_or_else(|| "Backend reported a row query failure".to_string()),
            ));
        }

        // Zero rows is a valid page, not an error.
        debug!(
            "Fetched {} of {} rows from {table}",
            response.rows.len(),
            response.total_row_count
        );
        let rows = response
            .rows
            .into_iter()
            .enumerate()
            .map(|(offset, object)| {
                TableRow::from_object(object).ensure_id(window.page_index, offset)
            })
            .collect();
        Ok(RowPage {
            rows,
            total_count: response.total_row_count,
        })
    }
}
