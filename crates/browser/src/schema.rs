use crate::{adapter, error::BrowseError};
use connectors::{api::service::TableService, sample};
use model::{schema::descriptor::ColumnDescriptor, source::SourceDescriptor};
use std::sync::Arc;
use tracing::debug;

/// Retrieves the ordered raw column list for one table and adapts each entry.
/// Descriptor order follows the source's column order; it determines grid
/// column order.
pub struct SchemaLoader {
    service: Arc<dyn TableService>,
}

impl SchemaLoader {
    pub fn new(service: Arc<dyn TableService>) -> Self {
        SchemaLoader { service }
    }

    pub async fn load(
        &self,
        source: &SourceDescriptor,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, BrowseError> {
        let raw = if source.is_synthetic {
            sample::generate_structure(table)
        } else {
            let mut response = self
                .service
                .schema(&source.source_id)
                .await
                .map_err(BrowseError::SchemaTransport)?;
            response
                .table_columns
                .remove(table)
                .ok_or_else(|| BrowseError::SchemaNotFound {
                    table: table.to_string(),
                    message: response.message.clone(),
                })?
        };

        let descriptors: Vec<ColumnDescriptor> = raw
            .into_iter()
            .map(|column| adapter::adapt(&column.into_meta()))
            .collect();
        debug!(
            "Loaded {} columns for {}.{table}",
            descriptors.len(),
            source.display_name
        );
        Ok(descriptors)
    }
}
