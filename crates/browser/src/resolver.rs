use crate::error::BrowseError;
use connectors::api::service::TableService;
use model::source::{EngineKind, SourceDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

/// The built-in sample connection occupies the first connections slot and
/// never has a backend record.
pub const SAMPLE_SOURCE_ID: &str = "1";
pub const SAMPLE_DISPLAY_NAME: &str = "Sample Database";

pub fn sample_descriptor() -> SourceDescriptor {
    SourceDescriptor {
        source_id: SAMPLE_SOURCE_ID.to_string(),
        is_synthetic: true,
        display_name: SAMPLE_DISPLAY_NAME.to_string(),
        engine_kind: EngineKind::Sqlite,
    }
}

/// Determines whether a source identifier names a live backend connection or
/// the synthetic sample source. Stateless and idempotent for a given id.
pub struct SourceResolver {
    service: Arc<dyn TableService>,
}

impl SourceResolver {
    pub fn new(service: Arc<dyn TableService>) -> Self {
        SourceResolver { service }
    }

    pub async fn resolve(&self, source_id: &str) -> Result<SourceDescriptor, BrowseError> {
        match self.service.connection_by_id(source_id).await {
            Ok(Some(record)) => {
                debug!(
                    "Resolved source '{source_id}' to '{}' ({})",
                    record.name, record.engine
                );
                Ok(SourceDescriptor {
                    source_id: source_id.to_string(),
                    is_synthetic: record.is_sample,
                    display_name: record.name,
                    engine_kind: EngineKind::from_name(&record.engine),
                })
            }
            Ok(None) if source_id == SAMPLE_SOURCE_ID => {
                info!("Source '{source_id}' has no backend record; using the sample database");
                Ok(sample_descriptor())
            }
            Ok(None) => Err(BrowseError::SourceResolution(format!(
                "No connection registered with id '{source_id}'"
            ))),
            Err(err) => Err(BrowseError::SourceResolution(err.to_string())),
        }
    }
}
