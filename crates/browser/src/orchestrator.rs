use crate::{
    error::BrowseError, resolver::SourceResolver, rows::RowLoader, schema::SchemaLoader,
};
use connectors::api::service::TableService;
use model::{
    query::{page::RowPage, window::QueryWindow},
    schema::descriptor::ColumnDescriptor,
    source::SourceDescriptor,
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Pipeline stage. Transitions run strictly forward except on invalidation,
/// which restarts from `ResolvingSource` (or a later stage when only the
/// table or window changed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingSource,
    LoadingSchema,
    LoadingRows,
    Ready,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolvingSource => "resolving source",
            Stage::LoadingSchema => "loading schema",
            Stage::LoadingRows => "loading rows",
            Stage::Ready => "ready",
            Stage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Where pagination and sorting happen for the current source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Client,
    Server,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Client => write!(f, "client"),
            FetchMode::Server => write!(f, "server"),
        }
    }
}

/// The derived snapshot the rendering layer consumes.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub stage: Stage,
    pub error: Option<String>,
    pub descriptors: Vec<ColumnDescriptor>,
    pub page: Option<RowPage>,
    pub pagination_mode: FetchMode,
    pub sorting_mode: FetchMode,
}

struct PipelineInner {
    source_id: String,
    table: String,
    window: QueryWindow,
    /// Monotonically increasing marker for the current pipeline run. Results
    /// arriving under an older generation are discarded unseen.
    generation: u64,
    stage: Stage,
    failed_stage: Option<Stage>,
    error: Option<String>,
    source: Option<SourceDescriptor>,
    descriptors: Vec<ColumnDescriptor>,
    page: Option<RowPage>,
}

impl PipelineInner {
    fn fail(&mut self, at: Stage, err: &BrowseError) {
        warn!("Pipeline failed while {at}: {err}");
        self.stage = Stage::Failed;
        self.failed_stage = Some(at);
        self.error = Some(err.to_string());
    }

    fn at_row_boundary(&self) -> bool {
        self.stage == Stage::Ready
            || (self.stage == Stage::Failed && self.failed_stage == Some(Stage::LoadingRows))
    }
}

/// Drives the three-stage pipeline (resolve → schema → rows) for one mounted
/// table view. State is local to the instance and never shared between
/// views; a superseded in-flight run is detected by its generation token,
/// not by cancelling the transport.
pub struct FetchOrchestrator {
    resolver: SourceResolver,
    schema: SchemaLoader,
    rows: RowLoader,
    inner: Mutex<PipelineInner>,
    /// Serializes window mutations: one mutation's row load is issued before
    /// the next is accepted.
    window_gate: Mutex<()>,
}

impl FetchOrchestrator {
    pub fn new(
        service: Arc<dyn TableService>,
        source_id: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self::with_window(service, source_id, table, QueryWindow::default())
    }

    pub fn with_window(
        service: Arc<dyn TableService>,
        source_id: impl Into<String>,
        table: impl Into<String>,
        window: QueryWindow,
    ) -> Self {
        FetchOrchestrator {
            resolver: SourceResolver::new(service.clone()),
            schema: SchemaLoader::new(service.clone()),
            rows: RowLoader::new(service),
            inner: Mutex::new(PipelineInner {
                source_id: source_id.into(),
                table: table.into(),
                window,
                generation: 0,
                stage: Stage::ResolvingSource,
                failed_stage: None,
                error: None,
                source: None,
                descriptors: Vec::new(),
                page: None,
            }),
            window_gate: Mutex::new(()),
        }
    }

    /// Runs the full pipeline for the configured inputs. Call once on mount.
    pub async fn start(&self) {
        self.run_from_resolve(None).await;
    }

    /// Switches to another source and restarts the whole pipeline.
    pub async fn set_source(&self, source_id: &str) {
        self.run_from_resolve(Some(source_id.to_string())).await;
    }

    /// Switches to another table on the same source; the resolved source is
    /// reused and the pipeline restarts at the schema stage.
    pub async fn set_table(&self, table: &str) {
        let resume = {
            let mut inner = self.inner.lock().await;
            inner.table = table.to_string();
            match inner.source.clone() {
                Some(source) => {
                    inner.generation += 1;
                    inner.stage = Stage::LoadingSchema;
                    inner.failed_stage = None;
                    inner.error = None;
                    inner.descriptors.clear();
                    inner.page = None;
                    Some((inner.generation, source, inner.table.clone()))
                }
                // The source never resolved; a table change cannot reuse it.
                None => None,
            }
        };

        match resume {
            Some((generation, source, table)) => {
                info!("Table changed to '{table}'; reloading schema");
                self.run_from_schema(generation, source, table).await;
            }
            None => self.run_from_resolve(None).await,
        }
    }

    /// Applies a new pagination/sort window. Valid only once rows have been
    /// attempted (ready, or failed at the row stage); earlier changes are
    /// ignored.
    pub async fn set_window(&self, window: QueryWindow) {
        let _serialized = self.window_gate.lock().await;

        let resume = {
            let mut inner = self.inner.lock().await;
            if !inner.at_row_boundary() {
                debug!("Ignoring window change while {}", inner.stage);
                return;
            }
            let Some(source) = inner.source.clone() else {
                debug!("Ignoring window change without a resolved source");
                return;
            };
            inner.window = window;
            inner.generation += 1;
            inner.stage = Stage::LoadingRows;
            inner.failed_stage = None;
            inner.error = None;
            (inner.generation, source, inner.table.clone(), inner.window.clone())
        };

        let (generation, source, table, window) = resume;
        self.run_from_rows(generation, source, table, window).await;
    }

    /// Restarts the entire pipeline with unchanged inputs. This is the only
    /// recovery path after a failure, and also picks up external schema
    /// changes without navigating away.
    pub async fn refresh(&self) {
        info!("Refresh requested; restarting pipeline");
        self.run_from_resolve(None).await;
    }

    pub async fn snapshot(&self) -> PipelineState {
        let inner = self.inner.lock().await;
        let mode = match &inner.source {
            Some(source) if source.is_synthetic => FetchMode::Client,
            _ => FetchMode::Server,
        };
        PipelineState {
            stage: inner.stage,
            error: inner.error.clone(),
            descriptors: inner.descriptors.clone(),
            page: inner.page.clone(),
            pagination_mode: mode,
            sorting_mode: mode,
        }
    }

    pub async fn window(&self) -> QueryWindow {
        self.inner.lock().await.window.clone()
    }

    async fn run_from_resolve(&self, new_source_id: Option<String>) {
        let (generation, source_id, table) = {
            let mut inner = self.inner.lock().await;
            if let Some(source_id) = new_source_id {
                inner.source_id = source_id;
            }
            inner.generation += 1;
            inner.stage = Stage::ResolvingSource;
            inner.failed_stage = None;
            inner.error = None;
            // Downstream state is cleared up front so a slow superseded run
            // can never paint stale data after a fast new one completes.
            inner.source = None;
            inner.descriptors.clear();
            inner.page = None;
            (inner.generation, inner.source_id.clone(), inner.table.clone())
        };

        info!("Resolving source '{source_id}'");
        let resolved = self.resolver.resolve(&source_id).await;

        let source = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation {
                debug!("Discarding superseded resolution of '{source_id}'");
                return;
            }
            match resolved {
                Ok(source) => {
                    inner.source = Some(source.clone());
                    inner.stage = Stage::LoadingSchema;
                    source
                }
                Err(err) => {
                    inner.fail(Stage::ResolvingSource, &err);
                    return;
                }
            }
        };

        self.run_from_schema(generation, source, table).await;
    }

    async fn run_from_schema(&self, generation: u64, source: SourceDescriptor, table: String) {
        let loaded = self.schema.load(&source, &table).await;

        let window = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation {
                debug!("Discarding superseded schema for '{table}'");
                return;
            }
            match loaded {
                Ok(descriptors) => {
                    inner.descriptors = descriptors;
                    inner.stage = Stage::LoadingRows;
                    inner.window.clone()
                }
                Err(err) => {
                    inner.fail(Stage::LoadingSchema, &err);
                    return;
                }
            }
        };

        self.run_from_rows(generation, source, table, window).await;
    }

    async fn run_from_rows(
        &self,
        generation: u64,
        source: SourceDescriptor,
        table: String,
        window: QueryWindow,
    ) {
        let loaded = self.rows.load(&source, &table, &window).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!("Discarding superseded row page for '{table}'");
            return;
        }
        match loaded {
            Ok(page) => {
                debug!("Pipeline ready: {} rows of {}", page.rows.len(), page.total_count);
                inner.page = Some(page);
                inner.stage = Stage::Ready;
            }
            // Descriptors survive a row failure: the view can still show
            // "schema loaded, rows failed".
            Err(err) => inner.fail(Stage::LoadingRows, &err),
        }
    }
}
