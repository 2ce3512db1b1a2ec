#[cfg(test)]
mod tests {
    use crate::orchestrator::{FetchMode, FetchOrchestrator, Stage};
    use async_trait::async_trait;
    use connectors::api::{
        error::ApiError,
        service::TableService,
        types::{ConnectionRecord, RowsQuery, RowsResponse, SchemaResponse, TableEntry, WireColumn},
    };
    use model::query::window::{QueryWindow, SortDirection};
    use serde_json::{Map, Value, json};
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    // Mock backend for driving the pipeline without a network.
    struct MockService {
        connection: Option<ConnectionRecord>,
        connection_error: bool,
        columns: HashMap<String, Vec<WireColumn>>,
        schema_message: Option<String>,
        rows: Vec<Map<String, Value>>,
        total: u64,
        row_success: bool,
        row_message: Option<String>,
        // (1-based schema call index, delay in ms) for stale-result races
        slow_schema_call: Option<(usize, u64)>,
        resolve_calls: AtomicUsize,
        schema_calls: AtomicUsize,
        row_calls: AtomicUsize,
        last_rows_query: Mutex<Option<RowsQuery>>,
    }

    impl MockService {
        fn new() -> Self {
            MockService {
                connection: None,
                connection_error: false,
                columns: HashMap::new(),
                schema_message: None,
                rows: Vec::new(),
                total: 0,
                row_success: true,
                row_message: None,
                slow_schema_call: None,
                resolve_calls: AtomicUsize::new(0),
                schema_calls: AtomicUsize::new(0),
                row_calls: AtomicUsize::new(0),
                last_rows_query: Mutex::new(None),
            }
        }

        fn with_connection(mut self, record: ConnectionRecord) -> Self {
            self.connection = Some(record);
            self
        }

        fn with_columns(mut self, table: &str, columns: Vec<WireColumn>) -> Self {
            self.columns.insert(table.to_string(), columns);
            self
        }

        fn with_rows(mut self, rows: Vec<Map<String, Value>>) -> Self {
            self.total = rows.len() as u64;
            self.rows = rows;
            self
        }

        fn counts(&self) -> (usize, usize, usize) {
            (
                self.resolve_calls.load(Ordering::SeqCst),
                self.schema_calls.load(Ordering::SeqCst),
                self.row_calls.load(Ordering::SeqCst),
            )
        }
    }

    #[async_trait]
    impl TableService for MockService {
        async fn connection_by_id(
            &self,
            _id: &str,
        ) -> Result<Option<ConnectionRecord>, ApiError> {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            if self.connection_error {
                return Err(ApiError::Status {
                    endpoint: "/api/connections".to_string(),
                    status: 500,
                });
            }
            Ok(self.connection.clone())
        }

        async fn schema(&self, _source_id: &str) -> Result<SchemaResponse, ApiError> {
            let call = self.schema_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((slow_call, delay_ms)) = self.slow_schema_call {
                if call == slow_call {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
            Ok(SchemaResponse {
                success: true,
                tables: self
                    .columns
                    .keys()
                    .map(|name| TableEntry { name: name.clone() })
                    .collect(),
                table_columns: self.columns.clone(),
                message: self.schema_message.clone(),
            })
        }

        async fn table_rows(
            &self,
            _source_id: &str,
            _table: &str,
            query: &RowsQuery,
        ) -> Result<RowsResponse, ApiError> {
            self.row_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_rows_query.lock().unwrap() = Some(query.clone());
            Ok(RowsResponse {
                success: self.row_success,
                rows: self.rows.clone(),
                total_row_count: self.total,
                message: self.row_message.clone(),
            })
        }
    }

    fn connection(id: i64, name: &str, engine: &str, is_sample: bool) -> ConnectionRecord {
        ConnectionRecord {
            id,
            name: name.to_string(),
            engine: engine.to_string(),
            is_sample,
        }
    }

    fn wire_column(name: &str, type_name: &str) -> WireColumn {
        WireColumn {
            name: name.to_string(),
            type_name: type_name.to_string(),
            nullable: false,
            default: None,
            key: None,
        }
    }

    fn order_rows(count: usize) -> Vec<Map<String, Value>> {
        (0..count)
            .map(|i| {
                let mut object = Map::new();
                object.insert("total".to_string(), json!(i as f64 * 10.5));
                object
            })
            .collect()
    }

    #[tokio::test]
    async fn end_to_end_server_pagination() {
        let service = Arc::new(
            MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")])
                .with_rows(order_rows(3)),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Ready);
        assert_eq!(state.pagination_mode, FetchMode::Server);
        assert_eq!(state.sorting_mode, FetchMode::Server);
        assert_eq!(state.descriptors.len(), 1);
        assert_eq!(state.descriptors[0].field, "total");

        let page = state.page.expect("row page should be present");
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.total_count, 3);
        // Keyless rows get page-scoped synthesized ids.
        let ids: Vec<String> = page.rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["0-0", "0-1", "0-2"]);
    }

    #[tokio::test]
    async fn sample_source_resolves_despite_backend_404() {
        let service = Arc::new(MockService::new());
        let orchestrator = FetchOrchestrator::new(service.clone(), "1", "users");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Ready);
        assert_eq!(state.pagination_mode, FetchMode::Client);
        assert!(!state.descriptors.is_empty());

        let page = state.page.expect("sample rows should be present");
        assert_eq!(page.rows.len() as u64, page.total_count);
        assert!(page.total_count > 0);

        // The generator serves schema and rows; no transport call is issued
        // past the failed connection lookup.
        let (resolves, schemas, rows) = service.counts();
        assert_eq!(resolves, 1);
        assert_eq!(schemas, 0);
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn unknown_source_404_fails_resolution() {
        let service = Arc::new(MockService::new());
        let orchestrator = FetchOrchestrator::new(service.clone(), "9", "users");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Failed);
        assert!(state.error.unwrap_or_default().contains("9"));
        let (_, schemas, rows) = service.counts();
        assert_eq!(schemas, 0);
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn backend_error_is_not_the_sample_fallback() {
        let service = Arc::new(MockService {
            connection_error: true,
            ..MockService::new()
        });
        let orchestrator = FetchOrchestrator::new(service.clone(), "1", "users");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Failed);
        assert!(state.error.is_some());
        let (_, schemas, _) = service.counts();
        assert_eq!(schemas, 0);
    }

    #[tokio::test]
    async fn backend_flagged_sample_record_uses_the_generator() {
        let service = Arc::new(
            MockService::new().with_connection(connection(3, "Demo", "sqlite", true)),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "3", "products");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Ready);
        assert_eq!(state.pagination_mode, FetchMode::Client);
        assert!(!state.descriptors.is_empty());
        let (_, schemas, rows) = service.counts();
        assert_eq!(schemas, 0);
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn missing_table_fails_schema_with_backend_message() {
        let service = Arc::new(
            MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")]),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "ghost");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Failed);
        assert!(state.error.unwrap_or_default().contains("ghost"));
        assert!(state.descriptors.is_empty());
        let (_, _, rows) = service.counts();
        assert_eq!(rows, 0, "rows must never be attempted after a schema failure");
    }

    #[tokio::test]
    async fn rapid_table_switch_discards_stale_schema() {
        let service = Arc::new(MockService {
            slow_schema_call: Some((2, 80)),
            ..MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")])
                .with_columns("alpha", vec![wire_column("alpha_col", "TEXT")])
                .with_columns("beta", vec![wire_column("beta_col", "TEXT")])
                .with_rows(order_rows(1))
        });
        let orchestrator = Arc::new(FetchOrchestrator::new(service.clone(), "7", "orders"));
        orchestrator.start().await;

        // Switch to `alpha` (slow schema), then to `beta` before it resolves.
        let first = orchestrator.clone();
        let slow = tokio::spawn(async move { first.set_table("alpha").await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = orchestrator.clone();
        let fast = tokio::spawn(async move { second.set_table("beta").await });
        let _ = tokio::join!(slow, fast);

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Ready);
        assert_eq!(state.descriptors.len(), 1);
        assert_eq!(
            state.descriptors[0].field, "beta_col",
            "stale alpha schema must never win over beta"
        );
    }

    #[tokio::test]
    async fn window_change_reloads_rows_only() {
        let service = Arc::new(
            MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")])
                .with_rows(order_rows(3)),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");
        orchestrator.start().await;
        assert_eq!(service.counts(), (1, 1, 1));

        let window = QueryWindow::default()
            .page(1)
            .sorted_by("total", SortDirection::Desc);
        orchestrator.set_window(window).await;

        let (resolves, schemas, rows) = service.counts();
        assert_eq!(resolves, 1, "window change must not re-resolve the source");
        assert_eq!(schemas, 1, "window change must not reload the schema");
        assert_eq!(rows, 2);

        let query = service
            .last_rows_query
            .lock()
            .unwrap()
            .clone()
            .expect("a rows query was issued");
        assert_eq!(query.page, 2, "backend pages are 1-based");
        assert_eq!(query.limit, 25);
        assert_eq!(query.sort_by.as_deref(), Some("total"));
        assert_eq!(query.sort_order, Some(SortDirection::Desc));

        assert_eq!(orchestrator.snapshot().await.stage, Stage::Ready);
    }

    #[tokio::test]
    async fn window_change_before_rows_stage_is_ignored() {
        let service = Arc::new(MockService::new());
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");

        orchestrator.set_window(QueryWindow::default().page(2)).await;

        let (resolves, _, rows) = service.counts();
        assert_eq!(resolves, 0);
        assert_eq!(rows, 0);
        assert_eq!(orchestrator.snapshot().await.stage, Stage::ResolvingSource);
    }

    #[tokio::test]
    async fn row_failure_retains_descriptors_and_allows_retry_window() {
        let service = Arc::new(MockService {
            row_success: false,
            row_message: Some("row scan interrupted".to_string()),
            ..MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")])
        });
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Failed);
        assert!(state.error.unwrap_or_default().contains("row scan interrupted"));
        assert_eq!(state.descriptors.len(), 1, "schema survives a row failure");
        assert!(state.page.is_none());

        // The pager stays usable after a row-stage failure.
        orchestrator.set_window(QueryWindow::default().page(1)).await;
        let (resolves, schemas, rows) = service.counts();
        assert_eq!((resolves, schemas), (1, 1));
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn refresh_restarts_the_whole_pipeline() {
        let service = Arc::new(
            MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")])
                .with_rows(order_rows(3)),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");
        orchestrator.start().await;
        orchestrator.refresh().await;

        assert_eq!(service.counts(), (2, 2, 2));
        assert_eq!(orchestrator.snapshot().await.stage, Stage::Ready);
    }

    #[tokio::test]
    async fn zero_rows_is_a_valid_ready_state() {
        let service = Arc::new(
            MockService::new()
                .with_connection(connection(7, "Orders DB", "postgresql", false))
                .with_columns("orders", vec![wire_column("total", "decimal(10,2)")]),
        );
        let orchestrator = FetchOrchestrator::new(service.clone(), "7", "orders");
        orchestrator.start().await;

        let state = orchestrator.snapshot().await;
        assert_eq!(state.stage, Stage::Ready);
        let page = state.page.expect("an empty page is still a page");
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 0);
    }
}
