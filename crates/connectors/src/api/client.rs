use crate::api::{
    error::ApiError,
    service::TableService,
    types::{ConnectionRecord, RowsQuery, RowsResponse, SchemaResponse},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP implementation of [`TableService`] against the management backend.
pub struct HttpTableService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTableService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpTableService {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|err| ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: err.to_string(),
        })
    }
}

#[async_trait]
impl TableService for HttpTableService {
    async fn connection_by_id(&self, id: &str) -> Result<Option<ConnectionRecord>, ApiError> {
        let endpoint = self.endpoint(&format!("/api/connections/{id}"));
        debug!("Looking up connection at {endpoint}");

        let response = self.client.get(&endpoint).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(&endpoint, response).await.map(Some)
    }

    async fn schema(&self, source_id: &str) -> Result<SchemaResponse, ApiError> {
        let endpoint = self.endpoint(&format!("/api/connections/{source_id}/schema"));
        debug!("Fetching schema from {endpoint}");

        let response = self.client.get(&endpoint).send().await?;
        Self::decode(&endpoint, response).await
    }

    async fn table_rows(
        &self,
        source_id: &str,
        table: &str,
        query: &RowsQuery,
    ) -> Result<RowsResponse, ApiError> {
        let endpoint = self.endpoint(&format!("/api/connections/{source_id}/tables/{table}/rows"));
        debug!(
            "Fetching rows from {endpoint} (page {}, limit {})",
            query.page, query.limit
        );

        let response = self.client.get(&endpoint).query(query).send().await?;
        Self::decode(&endpoint, response).await
    }
}
