use browser::error::BrowseError;
use connectors::api::error::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Browse failed: {0}")]
    Browse(#[from] BrowseError),

    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid sort direction '{0}' (expected 'asc' or 'desc')")]
    InvalidSortDirection(String),

    #[error("Pipeline failed: {0}")]
    Pipeline(String),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
