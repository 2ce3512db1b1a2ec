use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// The body did not decode into the expected shape.
    #[error("Malformed response from {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },
}
