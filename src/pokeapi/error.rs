/// Errors from PokeAPI calls that fail a whole page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// PokeAPI returned a non-2xx status.
    #[error("PokeAPI {endpoint} returned {status}")]
    Status { endpoint: String, status: u16 },
    /// The response body did not have the expected shape.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}
