use thiserror::Error;

/// Why a poll cycle failed.
///
/// Every variant surfaces to the user as the same fixed message; the detail
/// only goes to the log.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout, or a body that was not the expected JSON
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The JSON decoded but the values make no sense
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
