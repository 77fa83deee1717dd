//! Error types for the remote sources and the send form.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`SourceError`] failures.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failures while talking to the artwork or palette services.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[error("failed to send request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    #[error("unexpected response status {status} from `{url}`")]
    RequestStatus { url: String, status: StatusCode },
    /// The response body could not be read.
    #[error("failed to read response body from `{url}`")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not the JSON shape we expect.
    #[error("failed to decode response from `{url}`")]
    DecodeResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// None of the search results is wider than it is tall.
    #[error("no landscape artwork among {searched} search results")]
    NoLandscapeArtwork { searched: usize },
}

/// Reasons the postcard form refuses to send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} email is required")]
    MissingEmail { field: &'static str },
    #[error("{field} email `{value}` is not a valid address")]
    InvalidEmail { field: &'static str, value: String },
}
