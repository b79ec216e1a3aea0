use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur within a [`CandleSource`](super::CandleSource)
/// implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-success response; carries the raw body.
    #[error("API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    /// A successful response could not be decoded into the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful response that carries no candle field at all. A present
    /// but empty candle list is a valid empty result, not this error.
    #[error("response has no candle data")]
    MissingCandles { body: String },

    /// A request parameter failed validation; never retried.
    #[error("invalid {argument} `{value}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        message: String,
    },

    /// The instrument directory could not be populated.
    #[error("instrument directory unavailable: {reason}")]
    DirectoryUnavailable { reason: String },
}

/// Errors while constructing a provider's HTTP session.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// The API credential cannot be encoded as a header value.
    #[error("invalid API credential: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
