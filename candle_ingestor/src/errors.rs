use thiserror::Error;

use crate::calendar::CalendarError;
use crate::io::sink::SinkError;
use crate::providers::errors::{ProviderError, ProviderInitError};
use shared_utils::config::ConfigError;

/// The unified error type for the `candle_ingestor` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from a candle source (validation, API error).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider's HTTP session could not be constructed.
    #[error("Provider setup error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error from the candle calendar.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// An error originating from a data sink (e.g., file I/O, serialization).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
