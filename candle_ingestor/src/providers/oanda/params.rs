//! Request validation and query construction for the candles endpoint.
//!
//! Validation happens before any network traffic, first failure wins, in the
//! order: instrument membership, granularity membership, timestamp
//! parseability, window count bounds. The price kind is a closed enum and
//! needs no runtime check.

use crate::calendar::{parse_time_point, to_instant_string};
use crate::models::granularity::FETCH_GRANULARITIES;
use crate::models::instrument::InstrumentDirectory;
use crate::models::request::{CandleWindowRequest, WindowAnchor, MAX_CANDLES};
use crate::providers::errors::ProviderError;

/// A window request with its timestamps normalized to the full UTC instant
/// format the API expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedWindow {
    pub from: String,
    pub anchor: NormalizedAnchor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedAnchor {
    Count(u32),
    Until(String),
}

/// Validates a window request against the known-instrument set and
/// normalizes its timestamps.
pub fn validate_request(
    directory: &InstrumentDirectory,
    request: &CandleWindowRequest,
) -> Result<NormalizedWindow, ProviderError> {
    if !directory.contains(&request.instrument) {
        return Err(ProviderError::InvalidArgument {
            argument: "instrument",
            value: request.instrument.clone(),
            message: "instrument must be in the tradeable instrument set".into(),
        });
    }

    if !request.granularity.is_fetchable() {
        return Err(ProviderError::InvalidArgument {
            argument: "granularity",
            value: request.granularity.to_string(),
            message: format!("granularity must be one of {FETCH_GRANULARITIES:?}"),
        });
    }

    let from = normalize_timestamp(&request.from, "from")?;

    let anchor = match &request.anchor {
        WindowAnchor::Count(count) => {
            if !(1..=MAX_CANDLES).contains(count) {
                return Err(ProviderError::InvalidArgument {
                    argument: "count",
                    value: count.to_string(),
                    message: format!("count must be between 1 and {MAX_CANDLES}"),
                });
            }
            NormalizedAnchor::Count(*count)
        }
        WindowAnchor::Until(end) => NormalizedAnchor::Until(normalize_timestamp(end, "to")?),
    };

    Ok(NormalizedWindow { from, anchor })
}

/// Builds the query string pairs for one validated window request.
pub fn construct_params(
    request: &CandleWindowRequest,
    window: &NormalizedWindow,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("granularity", request.granularity.to_string()),
        ("price", request.price.api_code().to_string()),
        ("from", window.from.clone()),
    ];
    match &window.anchor {
        NormalizedAnchor::Count(count) => params.push(("count", count.to_string())),
        NormalizedAnchor::Until(end) => params.push(("to", end.clone())),
    }
    params
}

fn normalize_timestamp(value: &str, argument: &'static str) -> Result<String, ProviderError> {
    parse_time_point(value)
        .map(to_instant_string)
        .map_err(|_| ProviderError::InvalidArgument {
            argument,
            value: value.to_string(),
            message: "timestamps must be 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SSZ'".into(),
        })
}
