use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A price-kind code outside the recognized set.
#[derive(Debug, Error)]
#[error("unknown price kind: {0} (expected one of M, B, A, MBA)")]
pub struct ParsePriceKindError(pub String);

/// Which side(s) of the market a candle reports.
///
/// The wire codes are `"M"`, `"B"`, `"A"` and `"MBA"`; being a closed enum,
/// an invalid code can only be rejected at the parse boundary, never at
/// request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceKind {
    /// Midpoint candles only.
    #[serde(rename = "M")]
    Mid,
    /// Bid candles only.
    #[serde(rename = "B")]
    Bid,
    /// Ask candles only.
    #[serde(rename = "A")]
    Ask,
    /// Mid, bid and ask candles together.
    #[serde(rename = "MBA")]
    MidBidAsk,
}

impl PriceKind {
    /// Wire code sent as the `price` query parameter.
    pub const fn api_code(self) -> &'static str {
        match self {
            PriceKind::Mid => "M",
            PriceKind::Bid => "B",
            PriceKind::Ask => "A",
            PriceKind::MidBidAsk => "MBA",
        }
    }
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_code())
    }
}

impl FromStr for PriceKind {
    type Err = ParsePriceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(PriceKind::Mid),
            "B" => Ok(PriceKind::Bid),
            "A" => Ok(PriceKind::Ask),
            "MBA" => Ok(PriceKind::MidBidAsk),
            _ => Err(ParsePriceKindError(s.to_string())),
        }
    }
}
