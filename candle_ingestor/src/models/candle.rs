//! Canonical in-memory representation of a price candle.
//!
//! These structs are the standard output of every
//! [`CandleSource`](crate::providers::CandleSource) implementation; the
//! vendor wire format lives in the provider's response module and is
//! converted into this shape before it leaves the provider.

use chrono::{DateTime, Utc};

use crate::models::granularity::Granularity;

/// Open/high/low/close prices for one side of the market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandlePrices {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One time bucket of price data.
///
/// Which of the `bid`/`mid`/`ask` groups are populated depends on the
/// [`PriceKind`](crate::models::price::PriceKind) the candle was requested
/// with.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Bucket start timestamp (UTC).
    pub time: DateTime<Utc>,

    /// Whether the bucket has closed upstream. The trailing candle of a
    /// response is typically still forming.
    pub complete: bool,

    /// Number of trades in the bucket.
    pub volume: u64,

    /// Bid-side prices, when requested.
    pub bid: Option<CandlePrices>,

    /// Midpoint prices, when requested.
    pub mid: Option<CandlePrices>,

    /// Ask-side prices, when requested.
    pub ask: Option<CandlePrices>,
}

/// A complete ordered candle series for one instrument and granularity.
///
/// The pair of `instrument` and `granularity` doubles as the destination
/// identifier handed to a [`DataSink`](crate::io::sink::DataSink).
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    pub instrument: String,
    pub granularity: Granularity,
    pub candles: Vec<Candle>,
}
