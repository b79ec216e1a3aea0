use serde::{Deserialize, Serialize};

use crate::models::{granularity::Granularity, price::PriceKind};

/// Per-request candle ceiling enforced by the upstream API, regardless of
/// granularity.
pub const MAX_CANDLES: u32 = 4000;

/// How a window request is bounded past its start timestamp.
///
/// Exactly one of the two bounds applies; the old `use_count` flag plus
/// nullable end date (and its silent precedence) does not exist here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowAnchor {
    /// Request `n` candles starting at `from`; `n` must be in
    /// `1..=MAX_CANDLES`.
    Count(u32),
    /// Request candles from `from` up to this end timestamp, in either of
    /// the two accepted formats.
    Until(String),
}

/// One bounded request to the candles endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleWindowRequest {
    /// Instrument to request, e.g. `"EUR_USD"`; must be a member of the
    /// source's instrument directory.
    pub instrument: String,
    /// Bucket width; must be a member of the fetch granularity set.
    pub granularity: Granularity,
    /// Which price side(s) to return per candle.
    pub price: PriceKind,
    /// Start timestamp, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
    pub from: String,
    /// Count or end-date bound for the window.
    pub anchor: WindowAnchor,
}

/// One collection run: an instrument, a granularity and a date range that
/// may span many windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionJob {
    /// Instrument to collect, e.g. `"EUR_USD"`.
    pub instrument: String,
    /// Bucket width, e.g. `"H1"`.
    pub granularity: Granularity,
    /// Range start, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
    pub from: String,
    /// Range end, same formats.
    pub to: String,
    /// Price side(s) to collect, e.g. `"MBA"`.
    pub price: PriceKind,
}
