//! Candle granularities and the two recognized granularity sets.
//!
//! The calendar set ([`CALENDAR_GRANULARITIES`]) is what
//! [`candles_between`](crate::calendar::candles_between) accepts; the fetch set
//! ([`FETCH_GRANULARITIES`]) is what the candles endpoint accepts. The two sets
//! overlap but are not equal (the calendar knows `H2`/`W`, the endpoint knows
//! `M15`) and are deliberately kept distinct.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A granularity code outside the recognized set.
#[derive(Debug, Error)]
#[error("unknown granularity: {0}")]
pub struct ParseGranularityError(pub String);

/// Fixed time-bucket width for candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// 1 minute
    M1,
    /// 5 minutes
    M5,
    /// 15 minutes
    M15,
    /// 30 minutes
    M30,
    /// 1 hour
    H1,
    /// 2 hours
    H2,
    /// 4 hours
    H4,
    /// 1 day
    D,
    /// 1 week
    W,
}

/// Granularities the calendar can count candles for.
pub const CALENDAR_GRANULARITIES: [Granularity; 8] = [
    Granularity::M1,
    Granularity::M5,
    Granularity::M30,
    Granularity::H1,
    Granularity::H2,
    Granularity::H4,
    Granularity::D,
    Granularity::W,
];

/// Granularities the candles endpoint accepts.
pub const FETCH_GRANULARITIES: [Granularity; 7] = [
    Granularity::M1,
    Granularity::M5,
    Granularity::M15,
    Granularity::M30,
    Granularity::H1,
    Granularity::H4,
    Granularity::D,
];

impl Granularity {
    /// Duration of one candle bucket in whole minutes.
    pub const fn minutes(self) -> i64 {
        match self {
            Granularity::M1 => 1,
            Granularity::M5 => 5,
            Granularity::M15 => 15,
            Granularity::M30 => 30,
            Granularity::H1 => 60,
            Granularity::H2 => 120,
            Granularity::H4 => 240,
            Granularity::D => 1440,
            Granularity::W => 10080,
        }
    }

    /// Wire code used both in API queries and in job files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Granularity::M1 => "M1",
            Granularity::M5 => "M5",
            Granularity::M15 => "M15",
            Granularity::M30 => "M30",
            Granularity::H1 => "H1",
            Granularity::H2 => "H2",
            Granularity::H4 => "H4",
            Granularity::D => "D",
            Granularity::W => "W",
        }
    }

    /// Whether `candles_between` supports this granularity.
    pub fn is_calendar(self) -> bool {
        CALENDAR_GRANULARITIES.contains(&self)
    }

    /// Whether the candles endpoint accepts this granularity.
    pub fn is_fetchable(self) -> bool {
        FETCH_GRANULARITIES.contains(&self)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M1" => Ok(Granularity::M1),
            "M5" => Ok(Granularity::M5),
            "M15" => Ok(Granularity::M15),
            "M30" => Ok(Granularity::M30),
            "H1" => Ok(Granularity::H1),
            "H2" => Ok(Granularity::H2),
            "H4" => Ok(Granularity::H4),
            "D" => Ok(Granularity::D),
            "W" => Ok(Granularity::W),
            _ => Err(ParseGranularityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_granularity_has_one_minute_mapping() {
        let minutes: Vec<i64> = [
            Granularity::M1,
            Granularity::M5,
            Granularity::M15,
            Granularity::M30,
            Granularity::H1,
            Granularity::H2,
            Granularity::H4,
            Granularity::D,
            Granularity::W,
        ]
        .iter()
        .map(|g| g.minutes())
        .collect();
        assert_eq!(minutes, vec![1, 5, 15, 30, 60, 120, 240, 1440, 10080]);
    }

    #[test]
    fn calendar_and_fetch_sets_diverge() {
        assert!(Granularity::W.is_calendar());
        assert!(!Granularity::W.is_fetchable());
        assert!(Granularity::H2.is_calendar());
        assert!(!Granularity::H2.is_fetchable());
        assert!(Granularity::M15.is_fetchable());
        assert!(!Granularity::M15.is_calendar());
    }

    #[test]
    fn parses_wire_codes() {
        assert_eq!("M30".parse::<Granularity>().unwrap(), Granularity::M30);
        assert_eq!("D".parse::<Granularity>().unwrap(), Granularity::D);
        assert!("M2".parse::<Granularity>().is_err());
        assert!("h1".parse::<Granularity>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for g in CALENDAR_GRANULARITIES.iter().chain(FETCH_GRANULARITIES.iter()) {
            assert_eq!(g.to_string().parse::<Granularity>().unwrap(), *g);
        }
    }
}
