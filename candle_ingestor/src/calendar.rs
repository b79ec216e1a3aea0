//! Pure candle arithmetic over date ranges.
//!
//! [`candles_between`] answers "how many whole candle buckets does this range
//! span" without any I/O; the collector uses it to size its request windows.
//!
//! Two timestamp formats are accepted: a bare date (`2020-01-01`) or a full
//! UTC instant (`2020-01-01T06:30:00Z`). The format is inferred from the
//! *from* value and applied to both inputs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::models::granularity::Granularity;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failures of the candle calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The range start does not precede the range end.
    #[error("invalid range: {from} must be earlier than {to}")]
    InvalidRange { from: String, to: String },

    /// The granularity is outside the calendar set.
    #[error("unsupported granularity: {0}")]
    UnsupportedGranularity(Granularity),

    /// A timestamp does not parse under the inferred format.
    #[error("unparseable timestamp: {value}")]
    Timestamp { value: String },
}

/// Parses a timestamp in whichever of the two accepted formats it uses.
pub fn parse_time_point(value: &str) -> Result<DateTime<Utc>, CalendarError> {
    if value.contains('T') {
        parse_instant(value)
    } else {
        parse_date(value)
    }
}

/// Formats a UTC instant in the full accepted format.
pub fn to_instant_string(time: DateTime<Utc>) -> String {
    time.format(INSTANT_FORMAT).to_string()
}

/// Number of whole candle buckets between two timestamps.
///
/// Floor division: a fractional trailing bucket is not counted. The caller
/// is expected to compensate when it wants the final partial bucket as well.
pub fn candles_between(
    from: &str,
    to: &str,
    granularity: Granularity,
) -> Result<u32, CalendarError> {
    // Format choice follows the *from* value for both inputs.
    let (from_time, to_time) = if from.contains('T') {
        (parse_instant(from)?, parse_instant(to)?)
    } else {
        (parse_date(from)?, parse_date(to)?)
    };

    if from_time >= to_time {
        return Err(CalendarError::InvalidRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    if !granularity.is_calendar() {
        return Err(CalendarError::UnsupportedGranularity(granularity));
    }

    let total_minutes = (to_time - from_time).num_minutes();
    Ok((total_minutes / granularity.minutes()) as u32)
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, CalendarError> {
    NaiveDateTime::parse_from_str(value, INSTANT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| CalendarError::Timestamp {
            value: value.to_string(),
        })
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, CalendarError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| CalendarError::Timestamp {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_day_of_hourly_candles() {
        let count = candles_between("2020-01-01", "2020-01-02", Granularity::H1).unwrap();
        assert_eq!(count, 24);
    }

    #[test]
    fn floor_division_discards_partial_buckets() {
        let count = candles_between(
            "2020-01-01T00:00:00Z",
            "2020-01-01T05:30:00Z",
            Granularity::H2,
        )
        .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn counts_for_every_calendar_granularity() {
        let cases = [
            (Granularity::M1, 1440),
            (Granularity::M5, 288),
            (Granularity::M30, 48),
            (Granularity::H1, 24),
            (Granularity::H2, 12),
            (Granularity::H4, 6),
            (Granularity::D, 1),
            (Granularity::W, 0),
        ];
        for (granularity, expected) in cases {
            let count = candles_between("2021-03-01", "2021-03-02", granularity).unwrap();
            assert_eq!(count, expected, "granularity {granularity}");
        }
    }

    #[test]
    fn equal_endpoints_are_an_invalid_range() {
        let err = candles_between("2020-01-01", "2020-01-01", Granularity::H1).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn reversed_endpoints_are_an_invalid_range() {
        let err = candles_between(
            "2020-06-01T12:00:00Z",
            "2020-06-01T08:00:00Z",
            Granularity::M5,
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn m15_is_outside_the_calendar_set() {
        let err = candles_between("2020-01-01", "2020-01-02", Granularity::M15).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::UnsupportedGranularity(Granularity::M15)
        ));
    }

    #[test]
    fn format_is_inferred_from_the_from_value() {
        // from has a time separator, so both inputs must be full instants.
        let err = candles_between("2020-01-01T00:00:00Z", "2020-01-02", Granularity::H1)
            .unwrap_err();
        assert!(matches!(err, CalendarError::Timestamp { .. }));

        // from is a bare date, so a full-instant to is rejected.
        let err = candles_between("2020-01-01", "2020-01-02T00:00:00Z", Granularity::H1)
            .unwrap_err();
        assert!(matches!(err, CalendarError::Timestamp { .. }));
    }

    #[test]
    fn parse_time_point_accepts_both_formats() {
        let midnight = parse_time_point("2020-01-01").unwrap();
        let explicit = parse_time_point("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(midnight, explicit);
        assert!(parse_time_point("01-01-2020").is_err());
        assert!(parse_time_point("2020-01-01T00:00Z").is_err());
    }

    #[test]
    fn instant_string_round_trips() {
        let time = parse_time_point("2023-11-05T17:45:00Z").unwrap();
        assert_eq!(to_instant_string(time), "2023-11-05T17:45:00Z");
    }
}
