use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::candle::{Candle, CandlePrices};
use crate::models::instrument::Instrument;

/// One OHLC group as returned by the API; prices arrive string-encoded.
#[derive(Deserialize, Debug)]
pub struct OandaOhlc {
    #[serde(rename = "o", deserialize_with = "f64_from_str")]
    pub open: f64,
    #[serde(rename = "h", deserialize_with = "f64_from_str")]
    pub high: f64,
    #[serde(rename = "l", deserialize_with = "f64_from_str")]
    pub low: f64,
    #[serde(rename = "c", deserialize_with = "f64_from_str")]
    pub close: f64,
}

#[derive(Deserialize, Debug)]
pub struct OandaCandle {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub volume: u64,
    pub bid: Option<OandaOhlc>,
    pub mid: Option<OandaOhlc>,
    pub ask: Option<OandaOhlc>,
}

/// Body of `GET /instruments/{name}/candles`.
///
/// `candles` stays `None` when the field is absent, which the provider
/// reports as `MissingCandles`; an empty vector is a valid empty window.
#[derive(Deserialize, Debug)]
pub struct OandaCandlesResponse {
    pub candles: Option<Vec<OandaCandle>>,
}

#[derive(Deserialize, Debug)]
pub struct OandaInstrument {
    pub name: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub instrument_type: String,
}

/// Body of `GET /accounts/{id}/instruments`.
#[derive(Deserialize, Debug)]
pub struct OandaInstrumentsResponse {
    pub instruments: Option<Vec<OandaInstrument>>,
}

impl From<OandaOhlc> for CandlePrices {
    fn from(ohlc: OandaOhlc) -> Self {
        CandlePrices {
            open: ohlc.open,
            high: ohlc.high,
            low: ohlc.low,
            close: ohlc.close,
        }
    }
}

impl From<OandaCandle> for Candle {
    fn from(candle: OandaCandle) -> Self {
        Candle {
            time: candle.time,
            complete: candle.complete,
            volume: candle.volume,
            bid: candle.bid.map(CandlePrices::from),
            mid: candle.mid.map(CandlePrices::from),
            ask: candle.ask.map(CandlePrices::from),
        }
    }
}

impl From<OandaInstrument> for Instrument {
    fn from(instrument: OandaInstrument) -> Self {
        Instrument {
            name: instrument.name,
            display_name: instrument.display_name,
            instrument_type: instrument.instrument_type,
        }
    }
}

fn f64_from_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_candles_payload() {
        let body = r#"{
            "instrument": "EUR_USD",
            "granularity": "H1",
            "candles": [
                {
                    "complete": true,
                    "volume": 4127,
                    "time": "2020-01-02T00:00:00.000000000Z",
                    "mid": { "o": "1.12123", "h": "1.12256", "l": "1.12033", "c": "1.12190" }
                },
                {
                    "complete": false,
                    "volume": 312,
                    "time": "2020-01-02T01:00:00.000000000Z",
                    "bid": { "o": "1.12185", "h": "1.12201", "l": "1.12150", "c": "1.12163" },
                    "ask": { "o": "1.12199", "h": "1.12215", "l": "1.12164", "c": "1.12177" }
                }
            ]
        }"#;

        let response: OandaCandlesResponse = serde_json::from_str(body).unwrap();
        let candles: Vec<Candle> = response
            .candles
            .unwrap()
            .into_iter()
            .map(Candle::from)
            .collect();

        assert_eq!(candles.len(), 2);
        assert!(candles[0].complete);
        assert_eq!(candles[0].volume, 4127);
        let mid = candles[0].mid.unwrap();
        assert_eq!(mid.open, 1.12123);
        assert_eq!(mid.close, 1.12190);
        assert!(candles[0].bid.is_none());

        assert!(!candles[1].complete);
        assert!(candles[1].mid.is_none());
        assert!(candles[1].bid.is_some());
        assert!(candles[1].ask.is_some());
        assert!(candles[1].time > candles[0].time);
    }

    #[test]
    fn missing_candle_field_decodes_to_none() {
        let response: OandaCandlesResponse =
            serde_json::from_str(r#"{"errorMessage": "Insufficient authorization"}"#).unwrap();
        assert!(response.candles.is_none());

        let response: OandaCandlesResponse =
            serde_json::from_str(r#"{"candles": []}"#).unwrap();
        assert_eq!(response.candles.unwrap().len(), 0);
    }

    #[test]
    fn malformed_price_strings_are_decode_errors() {
        let body = r#"{"candles": [{"time": "2020-01-02T00:00:00Z", "mid": {"o": "x", "h": "1", "l": "1", "c": "1"}}]}"#;
        assert!(serde_json::from_str::<OandaCandlesResponse>(body).is_err());
    }

    #[test]
    fn decodes_an_instrument_listing() {
        let body = r#"{
            "instruments": [
                { "name": "EUR_USD", "type": "CURRENCY", "displayName": "EUR/USD" },
                { "name": "XAU_USD", "type": "METAL", "displayName": "Gold" }
            ]
        }"#;
        let response: OandaInstrumentsResponse = serde_json::from_str(body).unwrap();
        let instruments = response.instruments.unwrap();
        assert_eq!(instruments.len(), 2);
        assert_eq!(instruments[1].instrument_type, "METAL");
    }
}
