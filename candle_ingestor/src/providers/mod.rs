//! Source abstraction for historical candle data.
//!
//! This module defines the [`CandleSource`] trait, a unified interface for
//! fetching bounded windows of candles from a market data vendor together
//! with the vendor's known-instrument set.
//!
//! Each concrete implementation (such as [`oanda::OandaProvider`]) handles
//! vendor-specific request construction, validation and response decoding,
//! and converts the wire format into the canonical
//! [`Candle`](crate::models::candle::Candle) model.
//!
//! The trait is object-safe, so callers that select a vendor at runtime can
//! hold a `Box<dyn CandleSource>`.

pub mod errors;
pub mod oanda;

use async_trait::async_trait;

use crate::models::{candle::Candle, instrument::InstrumentDirectory, request::CandleWindowRequest};

pub use errors::{ProviderError, ProviderInitError};

#[async_trait]
pub trait CandleSource {
    /// The known-instrument set this source can serve, populated before any
    /// fetch runs and read-only afterwards.
    fn instruments(&self) -> &InstrumentDirectory;

    /// Fetches one bounded window of candles, chronologically ascending.
    async fn fetch_candles(
        &self,
        request: &CandleWindowRequest,
    ) -> Result<Vec<Candle>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        granularity::Granularity, instrument::Instrument, price::PriceKind, request::WindowAnchor,
    };

    struct EmptySource {
        directory: InstrumentDirectory,
    }

    #[async_trait]
    impl CandleSource for EmptySource {
        fn instruments(&self) -> &InstrumentDirectory {
            &self.directory
        }

        async fn fetch_candles(
            &self,
            _request: &CandleWindowRequest,
        ) -> Result<Vec<Candle>, ProviderError> {
            Ok(vec![])
        }
    }

    // The trait must stay object-safe for runtime source selection.
    #[tokio::test]
    async fn dynamic_dispatch_works() {
        let source: Box<dyn CandleSource> = Box::new(EmptySource {
            directory: InstrumentDirectory::new([Instrument {
                name: "EUR_USD".into(),
                display_name: "EUR/USD".into(),
                instrument_type: "CURRENCY".into(),
            }]),
        });

        assert!(source.instruments().contains("EUR_USD"));

        let request = CandleWindowRequest {
            instrument: "EUR_USD".into(),
            granularity: Granularity::H1,
            price: PriceKind::Mid,
            from: "2020-01-01".into(),
            anchor: WindowAnchor::Count(10),
        };
        let candles = source.fetch_candles(&request).await.unwrap();
        assert!(candles.is_empty());
    }
}
