#![cfg(test)]
use candle_ingestor::collector::WindowedCollector;
use candle_ingestor::config::OandaConfig;
use candle_ingestor::models::{
    granularity::Granularity,
    price::PriceKind,
    request::{CandleWindowRequest, CollectionJob, WindowAnchor},
};
use candle_ingestor::providers::{oanda::OandaProvider, CandleSource};
use secrecy::SecretString;
use serial_test::serial;

fn practice_config() -> Option<OandaConfig> {
    // Pulls OANDA_API_KEY / OANDA_ACCOUNT_ID from .env when present.
    dotenvy::dotenv().ok();
    let api_key = std::env::var(OandaConfig::API_KEY_ENV).ok()?;
    let account_id = std::env::var("OANDA_ACCOUNT_ID").ok()?;
    Some(OandaConfig {
        api_url: "https://api-fxpractice.oanda.com/v3".into(),
        account_id,
        api_key: SecretString::from(api_key),
    })
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_oanda_provider_fetch_candles() {
    // This test requires OANDA_API_KEY and OANDA_ACCOUNT_ID to be set.
    let Some(config) = practice_config() else {
        println!("Skipping test_oanda_provider_fetch_candles: credentials not set.");
        return;
    };

    let provider = OandaProvider::connect(&config)
        .await
        .expect("Failed to connect OandaProvider");
    assert!(
        provider.instruments().contains("EUR_USD"),
        "Expected EUR_USD in the instrument directory"
    );

    let request = CandleWindowRequest {
        instrument: "EUR_USD".into(),
        granularity: Granularity::H1,
        price: PriceKind::MidBidAsk,
        from: "2020-01-06".into(),
        anchor: WindowAnchor::Count(10),
    };
    let candles = provider
        .fetch_candles(&request)
        .await
        .expect("fetch_candles returned an error");

    assert_eq!(candles.len(), 10);
    assert!(candles[0].mid.is_some());
    assert!(candles[0].bid.is_some());
    assert!(candles[0].ask.is_some());
    assert!(candles.windows(2).all(|pair| pair[0].time < pair[1].time));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_oanda_collect_spanning_multiple_windows() {
    let Some(config) = practice_config() else {
        println!("Skipping test_oanda_collect_spanning_multiple_windows: credentials not set.");
        return;
    };

    let provider = OandaProvider::connect(&config)
        .await
        .expect("Failed to connect OandaProvider");

    let job = CollectionJob {
        instrument: "EUR_USD".into(),
        granularity: Granularity::H1,
        from: "2019-01-01".into(),
        to: "2020-01-01".into(),
        price: PriceKind::Mid,
    };
    let series = WindowedCollector::new(&provider)
        .collect(&job)
        .await
        .expect("collect returned an error")
        .expect("collect aborted");

    // A year of hourly FX candles needs more than one window.
    assert!(series.candles.len() > 4000);
    assert!(series
        .candles
        .windows(2)
        .all(|pair| pair[0].time < pair[1].time));
}
