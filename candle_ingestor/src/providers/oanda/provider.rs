use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};

use crate::config::OandaConfig;
use crate::errors::Error;
use crate::models::{
    candle::Candle,
    instrument::{Instrument, InstrumentDirectory},
    request::CandleWindowRequest,
};
use crate::providers::{
    oanda::{
        params::{construct_params, validate_request},
        response::{OandaCandlesResponse, OandaInstrumentsResponse},
    },
    CandleSource, ProviderError, ProviderInitError,
};

pub struct OandaProvider {
    client: Client,
    api_url: String,
    account_id: String,
    instruments: InstrumentDirectory,
    _api_key: SecretString,
}

impl OandaProvider {
    /// Builds the authenticated session and bootstraps the instrument
    /// directory, which stays read-only for the rest of the run.
    pub async fn connect(config: &OandaConfig) -> Result<Self, Error> {
        let mut provider = Self::new(config)?;
        provider.instruments = provider.fetch_instrument_directory().await?;
        Ok(provider)
    }

    /// Builds the HTTP session with the bearer credential attached once as a
    /// default header; no per-request authentication state.
    fn new(config: &OandaConfig) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!(
            "Bearer {}",
            config.api_key.expose_secret()
        ))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            instruments: InstrumentDirectory::default(),
            _api_key: config.api_key.clone(),
        })
    }

    /// Fetches the account's tradeable instrument listing.
    ///
    /// Every failure mode surfaces as `DirectoryUnavailable`; a missing
    /// listing never silently degrades to an empty set.
    async fn fetch_instrument_directory(&self) -> Result<InstrumentDirectory, ProviderError> {
        let url = format!("{}/accounts/{}/instruments", self.api_url, self.account_id);
        let response = self.client.get(&url).send().await.map_err(|err| {
            ProviderError::DirectoryUnavailable {
                reason: err.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::DirectoryUnavailable {
                reason: err.to_string(),
            })?;
        if !status.is_success() {
            return Err(ProviderError::DirectoryUnavailable {
                reason: format!("{status}: {body}"),
            });
        }

        let listing: OandaInstrumentsResponse =
            serde_json::from_str(&body).map_err(|err| ProviderError::DirectoryUnavailable {
                reason: err.to_string(),
            })?;
        let instruments = listing
            .instruments
            .ok_or_else(|| ProviderError::DirectoryUnavailable {
                reason: "response has no instruments field".into(),
            })?;

        Ok(InstrumentDirectory::new(
            instruments.into_iter().map(Instrument::from),
        ))
    }
}

#[async_trait]
impl CandleSource for OandaProvider {
    fn instruments(&self) -> &InstrumentDirectory {
        &self.instruments
    }

    async fn fetch_candles(
        &self,
        request: &CandleWindowRequest,
    ) -> Result<Vec<Candle>, ProviderError> {
        let window = validate_request(&self.instruments, request)?;

        let url = format!("{}/instruments/{}/candles", self.api_url, request.instrument);
        let query = construct_params(request, &window);
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api { status, body });
        }

        let decoded: OandaCandlesResponse = serde_json::from_str(&body)?;
        let candles = decoded
            .candles
            .ok_or(ProviderError::MissingCandles { body })?;

        Ok(candles.into_iter().map(Candle::from).collect())
    }
}
