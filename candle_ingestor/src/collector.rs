//! Windowed collection of candle ranges that exceed the per-request cap.
//!
//! [`WindowedCollector::collect`] walks an arbitrary date range in windows of
//! at most [`MAX_CANDLES`] candles, strictly sequentially: each window's
//! result anchors the next window's start. Two policies are explicit here:
//!
//! - **Seam:** the next window starts at the last collected timestamp, and
//!   appending drops anything at or before it, so the one-candle overlap is
//!   absorbed and the series stays strictly increasing.
//! - **Failure:** a failed window is logged, contributes nothing, and the
//!   cursor advances by the window's nominal span so the walk always
//!   terminates.

use chrono::Duration;
use tracing::{info, warn};

use crate::calendar::{candles_between, parse_time_point, to_instant_string};
use crate::models::granularity::FETCH_GRANULARITIES;
use crate::models::{
    candle::{Candle, CandleSeries},
    request::{CandleWindowRequest, CollectionJob, WindowAnchor, MAX_CANDLES},
};
use crate::providers::{CandleSource, ProviderError};

pub struct WindowedCollector<'a, S: CandleSource> {
    source: &'a S,
}

impl<'a, S: CandleSource> WindowedCollector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Collects the full ordered candle series for one job.
    ///
    /// Returns `Err` only for invalid caller input. A range the calendar
    /// cannot size is a recoverable setup failure reported as `Ok(None)`;
    /// per-window fetch failures degrade that window to empty, so the run
    /// itself never fails on data-plane errors; the series is just
    /// incomplete, with one warning logged per failed window.
    pub async fn collect(
        &self,
        job: &CollectionJob,
    ) -> Result<Option<CandleSeries>, ProviderError> {
        if !self.source.instruments().contains(&job.instrument) {
            return Err(ProviderError::InvalidArgument {
                argument: "instrument",
                value: job.instrument.clone(),
                message: "instrument must be in the tradeable instrument set".into(),
            });
        }
        if !job.granularity.is_fetchable() {
            return Err(ProviderError::InvalidArgument {
                argument: "granularity",
                value: job.granularity.to_string(),
                message: format!("granularity must be one of {FETCH_GRANULARITIES:?}"),
            });
        }
        let from = parse_time_point(&job.from).map_err(|_| ProviderError::InvalidArgument {
            argument: "from",
            value: job.from.clone(),
            message: "timestamps must be 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SSZ'".into(),
        })?;
        let to = parse_time_point(&job.to).map_err(|_| ProviderError::InvalidArgument {
            argument: "to",
            value: job.to.clone(),
            message: "timestamps must be 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SSZ'".into(),
        })?;

        // The +1 compensates for floor division so the final partial bucket
        // is still requested.
        let total = match candles_between(
            &to_instant_string(from),
            &to_instant_string(to),
            job.granularity,
        ) {
            Ok(count) => count + 1,
            Err(err) => {
                warn!(
                    instrument = %job.instrument,
                    granularity = %job.granularity,
                    %err,
                    "cannot size collection range, aborting run"
                );
                return Ok(None);
            }
        };

        let mut candles: Vec<Candle> = Vec::with_capacity(total as usize);

        if total <= MAX_CANDLES {
            match self.fetch_window(job, &to_instant_string(from), total).await {
                Ok(batch) => candles.extend(batch),
                Err(err) => {
                    warn!(
                        instrument = %job.instrument,
                        window_from = %to_instant_string(from),
                        %err,
                        "window fetch failed, series left empty"
                    );
                }
            }
            return Ok(Some(self.into_series(job, candles)));
        }

        let mut remaining = total;
        let mut cursor = from;
        while remaining > 0 {
            let window = remaining.min(MAX_CANDLES);
            info!(
                instrument = %job.instrument,
                granularity = %job.granularity,
                collected = candles.len(),
                remaining,
                "collecting window"
            );

            let window_from = to_instant_string(cursor);
            match self.fetch_window(job, &window_from, window).await {
                Ok(batch) => {
                    let last_time = candles.last().map(|candle| candle.time);
                    candles.extend(
                        batch
                            .into_iter()
                            .filter(|candle| last_time.is_none_or(|t| candle.time > t)),
                    );
                    if let Some(last) = candles.last() {
                        cursor = last.time;
                    }
                }
                Err(err) => {
                    warn!(
                        instrument = %job.instrument,
                        window_from = %window_from,
                        window_size = window,
                        %err,
                        "window fetch failed, skipping window"
                    );
                    // Forced advance by the window's nominal span keeps a
                    // repeatedly failing range from looping forever.
                    cursor += Duration::minutes(job.granularity.minutes() * i64::from(window));
                }
            }

            remaining -= window;
            if cursor >= to {
                break;
            }
        }

        Ok(Some(self.into_series(job, candles)))
    }

    async fn fetch_window(
        &self,
        job: &CollectionJob,
        from: &str,
        count: u32,
    ) -> Result<Vec<Candle>, ProviderError> {
        let request = CandleWindowRequest {
            instrument: job.instrument.clone(),
            granularity: job.granularity,
            price: job.price,
            from: from.to_string(),
            anchor: WindowAnchor::Count(count),
        };
        self.source.fetch_candles(&request).await
    }

    fn into_series(&self, job: &CollectionJob, candles: Vec<Candle>) -> CandleSeries {
        CandleSeries {
            instrument: job.instrument.clone(),
            granularity: job.granularity,
            candles,
        }
    }
}
