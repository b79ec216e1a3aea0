use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use snafu::ResultExt;

use crate::calendar::to_instant_string;
use crate::io::sink::{DataSink, IoSnafu, SinkError, WriteSnafu};
use crate::models::candle::{Candle, CandlePrices, CandleSeries};

const HEADER: [&str; 15] = [
    "time", "complete", "volume", "mid_o", "mid_h", "mid_l", "mid_c", "bid_o", "bid_h", "bid_l",
    "bid_c", "ask_o", "ask_h", "ask_l", "ask_c",
];

/// Writes one CSV file per (instrument, granularity) under a base directory.
///
/// Price groups the series does not carry are left as empty cells, so the
/// column layout is identical for every price kind.
pub struct CsvSink {
    base_dir: PathBuf,
}

impl CsvSink {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn record(candle: &Candle) -> Vec<String> {
        let mut record = vec![
            to_instant_string(candle.time),
            candle.complete.to_string(),
            candle.volume.to_string(),
        ];
        for prices in [&candle.mid, &candle.bid, &candle.ask] {
            record.extend(ohlc_cells(prices));
        }
        record
    }
}

fn ohlc_cells(prices: &Option<CandlePrices>) -> [String; 4] {
    match prices {
        Some(prices) => [
            prices.open.to_string(),
            prices.high.to_string(),
            prices.low.to_string(),
            prices.close.to_string(),
        ],
        None => [String::new(), String::new(), String::new(), String::new()],
    }
}

#[async_trait]
impl DataSink for CsvSink {
    type Output = PathBuf;

    async fn write(&self, series: &CandleSeries) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.base_dir).context(IoSnafu)?;

        let path = self
            .base_dir
            .join(format!("{}_{}.csv", series.instrument, series.granularity));

        let mut writer = csv::Writer::from_path(&path).map_err(|err| {
            WriteSnafu {
                message: err.to_string(),
            }
            .build()
        })?;

        writer.write_record(HEADER).map_err(|err| {
            WriteSnafu {
                message: err.to_string(),
            }
            .build()
        })?;
        for candle in &series.candles {
            writer.write_record(Self::record(candle)).map_err(|err| {
                WriteSnafu {
                    message: err.to_string(),
                }
                .build()
            })?;
        }
        writer
            .into_inner()
            .map_err(|err| {
                WriteSnafu {
                    message: err.to_string(),
                }
                .build()
            })?
            .sync_all()
            .context(IoSnafu)?;

        Ok(path)
    }
}
