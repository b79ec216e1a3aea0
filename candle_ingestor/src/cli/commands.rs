use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{granularity::Granularity, price::PriceKind};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (candle_ingestor.toml)
    #[arg(short, long)]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the account's tradeable instruments
    Instruments,

    /// Collect one instrument over one date range
    Collect {
        /// Instrument to collect (e.g. "EUR_USD")
        #[arg(long)]
        instrument: String,

        /// Candle granularity: M1, M5, M15, M30, H1, H4, D
        #[arg(long, default_value = "H1")]
        granularity: Granularity,

        /// Range start, "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SSZ"
        #[arg(long)]
        from: String,

        /// Range end, same formats
        #[arg(long)]
        to: String,

        /// Price side(s): M, B, A or MBA
        #[arg(long, default_value = "MBA")]
        price: PriceKind,

        /// Directory the CSV file is written into
        #[arg(long, default_value = "data/instruments")]
        output_dir: PathBuf,
    },

    /// Execute a batch of collection jobs
    Batch {
        /// Source of batch jobs: file, stdin, or json
        #[arg(long, default_value = "stdin")]
        source: String,

        /// Path to JSON file (when source=file) or inline JSON string (when source=json)
        #[arg(long)]
        input: Option<String>,

        /// Directory the CSV files are written into
        #[arg(long, default_value = "data/instruments")]
        output_dir: PathBuf,
    },
}
