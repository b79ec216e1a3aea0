use std::error::Error;
use std::path::Path;

use candle_ingestor::cli::commands::{Cli, Commands};
use candle_ingestor::cli::params::{
    parse_jobs_from_file, parse_jobs_from_json_string, parse_jobs_from_stdin,
};
use candle_ingestor::collector::WindowedCollector;
use candle_ingestor::config::OandaConfig;
use candle_ingestor::io::{csv_sink::CsvSink, sink::DataSink};
use candle_ingestor::models::request::CollectionJob;
use candle_ingestor::providers::{oanda::OandaProvider, CandleSource};
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let config = OandaConfig::load(&cli.config)?;
    let provider = OandaProvider::connect(&config).await?;
    info!(
        instruments = provider.instruments().len(),
        "instrument directory loaded"
    );

    match &cli.command {
        Commands::Instruments => {
            for name in provider.instruments().names() {
                println!("{name}");
            }
        }

        Commands::Collect {
            instrument,
            granularity,
            from,
            to,
            price,
            output_dir,
        } => {
            let job = CollectionJob {
                instrument: instrument.clone(),
                granularity: *granularity,
                from: from.clone(),
                to: to.clone(),
                price: *price,
            };
            run_job(&provider, &job, output_dir).await?;
        }

        Commands::Batch {
            source,
            input,
            output_dir,
        } => {
            let jobs = match source.as_str() {
                "file" => {
                    let file_path = input.as_ref().ok_or("File path required for source=file")?;
                    parse_jobs_from_file(file_path)?
                }
                "stdin" => parse_jobs_from_stdin()?,
                "json" => {
                    let json_str = input
                        .as_ref()
                        .ok_or("JSON string required for source=json")?;
                    parse_jobs_from_json_string(json_str)?
                }
                _ => return Err("Invalid source. Use 'file', 'stdin', or 'json'".into()),
            };

            let mut success_count = 0;
            let mut error_count = 0;
            for job in &jobs {
                if !provider.instruments().contains(&job.instrument) {
                    warn!(instrument = %job.instrument, "not in tradeable set, skipping");
                    error_count += 1;
                    continue;
                }
                match run_job(&provider, job, output_dir).await {
                    Ok(true) => success_count += 1,
                    Ok(false) => error_count += 1,
                    Err(err) => {
                        error!(instrument = %job.instrument, %err, "job failed");
                        error_count += 1;
                    }
                }
            }

            // Summary goes to stderr so it doesn't interfere with machine
            // parsing of the printed paths.
            eprintln!("SUMMARY: {success_count} succeeded, {error_count} failed");
        }
    }
    Ok(())
}

/// Runs one collection job and writes the result; prints the output path on
/// success. `Ok(false)` means the run aborted before any window was fetched.
async fn run_job(
    provider: &OandaProvider,
    job: &CollectionJob,
    output_dir: &Path,
) -> Result<bool, Box<dyn Error>> {
    info!(
        instrument = %job.instrument,
        granularity = %job.granularity,
        from = %job.from,
        to = %job.to,
        "collecting candle data"
    );

    let collector = WindowedCollector::new(provider);
    let Some(series) = collector.collect(job).await? else {
        warn!(instrument = %job.instrument, "collection aborted, nothing to write");
        return Ok(false);
    };

    info!(
        instrument = %job.instrument,
        candles = series.candles.len(),
        "saving candle data"
    );
    let sink = CsvSink::new(output_dir);
    let path = sink.write(&series).await?;
    println!("{}", path.display());
    Ok(true)
}
