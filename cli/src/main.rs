//! `flight-schedule` command line
//!
//! Thin wrapper over the core library: generate turnaround schedules, link
//! daily sheets, partition sheets, and build passenger-load rows. Records go
//! in and out as CSV with the sheet column names; logs go to stderr.

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use flight_schedule_core_rs::batch::{
    submit_in_batches, BatchSink, RetryPolicy, SinkError,
};
use flight_schedule_core_rs::generator::{generate_pairs, GeneratorConfig};
use flight_schedule_core_rs::linking::{auto_link_records, link_records, LinkerConfig};
use flight_schedule_core_rs::load::{build_load_rows, LoadOptions};
use flight_schedule_core_rs::{DailyRecord, FlightLeg, PseudoRandomStream, TimeDistribution};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_BATCH_SIZE_ARG: &str = "500";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate seeded turnaround pairs
    Generate(GenerateArgs),
    /// Link arrival and departure records into turnarounds
    Link {
        /// Daily sheet CSV; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "ADB")]
        home: String,
        /// Minimum ground time in minutes
        #[arg(long, default_value_t = 30)]
        min_ground: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Split records into arrival and departure rows without matching
    Autolink {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "ADB")]
        home: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build passenger-load rows from a daily sheet
    Load(LoadArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON generator configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Window start, e.g. 2024-01-01T00:00:00
    #[arg(long)]
    start: Option<NaiveDateTime>,
    /// Window end
    #[arg(long)]
    end: Option<NaiveDateTime>,
    #[arg(long)]
    home: Option<String>,
    #[arg(long)]
    pairs: Option<usize>,
    #[arg(long, value_enum)]
    distribution: Option<Distribution>,
    /// Seed string; entropy when omitted
    #[arg(long)]
    seed: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Emit JSON-lines batches of this size instead of a single document
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_BATCH_SIZE_ARG)]
    batch_size: Option<usize>,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct LoadArgs {
    #[arg(short, long)]
    input: Option<PathBuf>,
    #[arg(long)]
    seed: Option<String>,
    #[arg(long, default_value = "ADB")]
    home: String,
    #[arg(long, default_value_t = 50)]
    min_total: u32,
    #[arg(long, default_value_t = 180)]
    max_total: u32,
    /// Percent
    #[arg(long, default_value_t = 0)]
    child_ratio_min: u32,
    /// Percent
    #[arg(long, default_value_t = 40)]
    child_ratio_max: u32,
    #[arg(long, default_value = "J")]
    default_service_type: String,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Distribution {
    Uniform,
    Peak,
}

impl From<Distribution> for TimeDistribution {
    fn from(value: Distribution) -> Self {
        match value {
            Distribution::Uniform => TimeDistribution::Uniform,
            Distribution::Peak => TimeDistribution::Peak,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Link {
            input,
            home,
            min_ground,
            output,
        } => {
            let records = read_records(input.as_deref())?;
            let outcome = link_records(&records, &LinkerConfig::new(&home, min_ground));
            for warning in &outcome.stats.warnings {
                tracing::warn!("{warning}");
            }
            tracing::info!(
                arrivals = outcome.stats.total_arrivals,
                departures = outcome.stats.total_departures,
                matched = outcome.stats.matched,
                unmatched_arrivals = outcome.stats.unmatched_arrivals,
                unmatched_departures = outcome.stats.unmatched_departures,
                "linking complete"
            );
            write_csv(output.as_deref(), &outcome.linked)
        }
        Commands::Autolink {
            input,
            home,
            output,
        } => {
            let records = read_records(input.as_deref())?;
            let outcome = auto_link_records(&records, &home);
            tracing::info!(
                total = outcome.stats.total,
                arrivals = outcome.stats.arrivals,
                departures = outcome.stats.departures,
                skipped = outcome.stats.skipped,
                "auto-link complete"
            );
            write_csv(output.as_deref(), &outcome.rows)
        }
        Commands::Load(args) => run_load(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            serde_json::from_reader::<_, GeneratorConfig>(file)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => match (args.start, args.end) {
            (Some(start), Some(end)) => GeneratorConfig::for_window(start, end),
            _ => bail!("Either --config or both --start and --end are required"),
        },
    };

    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(end) = args.end {
        config.end = end;
    }
    if let Some(home) = args.home {
        config.home_station = home;
    }
    if let Some(pairs) = args.pairs {
        config.pair_count = pairs;
    }
    if let Some(distribution) = args.distribution {
        config.distribution = distribution.into();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut rng = PseudoRandomStream::from_optional_seed(config.seed.as_deref());
    let outcome = generate_pairs(&config, &mut rng)?;
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    let digest = outcome.digest()?;
    tracing::info!(
        requested = outcome.requested_pairs,
        generated = outcome.pairs_generated(),
        abandoned = outcome.pairs_abandoned(),
        %digest,
        "generation complete"
    );

    let mut writer = open_output(args.output.as_deref())?;
    if let Some(batch_size) = args.batch_size {
        let mut sink = JsonLinesSink {
            writer: &mut writer,
        };
        let report = submit_in_batches(
            &outcome.legs,
            batch_size,
            &mut sink,
            &RetryPolicy::default(),
            std::thread::sleep,
        )?;
        tracing::info!(
            batches = report.batches_sent,
            legs = report.legs_sent,
            retries = report.retries,
            "batches written"
        );
        return Ok(());
    }

    match args.format {
        Format::Csv => write_csv_to(writer, &outcome.legs),
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, &outcome.legs)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn run_load(args: LoadArgs) -> Result<()> {
    let options = LoadOptions {
        home: args.home,
        min_total: args.min_total,
        max_total: args.max_total,
        child_ratio_min: args.child_ratio_min,
        child_ratio_max: args.child_ratio_max,
        default_service_type: args.default_service_type,
    };

    let records = read_records(args.input.as_deref())?;
    let mut rng = PseudoRandomStream::from_optional_seed(args.seed.as_deref());
    let outcome = build_load_rows(&records, &options, &mut rng).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::anyhow!("Invalid load options: {}", messages.join("; "))
    })?;

    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        total = outcome.total,
        rows = outcome.rows.len(),
        skipped = outcome.skipped(),
        "load rows built"
    );
    write_csv(args.output.as_deref(), &outcome.rows)
}

/// Writes each batch as one JSON line
struct JsonLinesSink<'a> {
    writer: &'a mut Box<dyn Write>,
}

impl BatchSink for JsonLinesSink<'_> {
    fn submit(&mut self, batch_index: usize, batch: &[FlightLeg]) -> Result<(), SinkError> {
        #[derive(Serialize)]
        struct Envelope<'b> {
            batch: usize,
            legs: &'b [FlightLeg],
        }

        let line = serde_json::to_string(&Envelope {
            batch: batch_index + 1,
            legs: batch,
        })
        .map_err(|e| SinkError(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| SinkError(e.to_string()))
    }
}

fn read_records(input: Option<&Path>) -> Result<Vec<DailyRecord>> {
    let source: Box<dyn Read> = match input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);
    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<DailyRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            // An I/O failure ends the read; a bad row only skips itself
            Err(err) if err.is_io_error() => {
                return Err(err).context("Failed to read daily sheet");
            }
            Err(err) => tracing::warn!(row = line + 1, %err, "skipping malformed record"),
        }
    }
    tracing::debug!(records = records.len(), "read daily sheet");
    Ok(records)
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    })
}

fn write_csv<T: Serialize>(output: Option<&Path>, rows: &[T]) -> Result<()> {
    write_csv_to(open_output(output)?, rows)
}

fn write_csv_to<T: Serialize>(writer: Box<dyn Write>, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
