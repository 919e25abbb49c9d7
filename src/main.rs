use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use atlas_trends::data::duration::parse_span;
use atlas_trends::data::normalize;
use atlas_trends::{
    AnalysisReport, FileSource, OutputFormat, PayloadSource, ReaderSource, ResourceKind, Settings,
    TrendsError, TrendsQuery,
};

#[derive(Parser, Debug)]
#[command(name = "atlas-trends")]
#[command(version, about = "State segments, transition models and dwell times for RIPE Atlas Trends samples")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a saved Trends payload
    Analyze {
        /// Path to the payload JSON file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: String,

        /// Keep leading samples that carry no RTT
        #[arg(long)]
        keep_leading_invalid: bool,

        /// Output format (text or json)
        #[arg(short, long)]
        output: Option<OutputFormat>,

        /// Also write the report as JSON to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Describe a query and estimate its response time
    Estimate {
        /// Resource kind (ticks, trends, trends/summary)
        #[arg(short, long, default_value = "ticks")]
        resource: ResourceKind,

        /// Measurement ID
        #[arg(long)]
        msm: u64,

        /// Probe ID
        #[arg(long)]
        probe: u64,

        /// Range start (epoch seconds)
        #[arg(long)]
        start: Option<i64>,

        /// Range stop (epoch seconds, defaults to now)
        #[arg(long)]
        stop: Option<i64>,

        /// Range length when no start is given (e.g. "7d", "12h")
        #[arg(long)]
        window: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports can be piped
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    debug!(?settings, "loaded settings");

    match cli.command {
        Commands::Analyze {
            file,
            keep_leading_invalid,
            output,
            export,
        } => run_analyze(
            &file,
            !keep_leading_invalid && settings.skip_leading_invalid,
            output.unwrap_or(settings.output),
            export.as_deref(),
        ),
        Commands::Estimate {
            resource,
            msm,
            probe,
            start,
            stop,
            window,
        } => run_estimate(&settings, resource, msm, probe, start, stop, window.as_deref()),
    }
}

/// Normalize a payload and print its analysis report
fn run_analyze(
    file: &str,
    skip_leading_invalid: bool,
    output: OutputFormat,
    export: Option<&Path>,
) -> Result<()> {
    let mut source: Box<dyn PayloadSource> = if file == "-" {
        Box::new(ReaderSource::stdin())
    } else {
        Box::new(FileSource::new(file))
    };

    let payload = source
        .load()
        .with_context(|| format!("Failed to load payload from {}", source.description()))?;
    let series = normalize(&payload, skip_leading_invalid)?;
    info!(records = payload.len(), observations = series.len(), "normalized payload");

    let report = AnalysisReport::from_series(&series, source.description())?;
    print!("{}", report.render(output)?);
    if output == OutputFormat::Json {
        println!();
    }

    if let Some(path) = export {
        report
            .export(path)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
        eprintln!("Exported report to: {}", path.display());
    }

    Ok(())
}

/// Print a query description and its advisory estimate
fn run_estimate(
    settings: &Settings,
    resource: ResourceKind,
    msm: u64,
    probe: u64,
    start: Option<i64>,
    stop: Option<i64>,
    window: Option<&str>,
) -> Result<()> {
    let days = settings.default_window_days;
    let default_window =
        Duration::try_days(days).ok_or(TrendsError::WindowOutOfRange { days })?;
    let mut builder = TrendsQuery::builder(resource, msm, probe).window(default_window);

    if let Some(window) = window {
        builder = builder.window(parse_span(window)?);
    }
    if let Some(start) = start {
        builder = builder.start(epoch(start)?);
    }
    if let Some(stop) = stop {
        builder = builder.stop(epoch(stop)?);
    }

    let query = builder.build()?;
    let secs = query.log_estimate();

    println!("URL: {}", query.url(&settings.base_url));
    for (name, value) in query.params() {
        println!("{}: {}", name, value);
    }
    println!("Estimated query time: {:.1}s", secs);

    Ok(())
}

fn epoch(secs: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .with_context(|| format!("Timestamp out of range: {}", secs))
}
