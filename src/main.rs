//! CLI entry point for the bike-sharing statistics tool.
//!
//! Loads the daily and hourly tables once, answers the fixed questions and
//! hands the labelled results off as JSON or CSV for rendering elsewhere.

use anyhow::Result;
use bike_share_stats::{
    DataSources, DatasetContext, ReportOptions, build_report,
    derive::WeekdayConvention,
    output::{export_csv_dir, print_pretty, print_summary, to_json, write_json},
    pipeline::build_chart,
    report::Question,
    top_k::DEFAULT_TOP_K,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_share_stats")]
#[command(about = "Descriptive statistics over a bike-sharing dataset", long_about = None)]
struct Cli {
    /// Directory containing day.csv and hour.csv
    #[arg(short = 'd', long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Daily table path (overrides --data-dir and BIKE_DAILY_CSV)
    #[arg(long, global = true)]
    daily: Option<PathBuf>,

    /// Hourly table path (overrides --data-dir and BIKE_HOURLY_CSV)
    #[arg(long, global = true)]
    hourly: Option<PathBuf>,

    /// Which day the weekday column counts from
    #[arg(long, global = true, value_enum, default_value_t = Convention::MondayZero)]
    weekday_convention: Convention,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer every question and emit the full report
    Report {
        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Hours kept per AM/PM half in the peak-hours chart
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Total rentals by season
    Seasons,
    /// Total rentals by weather condition
    Weather,
    /// Busiest hours of the morning and afternoon
    PeakHours {
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Average rentals on weekdays versus weekends
    DayTypes,
    /// Total rentals per date
    Trend,
    /// Write one CSV per chart into a directory
    ExportCsv {
        #[arg(long, default_value = "charts")]
        dir: PathBuf,

        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Convention {
    /// 0 = Monday, weekend is 5 and 6
    MondayZero,
    /// 0 = Sunday, weekend is 6 and 0
    SundayZero,
}

impl From<Convention> for WeekdayConvention {
    fn from(c: Convention) -> Self {
        match c {
            Convention::MondayZero => WeekdayConvention::MondayZero,
            Convention::SundayZero => WeekdayConvention::SundayZero,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_share_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_share_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!(error = %e, "Run failed");
        // Flush the file writer; process::exit skips destructors.
        drop(file_guard);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let sources = DataSources::from_env(&cli.data_dir).with_overrides(cli.daily, cli.hourly);
    info!(
        daily = %sources.daily.display(),
        hourly = %sources.hourly.display(),
        "Using data sources"
    );

    let ctx = DatasetContext::new(sources);
    let mut options = ReportOptions {
        weekday_convention: cli.weekday_convention.into(),
        ..ReportOptions::default()
    };

    match cli.command {
        Commands::Report {
            output,
            format,
            top_k,
        } => {
            options.top_k = top_k;
            let report = build_report(ctx.dataset()?, &options)?;
            print_summary(&report);

            match (output, format) {
                (Some(path), Format::Json) => {
                    write_json(&path, &report)?;
                    info!(path = %path.display(), "Report saved");
                }
                (Some(path), Format::Pretty) => {
                    std::fs::write(&path, format!("{report:#?}"))?;
                    info!(path = %path.display(), "Report saved");
                }
                (None, Format::Json) => println!("{}", to_json(&report)?),
                (None, Format::Pretty) => {
                    print_pretty(&report);
                    println!("{report:#?}");
                }
            }
        }
        Commands::Seasons => emit_chart(&ctx, Question::Seasonal, &options)?,
        Commands::Weather => emit_chart(&ctx, Question::Weather, &options)?,
        Commands::PeakHours { top_k } => {
            options.top_k = top_k;
            emit_chart(&ctx, Question::PeakHours, &options)?;
        }
        Commands::DayTypes => emit_chart(&ctx, Question::DayType, &options)?,
        Commands::Trend => emit_chart(&ctx, Question::Trend, &options)?,
        Commands::ExportCsv { dir, top_k } => {
            options.top_k = top_k;
            let report = build_report(ctx.dataset()?, &options)?;
            let written = export_csv_dir(&dir, &report)?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Builds a single chart and prints it as JSON on stdout.
#[tracing::instrument(skip(ctx, question, options), fields(question = question.slug()))]
fn emit_chart(ctx: &DatasetContext, question: Question, options: &ReportOptions) -> Result<()> {
    let chart = build_chart(ctx.dataset()?, question, options)?;

    if let Some(row) = chart.highest() {
        info!(label = %row.label, value = row.value, "Highest");
    }
    if let Some(row) = chart.lowest() {
        info!(label = %row.label, value = row.value, "Lowest");
    }

    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}
