//! CLI entry point for the traffic survey reporter.
//!
//! Without a subcommand the tool prompts for survey dates in a loop, printing
//! and saving a report and drawing a histogram for each. `analyze` does the
//! same for one date without prompting.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use traffic_survey::{
    config::Settings,
    output::{SurveySummary, to_json},
    prompt::Prompter,
    session::{publish, run_interactive},
    summarize_file,
    survey::SurveyDate,
};

#[derive(Parser)]
#[command(name = "traffic_survey")]
#[command(about = "Summarise a day of junction traffic survey data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for survey dates and report on each until told to stop (default)
    Interactive {
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Report on a single survey day
    Analyze {
        /// Survey date
        #[arg(value_name = "DD-MM-YYYY")]
        date: SurveyDate,

        /// Read this CSV instead of the file mapped from the date
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the report and hourly bins as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Do not write a histogram
        #[arg(long, default_value_t = false)]
        no_chart: bool,

        #[command(flatten)]
        paths: PathArgs,
    },
}

/// Overrides for the locations in [`Settings`].
#[derive(Args)]
struct PathArgs {
    /// Directory holding traffic_data<DD><MM><YYYY>.csv files
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Text file that reports are appended to
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// Directory histograms are written to
    #[arg(short, long)]
    chart_dir: Option<PathBuf>,
}

impl PathArgs {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(dir) = self.data_dir {
            settings.data_dir = dir;
        }
        if let Some(file) = self.results {
            settings.results_file = file;
        }
        if let Some(dir) = self.chart_dir {
            settings.chart_dir = dir;
        }
        settings
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/traffic_survey.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("traffic_survey.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr shares the terminal with the prompts, so it stays at warn by default
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

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
    let settings = Settings::from_env();

    match cli.command {
        None => interactive(&settings)?,
        Some(Commands::Interactive { paths }) => interactive(&paths.apply(settings))?,
        Some(Commands::Analyze {
            date,
            file,
            json,
            no_chart,
            paths,
        }) => {
            let settings = paths.apply(settings);
            let path = file.unwrap_or_else(|| settings.data_dir.join(date.file_name()));
            let (report, bins) = summarize_file(&path)?;

            if json {
                let summary = SurveySummary {
                    source: &path,
                    report: &report,
                    bins: &bins,
                };
                println!("{}", to_json(&summary)?);
            } else {
                publish(
                    &mut io::stdout(),
                    &settings,
                    &date,
                    &path,
                    &report,
                    &bins,
                    !no_chart,
                )?;
            }
        }
    }

    Ok(())
}

fn interactive(settings: &Settings) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_interactive(&mut prompter, settings)?;
    Ok(())
}
