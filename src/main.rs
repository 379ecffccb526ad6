//! CLI entry point for the SDG indicator tools.
//!
//! Provides a subcommand for extracting metadata that needs translation
//! review and one for charting indicator progress by goal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sdg_tools::metadata::orgs::OrgAllowList;
use sdg_tools::metadata::{self, DigestConfig, run_digest};
use sdg_tools::progress::aggregate::LevelSource;
use sdg_tools::progress::chart::Layout;
use sdg_tools::progress::{self, ProgressConfig, run_progress};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sdg_tools")]
#[command(about = "Reports and charts over SDG indicator YAML data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a text digest of metadata for indicators not sourced only from allow-listed organisations
    MetaDigest {
        /// Root of the dataset (contains meta/, indicator-config/, translations/)
        #[arg(short, long, default_value = metadata::DEFAULT_SOURCE_DIR)]
        source_dir: PathBuf,

        /// Language subdirectory; pass an empty string for untranslated metadata
        #[arg(short, long, default_value = metadata::DEFAULT_LANGUAGE)]
        language: String,

        /// Metadata keys to extract
        #[arg(long, value_delimiter = ',', default_values = metadata::DEFAULT_META_KEYS.iter().copied())]
        meta_keys: Vec<String>,

        /// Indicator-config keys to extract
        #[arg(long, value_delimiter = ',', default_values = metadata::DEFAULT_INDICATOR_CONFIG_KEYS.iter().copied())]
        config_keys: Vec<String>,

        /// Goals to include in the report
        #[arg(short, long, value_delimiter = ',', default_values = metadata::DEFAULT_GOALS.iter().copied())]
        goals: Vec<String>,

        /// JSON array of organisation names replacing the built-in allow-list
        #[arg(long)]
        orgs_file: Option<PathBuf>,

        /// Text file to write the digest to
        #[arg(short, long, default_value = metadata::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Count indicators by goal and progress status and draw a lollipop chart
    Progress {
        /// Progress YAML (indicator id -> progress_status, score)
        #[arg(value_name = "FILE")]
        src: PathBuf,

        /// Optional: write the goal-by-status pivot to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// SVG file to write the chart to
        #[arg(long, default_value = progress::DEFAULT_CHART)]
        chart: PathBuf,

        /// Chart layout: vertical or horizontal
        #[arg(long, value_enum, default_value = "vertical")]
        layout: Layout,

        /// Bucket indicators by their progress status or by their score
        #[arg(long, value_enum, default_value = "status")]
        level_from: LevelSource,

        /// Optional: directory holding E-WEB-Goal-NN.png icons
        #[arg(long)]
        icons_dir: Option<PathBuf>,

        /// Optional: write status percentages to this JSON file
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sdg_tools.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sdg_tools.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

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

    match cli.command {
        Commands::MetaDigest {
            source_dir,
            language,
            meta_keys,
            config_keys,
            goals,
            orgs_file,
            output,
        } => {
            let allow_list = match orgs_file {
                Some(path) => OrgAllowList::load(&path)?,
                None => OrgAllowList::default(),
            };
            info!(organisations = allow_list.len(), "Allow-list loaded");

            let config = DigestConfig {
                source_dir,
                language,
                meta_keys,
                indicator_config_keys: config_keys,
                goals,
                allow_list,
                output,
            };
            run_digest(&config)?;
        }
        Commands::Progress {
            src,
            csv,
            chart,
            layout,
            level_from,
            icons_dir,
            summary_json,
        } => {
            let config = ProgressConfig {
                src,
                csv,
                chart,
                layout,
                level_from,
                icons_dir,
                summary_json,
            };
            run_progress(&config)?;
        }
    }

    Ok(())
}
