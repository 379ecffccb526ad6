//! Progress status aggregation and lollipop chart.
//!
//! Reads per-indicator progress scores, buckets them into five ordinal
//! levels, counts indicators per goal and status, and renders the counts as
//! a lollipop chart with an optional pivoted CSV and JSON summary.

pub mod aggregate;
pub mod chart;
pub mod level;
pub mod output;
pub mod types;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use aggregate::{LevelSource, count_by_goal_status, load_progress, summarize};
use chart::{ChartOptions, Layout, write_chart};
use output::{log_summary, write_pivot_csv, write_summary_json};
use types::{GoalStatusCount, ProgressSummary};

pub const DEFAULT_CHART: &str = "lollipop.svg";

/// Inputs for a progress run.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub src: PathBuf,
    pub csv: Option<PathBuf>,
    pub chart: PathBuf,
    pub layout: Layout,
    pub level_from: LevelSource,
    pub icons_dir: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

impl ProgressConfig {
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            csv: None,
            chart: PathBuf::from(DEFAULT_CHART),
            layout: Layout::default(),
            level_from: LevelSource::default(),
            icons_dir: None,
            summary_json: None,
        }
    }
}

/// Result of a progress run.
#[derive(Debug, Clone)]
pub struct ProgressReport {
    pub counts: Vec<GoalStatusCount>,
    pub summary: ProgressSummary,
}

/// Loads, aggregates and writes every configured output.
#[tracing::instrument(skip_all, fields(src = %config.src.display(), layout = ?config.layout, level_from = ?config.level_from))]
pub fn run_progress(config: &ProgressConfig) -> Result<ProgressReport> {
    let entries = load_progress(&config.src)?;
    let counts = count_by_goal_status(&entries, config.level_from)?;

    if let Some(csv) = &config.csv {
        write_pivot_csv(csv, &counts)?;
    }

    let summary = summarize(&counts);
    log_summary(&summary);
    if let Some(json) = &config.summary_json {
        write_summary_json(json, &summary)?;
    }

    let options = ChartOptions {
        layout: config.layout,
        icons_dir: config.icons_dir.clone(),
    };
    write_chart(&config.chart, &counts, &options)?;

    info!(
        indicators = entries.len(),
        measured = summary.total,
        groups = counts.len(),
        chart = %config.chart.display(),
        "Progress chart complete"
    );

    Ok(ProgressReport { counts, summary })
}
