//! Loading progress entries and counting them by goal and status.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use super::level::{level_status, score_level};
use super::types::{GoalStatusCount, ProgressEntry, ProgressStatus, ProgressSummary, StatusShare};
use crate::indicator::IndicatorId;

/// Which field decides an indicator's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LevelSource {
    /// The categorical `progress_status` field.
    #[default]
    Status,
    /// The `score` field, bucketed into levels.
    Score,
}

/// Reads the progress YAML: a mapping from indicator id to its entry.
pub fn load_progress(path: &Path) -> Result<BTreeMap<IndicatorId, ProgressEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let raw: BTreeMap<String, ProgressEntry> = serde_yaml_ng::from_str(&content)
        .with_context(|| format!("failed to parse progress YAML in {}", path.display()))?;

    Ok(raw
        .into_iter()
        .map(|(id, entry)| (IndicatorId::new(id), entry))
        .collect())
}

/// Resolves the status an entry is counted under, or `None` if it is unmeasured.
fn measured_status(
    id: &IndicatorId,
    entry: &ProgressEntry,
    source: LevelSource,
) -> Result<Option<ProgressStatus>> {
    match source {
        LevelSource::Status => Ok(entry
            .progress_status
            .as_deref()
            .and_then(ProgressStatus::from_key)),
        LevelSource::Score => {
            let Some(score) = &entry.score else {
                return Ok(None);
            };
            let level = score_level(score).with_context(|| format!("indicator {id}"))?;
            Ok(level_status(level))
        }
    }
}

/// Counts measured indicators per goal and status, ordered by goal then level.
///
/// # Errors
///
/// Returns an error if a measured indicator's id has no numeric goal, or if
/// a score is out of range in [`LevelSource::Score`] mode.
pub fn count_by_goal_status(
    entries: &BTreeMap<IndicatorId, ProgressEntry>,
    source: LevelSource,
) -> Result<Vec<GoalStatusCount>> {
    let mut counts: BTreeMap<(u8, ProgressStatus), usize> = BTreeMap::new();
    let mut unmeasured = 0usize;

    for (id, entry) in entries {
        let Some(status) = measured_status(id, entry, source)? else {
            unmeasured += 1;
            continue;
        };

        let Some(goal) = id.goal_number() else {
            bail!("indicator id '{id}' does not start with a goal number");
        };
        if !(1..=17).contains(&goal) {
            warn!(indicator = %id, goal, "Goal outside 1-17 will not appear on the chart");
        }

        *counts.entry((goal, status)).or_default() += 1;
    }

    debug!(measured = counts.values().sum::<usize>(), unmeasured, "Progress entries counted");

    Ok(counts
        .into_iter()
        .map(|((goal, status), number)| GoalStatusCount { goal, status, number })
        .collect())
}

/// Percentage of `part` in `total`, or 0 when `total` is 0.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Share of each status that occurs in `counts`, in level order.
pub fn summarize(counts: &[GoalStatusCount]) -> ProgressSummary {
    let total: usize = counts.iter().map(|c| c.number).sum();

    let mut by_status: BTreeMap<ProgressStatus, usize> = BTreeMap::new();
    for c in counts {
        *by_status.entry(c.status).or_default() += c.number;
    }

    let statuses = by_status
        .into_iter()
        .map(|(status, number)| StatusShare {
            status: status.key(),
            label: status.label(),
            number,
            percent: pct(number, total),
        })
        .collect();

    ProgressSummary {
        generated_at: Utc::now(),
        total,
        statuses,
    }
}
