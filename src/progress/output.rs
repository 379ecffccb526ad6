//! CSV and JSON outputs of the progress pipeline.

use anyhow::{Context, Result};
use csv::Writer;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::types::{GoalStatusCount, ProgressStatus, ProgressSummary};

/// Writes counts pivoted to one row per goal and one column per status.
///
/// Only statuses that occur somewhere get a column, ordered by status key.
/// Cells without indicators are left empty.
pub fn write_pivot<W: Write>(out: W, counts: &[GoalStatusCount]) -> Result<()> {
    let statuses: BTreeSet<ProgressStatus> = counts.iter().map(|c| c.status).collect();
    let mut columns: Vec<ProgressStatus> = statuses.into_iter().collect();
    columns.sort_by_key(|s| s.key());

    let mut rows: BTreeMap<u8, BTreeMap<ProgressStatus, usize>> = BTreeMap::new();
    for c in counts {
        *rows.entry(c.goal).or_default().entry(c.status).or_default() += c.number;
    }

    let mut writer = Writer::from_writer(out);

    let mut header = vec!["goal"];
    header.extend(columns.iter().map(|s| s.label()));
    writer.write_record(&header)?;

    for (goal, cells) in &rows {
        let mut record = vec![goal.to_string()];
        record.extend(
            columns
                .iter()
                .map(|s| cells.get(s).map(usize::to_string).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the pivot CSV to `path`, replacing any existing file.
pub fn write_pivot_csv(path: &Path, counts: &[GoalStatusCount]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_pivot(file, counts)?;
    debug!(path = %path.display(), "Pivot CSV written");
    Ok(())
}

/// Logs each status share at info level.
pub fn log_summary(summary: &ProgressSummary) {
    for share in &summary.statuses {
        info!(
            status = share.label,
            number = share.number,
            percent = share.percent,
            "Progress share"
        );
    }
    info!(total = summary.total, "Indicators with a progress status");
}

/// Writes the summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &ProgressSummary) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)?;
    debug!(path = %path.display(), "Summary JSON written");
    Ok(())
}
