//! Plain-text digest of the indicators selected for review.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::html::unescape;
use super::types::IndicatorRecord;

/// Writes the digest for every record whose goal is in `goals`.
///
/// Each indicator is written as its id, one `key: value` line per non-blank
/// field, and a closing `---` line. Returns the number of indicators written.
pub fn write_digest<W: Write, S: AsRef<str>>(
    out: &mut W,
    records: &[IndicatorRecord],
    goals: &[S],
) -> Result<usize> {
    let mut written = 0;

    for record in records {
        let goal = record.id.goal();
        if !goals.iter().any(|g| g.as_ref() == goal) {
            continue;
        }

        writeln!(out, "{}", record.id)?;
        for (key, value) in &record.fields {
            let Some(value) = value else { continue };
            if value.trim_end().is_empty() {
                continue;
            }
            writeln!(out, "{key}: {}", unescape(value))?;
        }
        writeln!(out, "---")?;
        written += 1;
    }

    Ok(written)
}

/// Creates (or truncates) the report at `path` and writes the digest into it.
pub fn write_report<S: AsRef<str>>(
    path: &Path,
    records: &[IndicatorRecord],
    goals: &[S],
) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let written = write_digest(&mut writer, records, goals)?;
    writer.flush()?;

    debug!(path = %path.display(), written, "Digest report written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::IndicatorId;
    use std::env;
    use std::fs;

    fn record(id: &str, fields: &[(&str, Option<&str>)]) -> IndicatorRecord {
        IndicatorRecord {
            id: IndicatorId::new(id),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        }
    }

    fn digest(records: &[IndicatorRecord], goals: &[&str]) -> String {
        let mut buf = Vec::new();
        write_digest(&mut buf, records, goals).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_digest_format() {
        let records = [record(
            "2-1-1",
            &[
                ("STAT_CONC_DEF", Some("D&eacute;finition")),
                ("DATA_COMP", Some("   ")),
                ("REC_USE_LIM", None),
                ("indicator_available", Some("Oui")),
            ],
        )];

        assert_eq!(
            digest(&records, &["2"]),
            "2-1-1\nSTAT_CONC_DEF: Définition\nindicator_available: Oui\n---\n"
        );
    }

    #[test]
    fn test_digest_filters_goals() {
        let records = [
            record("1-1-1", &[("DATA_COMP", Some("a"))]),
            record("12-1-1", &[("DATA_COMP", Some("b"))]),
            record("2-1-1", &[]),
        ];

        assert_eq!(digest(&records, &["12", "2"]), "12-1-1\nDATA_COMP: b\n---\n2-1-1\n---\n");
    }

    #[test]
    fn test_goal_match_is_exact() {
        let records = [record("12-1-1", &[])];
        assert_eq!(digest(&records, &["1"]), "");
    }

    #[test]
    fn test_multiline_values_kept() {
        let records = [record("5-1-1", &[("page_content", Some("ligne 1\nligne 2\n"))])];
        assert_eq!(digest(&records, &["5"]), "5-1-1\npage_content: ligne 1\nligne 2\n\n---\n");
    }

    #[test]
    fn test_write_report_truncates_existing_file() {
        let path = env::temp_dir().join("sdg_tools_report.txt");
        fs::write(&path, "stale content\n").unwrap();

        let written = write_report(&path, &[record("6-1-1", &[])], &["6"]).unwrap();
        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "6-1-1\n---\n");

        fs::remove_file(&path).unwrap();
    }
}
