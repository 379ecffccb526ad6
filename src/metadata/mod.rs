//! Metadata digest for translation review.
//!
//! Scans the per-indicator metadata of an SDG dataset, keeps the indicators
//! whose source organisations are not all on the allow-list, extracts a few
//! text fields from their metadata and indicator-config files, resolves
//! translation keys, and writes a plain-text digest for the selected goals.

pub mod html;
pub mod loader;
pub mod orgs;
pub mod report;
pub mod translate;
pub mod types;

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::indicator::IndicatorId;
use crate::yaml::load_mapping;
use loader::{DatasetLayout, index_by_indicator, list_yaml_files};
use orgs::{OrgAllowList, needs_review, source_organisations};
use report::write_report;
use translate::TranslationTable;
use types::IndicatorRecord;

pub const DEFAULT_SOURCE_DIR: &str = "sdg-data-donnees-odd";
pub const DEFAULT_LANGUAGE: &str = "fr";
pub const DEFAULT_META_KEYS: &[&str] = &["STAT_CONC_DEF", "DATA_COMP", "REC_USE_LIM"];
pub const DEFAULT_INDICATOR_CONFIG_KEYS: &[&str] = &["indicator_available", "page_content"];
pub const DEFAULT_GOALS: &[&str] = &["2", "5", "6", "7", "8", "9", "11", "12", "14"];
pub const DEFAULT_OUTPUT: &str = "meta.txt";

/// Inputs for a digest run.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub source_dir: PathBuf,
    /// Language subdirectory; empty for untranslated metadata.
    pub language: String,
    pub meta_keys: Vec<String>,
    pub indicator_config_keys: Vec<String>,
    pub goals: Vec<String>,
    pub allow_list: OrgAllowList,
    pub output: PathBuf,
}

impl Default for DigestConfig {
    fn default() -> Self {
        let owned =
            |values: &[&str]| -> Vec<String> { values.iter().map(|s| s.to_string()).collect() };
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
            meta_keys: owned(DEFAULT_META_KEYS),
            indicator_config_keys: owned(DEFAULT_INDICATOR_CONFIG_KEYS),
            goals: owned(DEFAULT_GOALS),
            allow_list: OrgAllowList::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Counts reported at the end of a digest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub scanned: usize,
    pub kept: usize,
    pub skipped: usize,
    pub translated_fields: usize,
    pub written: usize,
}

/// Builds the review records for every metadata file in the dataset.
///
/// Records come back in natural indicator order with translations resolved.
#[tracing::instrument(skip_all, fields(source_dir = %config.source_dir.display(), language = %config.language))]
pub fn collect_records(config: &DigestConfig) -> Result<(Vec<IndicatorRecord>, DigestSummary)> {
    let layout = DatasetLayout::new(&config.source_dir, &config.language);

    let meta_files = list_yaml_files(&layout.meta_dir())?;
    let config_files = index_by_indicator(list_yaml_files(&layout.indicator_config_dir())?);
    let translation_files = list_yaml_files(&layout.translations_dir())?;

    let mut summary = DigestSummary {
        scanned: meta_files.len(),
        ..Default::default()
    };
    let mut records = Vec::new();

    for path in &meta_files {
        let Some(id) = IndicatorId::from_path(path) else {
            continue;
        };

        let metadata = load_mapping(path)?;
        let sources = source_organisations(&metadata);
        if !needs_review(&sources, &config.allow_list) {
            debug!(indicator = %id, ?sources, "All sources on allow-list, skipping");
            summary.skipped += 1;
            continue;
        }

        let mut record = IndicatorRecord::new(id);
        record.extend_from(&metadata, &config.meta_keys);

        match config_files.get(&record.id) {
            Some(config_path) => {
                let indicator_config = load_mapping(config_path)?;
                record.extend_from(&indicator_config, &config.indicator_config_keys);
            }
            None => warn!(indicator = %record.id, "No indicator-config file for indicator"),
        }

        records.push(record);
    }

    let translations = TranslationTable::load(&translation_files)?;
    for record in &mut records {
        summary.translated_fields += translations.resolve(record);
    }

    records.sort_by(|a, b| a.id.cmp(&b.id));
    summary.kept = records.len();

    Ok((records, summary))
}

/// Runs the full digest: collect, resolve, and write the report.
pub fn run_digest(config: &DigestConfig) -> Result<DigestSummary> {
    let (records, mut summary) = collect_records(config)?;
    summary.written = write_report(&config.output, &records, &config.goals)?;

    info!(
        scanned = summary.scanned,
        kept = summary.kept,
        skipped = summary.skipped,
        translated_fields = summary.translated_fields,
        written = summary.written,
        output = %config.output.display(),
        "Metadata digest complete"
    );

    Ok(summary)
}
