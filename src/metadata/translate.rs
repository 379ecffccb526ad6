//! Translation tables keyed by `<file stem>.<key>`.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use super::types::IndicatorRecord;
use crate::indicator::IndicatorId;
use crate::yaml::{entries, load_mapping, value_to_string};

/// Lookup table from translation keys (`global_goals.2-title`) to text.
///
/// A key mapped to `None` had a null value in its file.
#[derive(Debug, Default)]
pub struct TranslationTable {
    entries: HashMap<String, Option<String>>,
}

impl TranslationTable {
    /// Loads every top-level entry of each file, prefixed with the file's stem.
    pub fn load(files: &[PathBuf]) -> Result<Self> {
        let mut table = Self::default();

        for path in files {
            let Some(prefix) = IndicatorId::from_path(path) else {
                continue;
            };
            let content = load_mapping(path)?;
            for (key, value) in entries(&content) {
                table.insert(format!("{prefix}.{key}"), value_to_string(value));
            }
        }

        debug!(entries = table.len(), "Translation table loaded");
        Ok(table)
    }

    pub fn insert(&mut self, key: String, text: Option<String>) {
        self.entries.insert(key, text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every field value that is a translation key with its text.
    ///
    /// Returns the number of fields replaced.
    pub fn resolve(&self, record: &mut IndicatorRecord) -> usize {
        let mut replaced = 0;
        for (_, value) in record.fields.iter_mut() {
            let Some(text) = value.as_deref().and_then(|v| self.entries.get(v)) else {
                continue;
            };
            *value = text.clone();
            replaced += 1;
        }
        replaced
    }
}
