//! Locating metadata, indicator-config and translation files in a dataset tree.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::indicator::IndicatorId;

/// Directory layout of an SDG open-data dataset.
///
/// ```text
/// <root>/meta/<language>/*.yml
/// <root>/indicator-config/*.yml
/// <root>/translations/<language>/*.yml
/// ```
///
/// An empty language selects the untranslated directories directly under
/// `meta/` and `translations/`.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    root: PathBuf,
    language: String,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            language: language.into(),
        }
    }

    fn localized(&self, dir: &str) -> PathBuf {
        let base = self.root.join(dir);
        if self.language.is_empty() {
            base
        } else {
            base.join(&self.language)
        }
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.localized("meta")
    }

    pub fn indicator_config_dir(&self) -> PathBuf {
        self.root.join("indicator-config")
    }

    pub fn translations_dir(&self) -> PathBuf {
        self.localized("translations")
    }
}

/// Lists the `*.yml` files directly inside `dir`, sorted by path.
pub fn list_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("yml") {
            continue;
        }

        files.push(path);
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Listed YAML files");
    Ok(files)
}

/// Maps each file to the indicator named by its basename.
pub fn index_by_indicator(files: Vec<PathBuf>) -> HashMap<IndicatorId, PathBuf> {
    files
        .into_iter()
        .filter_map(|path| IndicatorId::from_path(&path).map(|id| (id, path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_layout_with_language() {
        let layout = DatasetLayout::new("data", "fr");
        assert_eq!(layout.meta_dir(), PathBuf::from("data/meta/fr"));
        assert_eq!(layout.indicator_config_dir(), PathBuf::from("data/indicator-config"));
        assert_eq!(layout.translations_dir(), PathBuf::from("data/translations/fr"));
    }

    #[test]
    fn test_layout_untranslated() {
        let layout = DatasetLayout::new("data", "");
        assert_eq!(layout.meta_dir(), PathBuf::from("data/meta"));
        assert_eq!(layout.translations_dir(), PathBuf::from("data/translations"));
    }

    #[test]
    fn test_list_yaml_files_filters_extension_and_dirs() {
        let dir = temp_dir("sdg_tools_loader_list");
        fs::write(dir.join("2-1-1.yml"), "a: 1").unwrap();
        fs::write(dir.join("1-1-1.yml"), "a: 1").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("3-1-1.yaml"), "").unwrap();
        fs::create_dir_all(dir.join("nested.yml")).unwrap();

        let files = list_yaml_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["1-1-1.yml", "2-1-1.yml"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_yaml_files_missing_dir() {
        let err = list_yaml_files(Path::new("/nonexistent/sdg_tools")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sdg_tools"));
    }

    #[test]
    fn test_index_by_indicator() {
        let index = index_by_indicator(vec![PathBuf::from("cfg/5-1-1.yml")]);
        assert_eq!(
            index.get(&IndicatorId::new("5-1-1")),
            Some(&PathBuf::from("cfg/5-1-1.yml"))
        );
    }
}
