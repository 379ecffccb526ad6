//! YAML file loading shared by the metadata and progress pipelines.

use anyhow::{Context, Result};
use serde_yaml_ng::{Mapping, Value};
use std::path::Path;

/// Reads a YAML file and returns its top-level mapping.
///
/// An empty document, or one whose root is not a mapping, yields an empty mapping.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml_ng::from_str(&content)
        .with_context(|| format!("failed to parse YAML in {}", path.display()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Ok(Mapping::new()),
    }
}

/// Renders a YAML value as text. Null yields `None`.
///
/// Scalars are stringified; sequences and mappings are re-serialized as YAML.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml_ng::to_string(value)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

/// Looks up a string key in a mapping.
pub fn get<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(key)
}

/// Iterates over entries whose key renders as text, yielding `(key, value)`.
pub fn entries(mapping: &Mapping) -> impl Iterator<Item = (String, &Value)> {
    mapping
        .iter()
        .filter_map(|(k, v)| value_to_string(k).map(|k| (k, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_load_mapping_empty_file() {
        let path = temp_path("sdg_tools_yaml_empty.yml");
        fs::write(&path, "\n").unwrap();

        assert!(load_mapping(&path).unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_mapping_non_mapping_root() {
        let path = temp_path("sdg_tools_yaml_list.yml");
        fs::write(&path, "- a\n- b\n").unwrap();

        assert!(load_mapping(&path).unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_mapping_malformed_names_file() {
        let path = temp_path("sdg_tools_yaml_bad.yml");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let err = load_mapping(&path).unwrap_err();
        assert!(format!("{err:#}").contains("sdg_tools_yaml_bad.yml"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_mapping_missing_file() {
        assert!(load_mapping(&temp_path("sdg_tools_yaml_missing.yml")).is_err());
    }

    #[test]
    fn test_value_to_string() {
        let doc: Value = serde_yaml_ng::from_str("a: text\nb: 3\nc: true\nd: ~\ne: [1, 2]\n").unwrap();
        let m = doc.as_mapping().unwrap();

        assert_eq!(value_to_string(get(m, "a").unwrap()).as_deref(), Some("text"));
        assert_eq!(value_to_string(get(m, "b").unwrap()).as_deref(), Some("3"));
        assert_eq!(value_to_string(get(m, "c").unwrap()).as_deref(), Some("true"));
        assert_eq!(value_to_string(get(m, "d").unwrap()), None);
        assert_eq!(value_to_string(get(m, "e").unwrap()).as_deref(), Some("- 1\n- 2"));
    }

    #[test]
    fn test_entries_stringifies_keys() {
        let doc: Value = serde_yaml_ng::from_str("1: one\nname: two\n").unwrap();
        let keys: Vec<_> = entries(doc.as_mapping().unwrap()).map(|(k, _)| k).collect();
        assert_eq!(keys, ["1", "name"]);
    }
}
