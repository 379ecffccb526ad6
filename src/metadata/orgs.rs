//! Source-organisation allow-list and the review filter built on it.

use anyhow::{Context, Result};
use serde_yaml_ng::Mapping;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::yaml::{entries, value_to_string};

/// Government of Canada organisations whose metadata does not need review.
pub static GC_ORGS: &[&str] = &[
    "Affaires mondiales Canada",
    "Agence de la santé publique du Canada",
    "Agriculture et Agroalimentaire Canada",
    "Conseil de la radiodiffusion et des télécommunications canadiennes",
    "Conseil des ministres de l’Éducation (Canada)",
    "Environnement et Changement Climatique Canada (ECCC)",
    "Environnement et Changement climatique Canada",
    "Environnement et Changement climatique Canada (ECCC)",
    "Femmes et Égalité des genres Canada",
    "Immigration, Réfugiés et Citoyenneté Canada (IRCC)",
    "Institut canadien d'information sur la santé (ICIS)",
    "Patrimoine canadien",
    "Ressources naturelles Canada (RNCan)",
    "Ressources naturelles Canada et Statistique Canada",
    "Secrétariat du Conseil du Trésor",
    "Statistics Canada",
    "Statistique Canada",
    "Statistique Canada, Santé Canada",
    "Sécurité publique Canada",
];

/// Metadata keys carrying source organisations start with this prefix.
const SOURCE_KEY_PREFIX: &str = "source_organisation";

/// Set of organisation names treated as trusted sources.
///
/// Can be loaded from a JSON array on disk:
/// ```json
/// ["Statistique Canada", "Patrimoine canadien"]
/// ```
#[derive(Debug, Clone)]
pub struct OrgAllowList {
    names: HashSet<String>,
}

impl Default for OrgAllowList {
    fn default() -> Self {
        Self::from_names(GC_ORGS.iter().copied())
    }
}

impl OrgAllowList {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads the allow-list from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read allow-list {}", path.display()))?;
        let names: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("allow-list {} is not a JSON array of names", path.display()))?;
        Ok(Self::from_names(names))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` if every name in `sources` is on the allow-list.
    pub fn covers(&self, sources: &BTreeSet<String>) -> bool {
        sources.iter().all(|s| self.contains(s))
    }
}

/// Collects the right-trimmed values of every `source_organisation*` key.
pub fn source_organisations(metadata: &Mapping) -> BTreeSet<String> {
    entries(metadata)
        .filter(|(key, _)| key.starts_with(SOURCE_KEY_PREFIX))
        .filter_map(|(_, value)| value_to_string(value))
        .map(|s| s.trim_end().to_string())
        .collect()
}

/// An indicator needs review when it has no source at all, or at least one
/// source outside the allow-list.
pub fn needs_review(sources: &BTreeSet<String>, allow_list: &OrgAllowList) -> bool {
    sources.is_empty() || !allow_list.covers(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_list_has_all_gc_orgs() {
        let list = OrgAllowList::default();
        assert_eq!(list.len(), GC_ORGS.len());
        assert!(list.contains("Statistique Canada"));
        assert!(!list.contains("Banque mondiale"));
    }

    #[test]
    fn test_source_organisations_trims_and_dedups() {
        let meta = mapping(
            "source_organisation_1: \"Statistique Canada  \"\n\
             source_organisation_2: Statistique Canada\n\
             source_organisation_url_1: ~\n\
             SDG_GOAL: '2'\n",
        );
        assert_eq!(source_organisations(&meta), set(&["Statistique Canada"]));
    }

    #[test]
    fn test_needs_review_without_sources() {
        assert!(needs_review(&BTreeSet::new(), &OrgAllowList::default()));
    }

    #[test]
    fn test_needs_review_all_allowed() {
        let sources = set(&["Statistique Canada", "Patrimoine canadien"]);
        assert!(!needs_review(&sources, &OrgAllowList::default()));
    }

    #[test]
    fn test_needs_review_mixed_sources() {
        let sources = set(&["Statistique Canada", "Organisation mondiale de la santé"]);
        assert!(needs_review(&sources, &OrgAllowList::default()));
    }

    #[test]
    fn test_load_from_json() {
        let path = env::temp_dir().join("sdg_tools_orgs.json");
        fs::write(&path, r#"["Org A", "Org B"]"#).unwrap();

        let list = OrgAllowList::load(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.covers(&set(&["Org B"])));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_non_array() {
        let path = env::temp_dir().join("sdg_tools_orgs_bad.json");
        fs::write(&path, r#"{"Org A": 1}"#).unwrap();

        assert!(OrgAllowList::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
