//! Data types for the progress pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal progress category, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgressStatus {
    Deterioration,
    LimitedProgress,
    ModerateProgress,
    SubstantialProgress,
    TargetAchieved,
}

impl ProgressStatus {
    pub const ALL: [Self; 5] = [
        Self::Deterioration,
        Self::LimitedProgress,
        Self::ModerateProgress,
        Self::SubstantialProgress,
        Self::TargetAchieved,
    ];

    /// Parses the key used in the progress YAML (`limited_progress`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Deterioration => "deterioration",
            Self::LimitedProgress => "limited_progress",
            Self::ModerateProgress => "moderate_progress",
            Self::SubstantialProgress => "substantial_progress",
            Self::TargetAchieved => "target_achieved",
        }
    }

    /// Human-readable label used in CSV headers and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deterioration => "Deterioration",
            Self::LimitedProgress => "Limited progress",
            Self::ModerateProgress => "Progress made, but acceleration needed",
            Self::SubstantialProgress => "On track",
            Self::TargetAchieved => "Target achieved",
        }
    }

    /// Fill colour of the status gauge.
    pub fn colour(self) -> &'static str {
        match self {
            Self::TargetAchieved | Self::SubstantialProgress => "#93c46c",
            Self::ModerateProgress => "#fcbc4c",
            Self::LimitedProgress => "#f47c04",
            Self::Deterioration => "#d42c2c",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A progress score: a number on the [-5, 5] scale or a textual label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Value(f64),
    Label(String),
}

/// One indicator's row in the progress YAML. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressEntry {
    #[serde(default)]
    pub progress_status: Option<String>,
    #[serde(default)]
    pub score: Option<Score>,
}

/// Number of indicators of one goal in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalStatusCount {
    pub goal: u8,
    pub status: ProgressStatus,
    pub number: usize,
}

/// Share of all counted indicators in one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: &'static str,
    pub label: &'static str,
    pub number: usize,
    pub percent: f64,
}

/// Summary across all goals, written as JSON on request.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub statuses: Vec<StatusShare>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keys_round_trip() {
        for status in ProgressStatus::ALL {
            assert_eq!(ProgressStatus::from_key(status.key()), Some(status));
        }
        assert_eq!(ProgressStatus::from_key("on_track"), None);
    }

    #[test]
    fn test_status_order_worst_to_best() {
        assert!(ProgressStatus::Deterioration < ProgressStatus::LimitedProgress);
        assert!(ProgressStatus::SubstantialProgress < ProgressStatus::TargetAchieved);
    }

    #[test]
    fn test_entry_deserializes_numeric_and_label_scores() {
        let entry: ProgressEntry =
            serde_yaml_ng::from_str("progress_status: moderate_progress\nscore: 1\nextra: x\n").unwrap();
        assert_eq!(entry.score, Some(Score::Value(1.0)));

        let entry: ProgressEntry = serde_yaml_ng::from_str("score: target_achieved\n").unwrap();
        assert_eq!(entry.progress_status, None);
        assert_eq!(entry.score, Some(Score::Label("target_achieved".to_string())));
    }
}
