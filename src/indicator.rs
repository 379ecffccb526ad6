//! SDG indicator identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// An indicator identifier such as `2-1-1`.
///
/// Ordering is natural: dash-separated segments compare numerically when both
/// sides are numeric, so `2-10-1` sorts after `2-2-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorId(String);

impl IndicatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds an id from a dataset file path, using the basename up to the first `.`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let stem = name.split('.').next()?;
        if stem.is_empty() {
            return None;
        }
        Some(Self::new(stem))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The top-level goal segment (`"2"` for `2-1-1`).
    pub fn goal(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// The goal segment parsed as a goal number.
    pub fn goal_number(&self) -> Option<u8> {
        self.goal().parse().ok()
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort key of one dash-separated segment: segments starting with digits
/// come first, ordered by their numeric prefix and then by the remaining text.
fn segment_key(segment: &str) -> (bool, usize, &str, &str) {
    let split = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    let (digits, suffix) = segment.split_at(split);
    let number = digits.trim_start_matches('0');
    (digits.is_empty(), number.len(), number, suffix)
}

impl Ord for IndicatorId {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.0.split('-').map(segment_key);
        let right = other.0.split('-').map(segment_key);

        left.cmp(right).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for IndicatorId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
