//! Records extracted for indicators that need review.

use serde_yaml_ng::Mapping;

use crate::indicator::IndicatorId;
use crate::yaml::{get, value_to_string};

/// Selected fields of one indicator, in extraction order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub id: IndicatorId,
    pub fields: Vec<(String, Option<String>)>,
}

impl IndicatorRecord {
    pub fn new(id: IndicatorId) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    /// Appends every key of `keys` present in `source`. Null values are kept as `None`.
    pub fn extend_from<S: AsRef<str>>(&mut self, source: &Mapping, keys: &[S]) {
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = get(source, key) {
                self.fields.push((key.to_string(), value_to_string(value)));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }
}
