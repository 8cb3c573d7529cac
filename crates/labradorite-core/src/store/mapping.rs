// ── Per-category mapping tables ──
//
// Identifier → relative document path, loaded once from
// `<mappings_dir>/<category>s.json` and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::documents::read_json;
use crate::category::Category;
use crate::error::CoreError;

/// Immutable identifier → document path table for one category.
///
/// Keys are stored lowercase so lookups only need to normalize the
/// requested identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<String, String>,
}

impl MappingTable {
    /// Load `category`'s table from `mappings_dir`.
    ///
    /// Every failure here is fatal at startup: a missing file, a file that
    /// is not JSON, or a JSON value that is not an object of strings.
    pub fn load(mappings_dir: &Path, category: Category) -> Result<Self, CoreError> {
        let path = mappings_dir.join(category.mapping_file_name());
        if !path.exists() {
            return Err(CoreError::MappingMissing { category, path });
        }

        tracing::info!(%category, path = %path.display(), "loading mapping file");

        let raw = read_json(&path).map_err(|reason| CoreError::MappingUnreadable {
            category,
            path: path.clone(),
            reason,
        })?;

        let table = Self::from_value(category, raw)?;
        tracing::info!(%category, entries = table.len(), "mapping file parsed");
        Ok(table)
    }

    /// Build a table from an already parsed mapping document.
    pub fn from_value(category: Category, raw: Value) -> Result<Self, CoreError> {
        let Value::Object(members) = raw else {
            return Err(CoreError::MappingInvalid {
                category,
                reason: "top-level value is not an object".into(),
            });
        };

        // Sorted so the first of two keys that collide after lowercasing is
        // deterministic.
        let mut members: Vec<(String, Value)> = members.into_iter().collect();
        members.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = BTreeMap::new();
        for (key, value) in members {
            let Value::String(path) = value else {
                return Err(CoreError::MappingInvalid {
                    category,
                    reason: format!("value for '{key}' is not a string"),
                });
            };

            insert_first(&mut entries, &key, path, Some(category));
        }

        Ok(Self { entries })
    }

    /// Relative document path for an already lowercased identifier.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Same collision rule as [`MappingTable::from_value`]: keys are sorted and
/// the first one to claim a lowercased identifier keeps it.
impl FromIterator<(String, String)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut pairs: Vec<(String, String)> = iter.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = BTreeMap::new();
        for (key, path) in pairs {
            insert_first(&mut entries, &key, path, None);
        }
        Self { entries }
    }
}

/// Insert under the lowercased `key` unless an earlier key already claimed
/// it; a collision is logged and the new path dropped.
fn insert_first(
    entries: &mut BTreeMap<String, String>,
    key: &str,
    path: String,
    category: Option<Category>,
) {
    let normalized = key.to_lowercase();
    if let Some(existing) = entries.get(&normalized) {
        tracing::warn!(
            category = category.map(Category::anchor),
            identifier = %normalized,
            kept = %existing,
            skipped = %path,
            "duplicate mapping after lowercasing"
        );
        return;
    }
    entries.insert(normalized, path);
}
