// ── Mapping generator ──
//
// Rebuilds the three mapping files from a directory of device documents.
// A document is indexed only if it carries a `boardconfig` member; each
// category then reads its identifiers from its own source field.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use walkdir::WalkDir;

use crate::category::Category;
use crate::error::CoreError;
use crate::store::documents::read_json;

/// Member every indexable document must carry.
const REQUIRED_FIELD: &str = "boardconfig";

/// Freshly generated mapping tables, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedMappings {
    pub tables: BTreeMap<Category, BTreeMap<String, String>>,
    /// Documents that were read and indexed.
    pub indexed: usize,
    /// JSON files that could not be read or parsed.
    pub unreadable: usize,
}

impl GeneratedMappings {
    pub fn table(&self, category: Category) -> Option<&BTreeMap<String, String>> {
        self.tables.get(&category)
    }

    /// Write `<category>s.json` for every category into `output_dir`.
    pub fn write(&self, output_dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
        fs::create_dir_all(output_dir).map_err(|source| CoreError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let empty = BTreeMap::new();
        let mut written = Vec::new();
        for category in Category::all() {
            let table = self.tables.get(&category).unwrap_or(&empty);
            let path = output_dir.join(category.mapping_file_name());
            let body = to_pretty_json(table)?;
            fs::write(&path, body).map_err(|source| CoreError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(
                %category,
                entries = table.len(),
                path = %path.display(),
                "wrote mapping file"
            );
            written.push(path);
        }
        Ok(written)
    }
}

/// Scan `input_dir` recursively and build mapping tables for every
/// category. `skip_dir`, when inside `input_dir`, is not descended into.
pub fn generate(input_dir: &Path, skip_dir: Option<&Path>) -> Result<GeneratedMappings, CoreError> {
    if !input_dir.is_dir() {
        return Err(CoreError::Io {
            path: input_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut out = GeneratedMappings::default();
    for category in Category::all() {
        out.tables.insert(category, BTreeMap::new());
    }

    // Compared canonically so relative and absolute spellings of the same
    // directory match. A skip dir that does not exist yet has nothing to skip.
    let skip_dir = skip_dir.and_then(|dir| fs::canonicalize(dir).ok());
    let walker = WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry, skip_dir.as_deref()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let doc = match read_json(path) {
            Ok(doc) => doc,
            Err(reason) => {
                tracing::warn!(path = %path.display(), %reason, "skipping unreadable document");
                out.unreadable += 1;
                continue;
            }
        };

        let relative = path
            .strip_prefix(input_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        if index_document(&mut out.tables, &doc, &relative) {
            out.indexed += 1;
        }
    }

    Ok(out)
}

fn is_skipped(entry: &walkdir::DirEntry, skip_dir: Option<&Path>) -> bool {
    let Some(skip) = skip_dir else {
        return false;
    };
    entry.file_type().is_dir() && fs::canonicalize(entry.path()).is_ok_and(|path| path == skip)
}

/// Add one document's identifiers to every category table. Returns whether
/// the document was indexable at all.
fn index_document(
    tables: &mut BTreeMap<Category, BTreeMap<String, String>>,
    doc: &Value,
    relative: &str,
) -> bool {
    let Value::Object(members) = doc else {
        return false;
    };
    if !members.get(REQUIRED_FIELD).is_some_and(is_present) {
        return false;
    }

    for category in Category::all() {
        let Some(values) = members.get(category.source_field()).filter(|v| is_present(v)) else {
            continue;
        };
        let table = tables.entry(category).or_default();

        for key in identifiers(values) {
            match table.get(&key) {
                Some(existing) if existing != relative => {
                    tracing::warn!(
                        %category,
                        identifier = %key,
                        kept = %existing,
                        skipped = relative,
                        "duplicate mapping"
                    );
                }
                Some(_) => {}
                None => {
                    table.insert(key, relative.to_owned());
                }
            }
        }
    }
    true
}

/// Lowercased identifier strings held by a source field.
fn identifiers(value: &Value) -> Vec<String> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .filter(|v| is_present(v))
        .map(|v| match v {
            Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        })
        .collect()
}

/// Null, `false`, zero, and empty strings or containers count as absent.
#[allow(clippy::float_cmp)]
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CoreError::SerializationFailed {
            reason: e.to_string(),
        })?;
    buf.write_all(b"\n").map_err(|e| CoreError::SerializationFailed {
        reason: e.to_string(),
    })?;
    Ok(buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn tables() -> BTreeMap<Category, BTreeMap<String, String>> {
        BTreeMap::new()
    }

    #[test]
    fn indexes_all_categories() {
        let mut t = tables();
        let doc = json!({
            "boardconfig": "D94AP",
            "models": ["A3084", "A3285"],
            "identifiers": "iPhone17,2"
        });
        assert!(index_document(&mut t, &doc, "iphone/d94ap.json"));

        assert_eq!(t[&Category::Boardconfig]["d94ap"], "iphone/d94ap.json");
        assert_eq!(t[&Category::Model].len(), 2);
        assert_eq!(t[&Category::Model]["a3285"], "iphone/d94ap.json");
        assert_eq!(t[&Category::Identifier]["iphone17,2"], "iphone/d94ap.json");
    }

    #[test]
    fn requires_boardconfig() {
        let mut t = tables();
        assert!(!index_document(&mut t, &json!({"models": ["A1"]}), "x.json"));
        assert!(!index_document(&mut t, &json!({"boardconfig": "", "models": ["A1"]}), "x.json"));
        assert!(!index_document(&mut t, &json!(["D94AP"]), "x.json"));
        assert!(t.is_empty());
    }

    #[test]
    fn duplicate_keeps_first() {
        let mut t = tables();
        index_document(&mut t, &json!({"boardconfig": "D94AP"}), "a.json");
        index_document(&mut t, &json!({"boardconfig": "d94ap"}), "b.json");
        assert_eq!(t[&Category::Boardconfig]["d94ap"], "a.json");
    }

    #[test]
    fn stringifies_scalars_and_skips_empty_items() {
        assert_eq!(identifiers(&json!([1234, "", null, "X"])), vec!["1234", "x"]);
        assert!(identifiers(&json!(false)).is_empty());
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let mut table = BTreeMap::new();
        table.insert("d94ap".to_owned(), "d94ap.json".to_owned());
        let body = String::from_utf8(to_pretty_json(&table).unwrap()).unwrap();
        assert_eq!(body, "{\n    \"d94ap\": \"d94ap.json\"\n}\n");
    }

    #[test]
    fn missing_input_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(&dir.path().join("absent"), None).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }), "got {err:?}");
    }
}
