// ── Immutable catalog snapshot ──
//
// All mapping tables and cached documents, built once at startup and then
// only ever read. Handlers share it behind an `Arc` without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::documents::DocumentStore;
use super::mapping::MappingTable;
use crate::category::Category;
use crate::error::CoreError;

/// What the loader does with a mapping entry whose document cannot be
/// loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Abort the whole load on the first bad document.
    #[default]
    FailFast,
    /// Log and leave the entry uncached; lookups for it fall back to disk.
    SkipInvalid,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => f.write_str("fail-fast"),
            Self::SkipInvalid => f.write_str("skip-invalid"),
        }
    }
}

/// Where the loader finds its inputs.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Document store root; mapped paths are relative to it.
    pub data_dir: PathBuf,
    /// Directory holding `<category>s.json` mapping files.
    pub mappings_dir: PathBuf,
    pub policy: LoadPolicy,
}

impl LoadOptions {
    /// Options with the conventional `<data_dir>/mappings` layout.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let mappings_dir = data_dir.join("mappings");
        Self {
            data_dir,
            mappings_dir,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_mappings_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mappings_dir = dir.into();
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A mapping entry the loader left out of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub identifier: String,
    pub reason: String,
}

/// Load statistics for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub mapped: usize,
    pub cached: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Load statistics for every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub policy: LoadPolicy,
    pub categories: BTreeMap<Category, CategoryReport>,
}

impl LoadReport {
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.get(&category)
    }

    pub fn total_cached(&self) -> usize {
        self.categories.values().map(|r| r.cached).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.categories.values().map(|r| r.skipped.len()).sum()
    }
}

/// Mapping table and document cache for a single category.
#[derive(Debug, Default)]
pub(crate) struct Partition {
    pub(crate) mappings: MappingTable,
    pub(crate) cache: BTreeMap<String, Arc<Value>>,
}

/// Read-only snapshot of every category's mappings and cached documents.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) store: DocumentStore,
    pub(crate) partitions: BTreeMap<Category, Partition>,
    report: LoadReport,
}

impl Catalog {
    /// Load every category's mapping table and eagerly cache each mapped
    /// document.
    ///
    /// Mapping file failures are always fatal. Document failures abort the
    /// load under [`LoadPolicy::FailFast`] and are recorded in the
    /// [`LoadReport`] under [`LoadPolicy::SkipInvalid`].
    pub fn load(options: &LoadOptions) -> Result<Self, CoreError> {
        let store = DocumentStore::new(&options.data_dir);

        // All mapping files first, so a missing one fails before any
        // document I/O happens.
        let mut tables = Vec::new();
        for category in Category::all() {
            tables.push((category, MappingTable::load(&options.mappings_dir, category)?));
        }

        let mut partitions = BTreeMap::new();
        let mut report = LoadReport {
            policy: options.policy,
            categories: BTreeMap::new(),
        };

        for (category, mappings) in tables {
            let (cache, category_report) = fill_cache(&store, category, &mappings, options.policy)?;
            tracing::info!(
                %category,
                mapped = category_report.mapped,
                cached = category_report.cached,
                skipped = category_report.skipped.len(),
                "category loaded"
            );
            report.categories.insert(category, category_report);
            partitions.insert(category, Partition { mappings, cache });
        }

        Ok(Self {
            store,
            partitions,
            report,
        })
    }

    /// Build a catalog from in-memory parts, bypassing the mapping files.
    ///
    /// Each document is cached under every identifier whose mapping points
    /// at its path; mapped identifiers without a document stay uncached and
    /// resolve through the disk fallback.
    pub fn from_parts(
        store: DocumentStore,
        tables: impl IntoIterator<Item = (Category, MappingTable)>,
        documents: &BTreeMap<String, Value>,
    ) -> Self {
        let mut partitions = BTreeMap::new();
        let mut report = LoadReport::default();

        for (category, mappings) in tables {
            let cache: BTreeMap<String, Arc<Value>> = mappings
                .iter()
                .filter_map(|(id, path)| {
                    documents
                        .get(path)
                        .map(|doc| (id.to_owned(), Arc::new(doc.clone())))
                })
                .collect();
            report.categories.insert(
                category,
                CategoryReport {
                    mapped: mappings.len(),
                    cached: cache.len(),
                    skipped: Vec::new(),
                },
            );
            partitions.insert(category, Partition { mappings, cache });
        }

        Self {
            store,
            partitions,
            report,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn mappings(&self, category: Category) -> Option<&MappingTable> {
        self.partitions.get(&category).map(|p| &p.mappings)
    }

    /// Cached document for an already lowercased identifier.
    pub fn cached(&self, category: Category, identifier: &str) -> Option<&Arc<Value>> {
        self.partitions.get(&category)?.cache.get(identifier)
    }

    pub fn is_cached(&self, category: Category, identifier: &str) -> bool {
        self.cached(category, identifier).is_some()
    }

    pub fn cached_len(&self, category: Category) -> usize {
        self.partitions.get(&category).map_or(0, |p| p.cache.len())
    }
}

fn fill_cache(
    store: &DocumentStore,
    category: Category,
    mappings: &MappingTable,
    policy: LoadPolicy,
) -> Result<(BTreeMap<String, Arc<Value>>, CategoryReport), CoreError> {
    let mut cache = BTreeMap::new();
    let mut report = CategoryReport {
        mapped: mappings.len(),
        ..CategoryReport::default()
    };

    for (identifier, path) in mappings.iter() {
        match store.load(path) {
            Ok(doc) => {
                cache.insert(identifier.to_owned(), Arc::new(doc));
            }
            Err(err) => match policy {
                LoadPolicy::FailFast => {
                    return Err(CoreError::DocumentLoad {
                        category,
                        identifier: identifier.to_owned(),
                        source: Box::new(err),
                    });
                }
                LoadPolicy::SkipInvalid => {
                    tracing::warn!(
                        %category,
                        identifier,
                        error = %err,
                        "skipping unloadable document"
                    );
                    report.skipped.push(SkippedEntry {
                        identifier: identifier.to_owned(),
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    report.cached = cache.len();
    Ok((cache, report))
}
