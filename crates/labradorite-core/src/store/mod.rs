// ── Storage layer ──
//
// Documents on disk, per-category mapping tables, and the immutable
// catalog snapshot that combines them.

mod catalog;
pub(crate) mod documents;
mod mapping;

pub use catalog::{
    Catalog, CategoryReport, LoadOptions, LoadPolicy, LoadReport, SkippedEntry,
};
pub use documents::DocumentStore;
pub use mapping::MappingTable;
