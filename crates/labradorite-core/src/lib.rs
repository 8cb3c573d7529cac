//! Resolution engine for the Labradorite device lookup service.
//!
//! Resolves short device identifiers (board configuration codes, model
//! numbers, marketing identifiers) to JSON device documents, optionally
//! drilling into a nested member of the document.
//!
//! - **[`Catalog`]**: Immutable snapshot built once by
//!   [`Catalog::load()`]: one [`MappingTable`] per [`Category`] plus an
//!   eagerly filled document cache. Shared behind an `Arc`; never written
//!   after construction.
//!
//! - **[`Catalog::resolve()`]**: Cache first, then mapping table and
//!   [`DocumentStore`] on a miss. Disk fallbacks are not memoized.
//!
//! - **[`traverse()`]**: Walks object members by sub-key under a
//!   [`TraversalMode`]; lenient mode stops at the first non-object value,
//!   strict mode fails there.
//!
//! - **[`Lookup`]**: Normalized request tuple, parseable from a
//!   slash-delimited path with [`Lookup::from_path()`].
//!
//! - **[`generate()`]**: Rebuilds mapping files from a directory of
//!   device documents.

pub mod category;
pub mod error;
pub mod generate;
pub mod lookup;
pub mod resolver;
pub mod store;
pub mod traverse;

// ── Primary re-exports ──────────────────────────────────────────────
pub use category::Category;
pub use error::CoreError;
pub use generate::{GeneratedMappings, generate};
pub use lookup::Lookup;
pub use resolver::{DocumentSource, Resolution};
pub use store::{
    Catalog, CategoryReport, DocumentStore, LoadOptions, LoadPolicy, LoadReport, MappingTable,
    SkippedEntry,
};
pub use traverse::{TraversalMode, traverse};
