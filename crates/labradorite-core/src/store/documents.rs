// ── On-disk document store ──
//
// A root directory of JSON documents addressed by paths relative to it.
// Every read goes straight to disk; caching is the catalog's job.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CoreError;

/// Read-only view over the directory holding device documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) location of a mapped document.
    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Load and parse the document at `relative`.
    ///
    /// A path that does not exist is [`CoreError::PathMissing`]; an I/O or
    /// parse failure on an existing file is [`CoreError::DataUnreadable`].
    pub fn load(&self, relative: &str) -> Result<Value, CoreError> {
        let path = self.path_of(relative);
        if !path.exists() {
            return Err(CoreError::PathMissing { path });
        }

        tracing::trace!(path = %path.display(), "reading document");
        read_json(&path).map_err(|reason| CoreError::DataUnreadable { path, reason })
    }
}

/// Read a file and parse it as JSON, flattening both failure kinds into a
/// message.
pub(crate) fn read_json(path: &Path) -> Result<Value, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}
