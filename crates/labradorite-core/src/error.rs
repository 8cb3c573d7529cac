// ── Core error types ──
//
// Every failure the resolution engine, the startup loader, and the mapping
// generator can produce. Front ends translate these into their own
// surfaces (HTTP status codes, CLI exit codes); consumers never see raw
// `std::io::Error` or `serde_json::Error` values here.

use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request errors ───────────────────────────────────────────────
    #[error("Malformed lookup request: {reason}")]
    BadRequest { reason: String },

    #[error("Device not found: {category}/{identifier}")]
    DeviceNotFound {
        category: Category,
        identifier: String,
    },

    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Cannot descend into '{key}': parent value is not an object")]
    NestedParsingFailed { key: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Document file missing: {}", path.display())]
    PathMissing { path: PathBuf },

    #[error("Document file unreadable: {}: {reason}", path.display())]
    DataUnreadable { path: PathBuf, reason: String },

    #[error("Failed to serialize resolved value: {reason}")]
    SerializationFailed { reason: String },

    // ── Startup errors ───────────────────────────────────────────────
    #[error("Mapping file for {category} missing: {}", path.display())]
    MappingMissing { category: Category, path: PathBuf },

    #[error("Mapping file for {category} unreadable: {}: {reason}", path.display())]
    MappingUnreadable {
        category: Category,
        path: PathBuf,
        reason: String,
    },

    #[error("Mapping file for {category} is invalid: {reason}")]
    MappingInvalid { category: Category, reason: String },

    #[error("Failed to load {category} document for '{identifier}': {source}")]
    DocumentLoad {
        category: Category,
        identifier: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Filesystem errors (generator output) ─────────────────────────
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Whether the caller, not the data set, is at fault.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest { .. }
                | Self::DeviceNotFound { .. }
                | Self::KeyNotFound { .. }
                | Self::NestedParsingFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_are_classified() {
        assert!(CoreError::KeyNotFound { key: "gpu".into() }.is_request_error());
        assert!(
            CoreError::DeviceNotFound {
                category: Category::Model,
                identifier: "zzzz".into(),
            }
            .is_request_error()
        );
        assert!(
            !CoreError::PathMissing {
                path: PathBuf::from("devices/d94ap.json"),
            }
            .is_request_error()
        );
    }

    #[test]
    fn document_load_wraps_source() {
        let err = CoreError::DocumentLoad {
            category: Category::Boardconfig,
            identifier: "d94ap".into(),
            source: Box::new(CoreError::PathMissing {
                path: PathBuf::from("devices/d94ap.json"),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("boardconfig"), "{msg}");
        assert!(msg.contains("d94ap"), "{msg}");
        assert!(msg.contains("devices/d94ap.json"), "{msg}");
    }
}
