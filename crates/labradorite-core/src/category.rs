// ── Lookup categories ──
//
// The three independent identifier namespaces. Each one owns a mapping
// file, a cache partition, and a URL anchor segment.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Identifier namespace a lookup is performed in.
///
/// The same identifier string may exist in several categories and refer to
/// different devices; namespaces never share entries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Board configuration code, e.g. `D94AP`.
    Boardconfig,
    /// Model number, e.g. `A3084`.
    Model,
    /// Marketing identifier, e.g. `iPhone17,2`.
    Identifier,
}

impl Category {
    /// All categories in load order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Segment that anchors this category in a request path.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::Boardconfig => "boardconfig",
            Self::Model => "model",
            Self::Identifier => "identifier",
        }
    }

    /// File name of this category's mapping table inside the mappings directory.
    pub fn mapping_file_name(self) -> String {
        format!("{}s.json", self.anchor())
    }

    /// Document member the mapping generator reads identifiers from.
    pub fn source_field(self) -> &'static str {
        match self {
            Self::Boardconfig => "boardconfig",
            Self::Model => "models",
            Self::Identifier => "identifiers",
        }
    }
}
