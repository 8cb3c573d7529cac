// ── Resolution engine ──
//
// Cache first, then mapping table + disk. A disk fallback serves only the
// current request; the catalog is never written after load.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::lookup::Lookup;
use crate::store::Catalog;
use crate::traverse::traverse;

/// Where the resolved document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    Cache,
    Disk,
}

impl DocumentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Disk => "disk",
        }
    }
}

/// Successful lookup outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    pub source: DocumentSource,
}

impl Resolution {
    /// Compact JSON body for the wire.
    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(&self.value).map_err(|e| CoreError::SerializationFailed {
            reason: e.to_string(),
        })
    }
}

impl Catalog {
    /// Resolve `lookup` to the projected value of its document.
    pub fn resolve(&self, lookup: &Lookup) -> Result<Resolution, CoreError> {
        let (document, source) = self.document_for(lookup)?;
        let value = traverse(&document, &lookup.subkeys, lookup.mode)?;

        tracing::debug!(
            category = %lookup.category,
            identifier = %lookup.identifier,
            depth = lookup.subkeys.len(),
            source = source.as_str(),
            "lookup resolved"
        );

        Ok(Resolution {
            value: value.clone(),
            source,
        })
    }

    fn document_for(&self, lookup: &Lookup) -> Result<(Cow<'_, Value>, DocumentSource), CoreError> {
        if let Some(doc) = self.cached(lookup.category, &lookup.identifier) {
            return Ok((Cow::Borrowed(Arc::as_ref(doc)), DocumentSource::Cache));
        }

        let not_found = || CoreError::DeviceNotFound {
            category: lookup.category,
            identifier: lookup.identifier.clone(),
        };

        let path = self
            .mappings(lookup.category)
            .ok_or_else(not_found)?
            .get(&lookup.identifier)
            .ok_or_else(not_found)?;

        tracing::debug!(
            category = %lookup.category,
            identifier = %lookup.identifier,
            path,
            "cache miss, reading document from disk"
        );

        let doc = self.store.load(path)?;
        Ok((Cow::Owned(doc), DocumentSource::Disk))
    }
}
