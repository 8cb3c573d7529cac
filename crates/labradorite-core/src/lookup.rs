// ── Lookup requests ──
//
// The (category, identifier, sub-keys) tuple every front end hands to the
// resolver, plus the slash-path parser the HTTP routes use.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::category::Category;
use crate::error::CoreError;
use crate::traverse::TraversalMode;

/// A normalized lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub category: Category,
    /// Always lowercase.
    pub identifier: String,
    pub subkeys: Vec<String>,
    pub mode: TraversalMode,
}

impl Lookup {
    /// Build a lookup, lowercasing `identifier`. Sub-keys are kept verbatim.
    pub fn new<I, S>(category: Category, identifier: &str, subkeys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            identifier: identifier.to_lowercase(),
            subkeys: subkeys.into_iter().map(Into::into).collect(),
            mode: TraversalMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extract a lookup from a slash-delimited request path.
    ///
    /// The first segment equal to the category's anchor that is followed by
    /// another segment wins: that segment is the identifier and everything
    /// after it is the sub-key path. One trailing slash is ignored, and each
    /// segment is percent-decoded after splitting.
    ///
    /// `/api/v0/boardconfig/D94AP/chips/soc` → (`d94ap`, `["chips", "soc"]`)
    pub fn from_path(category: Category, path: &str) -> Result<Self, CoreError> {
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        // Split first so an encoded `/` stays inside its segment.
        let parts = trimmed
            .split('/')
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?;
        let anchor = category.anchor();

        let Some(pos) = parts
            .iter()
            .enumerate()
            .position(|(i, part)| part == anchor && i + 1 < parts.len())
        else {
            return Err(CoreError::BadRequest {
                reason: format!("no identifier after '{anchor}' segment"),
            });
        };

        let identifier = parts.get(pos + 1).map_or("", String::as_str);
        if identifier.is_empty() {
            return Err(CoreError::BadRequest {
                reason: "empty identifier".into(),
            });
        }

        let subkeys = parts.iter().skip(pos + 2).cloned();
        Ok(Self::new(category, identifier, subkeys))
    }
}

/// Percent-decode one path segment. `+` is literal in paths.
fn decode_segment(segment: &str) -> Result<String, CoreError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| CoreError::BadRequest {
            reason: "path segment is not valid UTF-8 once decoded".into(),
        })
}
