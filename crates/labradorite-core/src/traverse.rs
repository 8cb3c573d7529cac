// ── Sub-key traversal ──
//
// Projects a nested value out of a document by walking object members
// left to right. Matching on `Value` keeps every variant accounted for.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// How traversal treats a non-object value reached before the key path
/// is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Stop at the last reached value and return it.
    #[default]
    Lenient,
    /// Fail with [`CoreError::NestedParsingFailed`].
    Strict,
}

impl TraversalMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Walk `document` by `keys` and return the terminal value.
///
/// A missing member on an object is always [`CoreError::KeyNotFound`];
/// `mode` only governs what happens when the current value stops being an
/// object before all keys are consumed.
pub fn traverse<'a, S: AsRef<str>>(
    document: &'a Value,
    keys: &[S],
    mode: TraversalMode,
) -> Result<&'a Value, CoreError> {
    let mut current = document;

    for key in keys {
        let key = key.as_ref();
        match current {
            Value::Object(members) => {
                current = members.get(key).ok_or_else(|| CoreError::KeyNotFound {
                    key: key.to_owned(),
                })?;
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                if mode.is_strict() {
                    return Err(CoreError::NestedParsingFailed {
                        key: key.to_owned(),
                    });
                }
                tracing::debug!(key, "stopping traversal at non-object value");
                break;
            }
        }
    }

    Ok(current)
}
