//! Ordered alias probing over untyped JSON bodies.
//!
//! Senders disagree on key names for the same logical field (`from` vs
//! `caller`, `message` vs `text` vs `body`). A [`FieldAlias`] lists the
//! acceptable names in priority order and always resolves to *some* value:
//! either the first defined match or the field's default.

use serde_json::Value;

/// Value substituted when no alias of a field is present.
pub const UNKNOWN: &str = "unknown";

/// Whether a value counts as set: `null`, `""`, `false` and numeric zero
/// do not. Arrays and objects always do, even when empty.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Return the first alias present in `body` with a set value.
///
/// A key counts only if `body` is a JSON object containing it and
/// [`is_set`] holds for its value; otherwise the next alias is tried.
/// Values are returned as-is; no type coercion happens.
pub fn probe<'a>(body: &'a Value, keys: &[String]) -> Option<&'a Value> {
    let object = body.as_object()?;
    keys.iter()
        .find_map(|key| object.get(key).filter(|value| is_set(value)))
}

/// One logical field of a source: its alias list and fallback value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAlias {
    keys: Vec<String>,
    default: Value,
}

impl FieldAlias {
    /// Field that falls back to `"unknown"`.
    pub fn new(keys: Vec<String>) -> Self {
        Self::with_default(keys, UNKNOWN)
    }

    /// Field that falls back to a custom string.
    pub fn with_default(keys: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            keys,
            default: Value::String(default.into()),
        }
    }

    /// Alias keys in probe order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Resolve this field against a raw body. Never fails.
    pub fn resolve(&self, body: &Value) -> Value {
        probe(body, &self.keys)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}
