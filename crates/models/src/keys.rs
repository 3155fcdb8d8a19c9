//! Case-insensitive property names on read.
//!
//! Stored documents may spell keys as `Id`, `InternalReference` or `ITEMS`.
//! Before typed decoding, every object key that matches a known field name
//! ignoring ASCII case is rewritten to the canonical spelling.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Canonical JSON property names of a record type, nested records included.
pub trait CanonicalKeys {
    const KEYS: &'static [&'static str];
}

/// Rewrite object keys (recursively) to their canonical spelling.
pub fn normalize(value: Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                let key = keys
                    .iter()
                    .find(|c| c.eq_ignore_ascii_case(&k))
                    .map(|c| (*c).to_string())
                    .unwrap_or(k);
                out.insert(key, normalize(v, keys));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(|v| normalize(v, keys)).collect()),
        other => other,
    }
}

/// Parse `bytes` as JSON, normalise key case, then decode into `T`.
pub fn decode<T>(bytes: &[u8]) -> Result<T, ModelError>
where
    T: DeserializeOwned + CanonicalKeys,
{
    let raw: Value = serde_json::from_slice(bytes)?;
    Ok(serde_json::from_value(normalize(raw, T::KEYS))?)
}
