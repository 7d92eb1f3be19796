//! Configuration value model
//!
//! The [`ConfigValue`] sum type represents any value that can appear in a
//! Vite configuration tree: JSON-like scalars, arrays, objects, and the
//! [`RawJs`] variant that carries a JavaScript fragment to be emitted
//! verbatim by the renderer.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::{ViteGenError, ViteGenResult};

/// Ordered mapping used for object values.
///
/// `BTreeMap` keeps key order deterministic across runs, which keeps the
/// generated `vite.config.js` stable and diffable.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A raw JavaScript fragment embedded in a configuration tree.
///
/// The payload is written into the generated file verbatim, with no quoting
/// or escaping. This is the only way non-literal JavaScript (plugin calls,
/// function expressions, `process.env` lookups) enters the output.
#[derive(Debug, Clone, PartialEq)]
pub struct RawJs {
    code: String,
}

impl RawJs {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// The wrapped JavaScript source.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Numeric configuration value.
///
/// Floats may carry non-finite values at construction time; the renderer
/// rejects them when the tree is serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n as i64)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::Int(n as i64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

/// Any value that can appear in the merged configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
    Raw(RawJs),
}

/// Object key that marks a raw JavaScript fragment in the JSON surface.
///
/// `{"$raw": "react()"}` deserializes to `ConfigValue::Raw`.
pub const RAW_MARKER_KEY: &str = "$raw";

impl ConfigValue {
    /// Build an object value from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ConfigValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array value from elements.
    pub fn array<V, I>(elements: I) -> Self
    where
        V: Into<ConfigValue>,
        I: IntoIterator<Item = V>,
    {
        ConfigValue::Array(elements.into_iter().map(Into::into).collect())
    }

    /// Build a raw JavaScript fragment value.
    pub fn raw(code: impl Into<String>) -> Self {
        ConfigValue::Raw(RawJs::new(code))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ConfigValue::Array(_))
    }

    /// Borrow the object entries, if this value is an object.
    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow an object field by key, if this value is an object.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Borrow the string payload, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Ingest a JSON document as a configuration value.
    ///
    /// Single-key objects of the form `{"$raw": "<code>"}` become
    /// [`ConfigValue::Raw`]; everything else maps structurally.
    pub fn from_json_str(text: &str) -> ViteGenResult<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(&json)
    }

    /// Convert a parsed JSON value into a configuration value.
    pub fn from_json(json: &serde_json::Value) -> ViteGenResult<Self> {
        from_json_at(json, "")
    }
}

fn from_json_at(json: &serde_json::Value, path: &str) -> ViteGenResult<ConfigValue> {
    match json {
        serde_json::Value::Null => Ok(ConfigValue::Null),
        serde_json::Value::Bool(b) => Ok(ConfigValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ConfigValue::Number(Number::Int(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(ConfigValue::Number(Number::Float(f)))
            } else {
                Err(ViteGenError::shape(
                    path,
                    format!("number {n} is not representable"),
                ))
            }
        }
        serde_json::Value::String(s) => Ok(ConfigValue::String(s.clone())),
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(from_json_at(item, &child_index(path, index))?);
            }
            Ok(ConfigValue::Array(out))
        }
        serde_json::Value::Object(map) => {
            if map.len() == 1 {
                if let Some(payload) = map.get(RAW_MARKER_KEY) {
                    return match payload {
                        serde_json::Value::String(code) => Ok(ConfigValue::raw(code.clone())),
                        other => Err(ViteGenError::shape(
                            &child_key(path, RAW_MARKER_KEY),
                            format!("raw marker payload must be a string, got {other}"),
                        )),
                    };
                }
            }
            let mut out = ConfigMap::new();
            for (key, item) in map {
                out.insert(key.clone(), from_json_at(item, &child_key(path, key))?);
            }
            Ok(ConfigValue::Object(out))
        }
    }
}

/// Extend a key path with an object key, `server` -> `server.hmr`.
pub(crate) fn child_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Extend a key path with an array index, `plugins` -> `plugins[0]`.
pub(crate) fn child_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Number(Number::Int(n))
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(Number::Int(n as i64))
    }
}

impl From<u32> for ConfigValue {
    fn from(n: u32) -> Self {
        ConfigValue::Number(Number::Int(n as i64))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(Number::Float(n))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<RawJs> for ConfigValue {
    fn from(raw: RawJs) -> Self {
        ConfigValue::Raw(raw)
    }
}

impl From<Number> for ConfigValue {
    fn from(n: Number) -> Self {
        ConfigValue::Number(n)
    }
}

impl<V: Into<ConfigValue>> From<Vec<V>> for ConfigValue {
    fn from(items: Vec<V>) -> Self {
        ConfigValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<ConfigValue>> From<Option<V>> for ConfigValue {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ConfigValue::Null,
        }
    }
}
