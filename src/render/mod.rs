//! JavaScript rendering for configuration values
//!
//! Turns a [`ConfigValue`] tree into JavaScript literal syntax, and a full
//! set of imports, helper functions, and a merged configuration into the
//! text of a `vite.config.js` module.

#[cfg(test)]
mod tests;

use crate::value::{child_index, child_key, ConfigValue, Number, RawJs};
use crate::{ViteGenError, ViteGenResult};

/// Nesting limit for rendering. Real Vite configurations are a handful of
/// levels deep; hitting this limit means the input is malformed.
const MAX_DEPTH: usize = 128;

/// Renders configuration values as JavaScript source.
///
/// Objects are emitted multi-line with two-space indentation, arrays inline.
/// Rendering is pure; a renderer can be reused across calls.
#[derive(Debug, Default)]
pub struct JsRenderer;

impl JsRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a single value as a JavaScript expression.
    pub fn render_value(&self, value: &ConfigValue) -> ViteGenResult<String> {
        self.render_at(value, "", 0)
    }

    /// Render a complete JavaScript module: import lines, helper function
    /// declarations, then a single `export default { ... };` statement.
    ///
    /// Imports and functions are deduplicated by exact content, first
    /// occurrence wins, so repeated generation of the same module is
    /// byte-identical.
    pub fn render_module(
        &self,
        imports: &[String],
        functions: &[RawJs],
        config: &ConfigValue,
    ) -> ViteGenResult<String> {
        let mut out = String::new();

        let mut seen_imports: Vec<&str> = Vec::new();
        for import in imports {
            if seen_imports.contains(&import.as_str()) {
                continue;
            }
            seen_imports.push(import);
            out.push_str(import);
            out.push('\n');
        }

        let mut seen_functions: Vec<&str> = Vec::new();
        for function in functions {
            let code = function.code().trim();
            if code.is_empty() || seen_functions.contains(&code) {
                continue;
            }
            seen_functions.push(code);
            out.push('\n');
            out.push_str(code);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("export default ");
        out.push_str(&self.render_at(config, "", 0)?);
        out.push_str(";\n");
        Ok(out)
    }

    fn render_at(&self, value: &ConfigValue, path: &str, depth: usize) -> ViteGenResult<String> {
        if depth > MAX_DEPTH {
            return Err(ViteGenError::serialization(
                path,
                format!("nesting exceeds the maximum depth of {MAX_DEPTH}"),
            ));
        }

        match value {
            ConfigValue::Null => Ok("null".to_string()),
            ConfigValue::Bool(b) => Ok(b.to_string()),
            ConfigValue::Number(n) => render_number(*n, path),
            ConfigValue::String(s) => Ok(quote_string(s)),
            ConfigValue::Raw(raw) => Ok(raw.code().to_string()),
            ConfigValue::Array(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    rendered.push(self.render_at(item, &child_index(path, index), depth + 1)?);
                }
                Ok(format!("[{}]", rendered.join(", ")))
            }
            ConfigValue::Object(map) => {
                if map.is_empty() {
                    return Ok("{}".to_string());
                }
                let pad = "  ".repeat(depth);
                let mut entries = Vec::with_capacity(map.len());
                for (key, item) in map {
                    let rendered = self.render_at(item, &child_key(path, key), depth + 1)?;
                    entries.push(format!("{pad}  {}: {rendered}", object_key(key)));
                }
                Ok(format!("{{\n{}\n{pad}}}", entries.join(",\n")))
            }
        }
    }
}

fn render_number(number: Number, path: &str) -> ViteGenResult<String> {
    match number {
        Number::Int(i) => Ok(i.to_string()),
        Number::Float(f) => {
            if !f.is_finite() {
                return Err(ViteGenError::serialization(
                    path,
                    format!("non-finite number {f} cannot be rendered"),
                ));
            }
            Ok(f.to_string())
        }
    }
}

/// Quote a string as a double-quoted JavaScript string literal.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Emit an object key unquoted when it is a valid JavaScript identifier.
fn object_key(key: &str) -> String {
    if is_js_identifier(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
