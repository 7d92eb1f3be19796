//! Vite Configuration Generator Library
//!
//! A Rust library for expressing Vite bundler configuration as native data
//! structures, deep-merging it into framework defaults, and rendering the
//! result as a `vite.config.js` module for the bundler to consume.
//!
//! The pipeline has two pure stages: [`merge::deep_merge`] combines a
//! default configuration with a user overlay, and [`render::JsRenderer`]
//! turns the merged tree into JavaScript source. [`plugin::ViteConfigPlugin`]
//! wires both into the host framework's pre-compile hook.

pub mod merge;
pub mod plugin;
pub mod render;
pub mod value;

pub use merge::deep_merge;
pub use plugin::{Alias, CompileContext, Plugin, SaveTask, ViteConfigPlugin};
pub use render::JsRenderer;
pub use value::{ConfigMap, ConfigValue, Number, RawJs};

/// Library error types
#[derive(thiserror::Error, Debug)]
pub enum ViteGenError {
    /// A value is outside the supported configuration shape.
    #[error("invalid configuration shape at `{path}`: {reason}")]
    Shape { path: String, reason: String },

    /// A value cannot be rendered as valid JavaScript.
    #[error("serialization failed at `{path}`: {reason}")]
    Serialization { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViteGenError {
    pub(crate) fn shape(path: &str, reason: impl Into<String>) -> Self {
        ViteGenError::Shape {
            path: display_path(path),
            reason: reason.into(),
        }
    }

    pub(crate) fn serialization(path: &str, reason: impl Into<String>) -> Self {
        ViteGenError::Serialization {
            path: display_path(path),
            reason: reason.into(),
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}

/// Result type for the library
pub type ViteGenResult<T> = Result<T, ViteGenError>;
