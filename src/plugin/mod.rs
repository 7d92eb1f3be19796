//! Plugin lifecycle surface
//!
//! The host framework constructs plugins once at application-configuration
//! time and drives them through [`Plugin::pre_compile`], collecting the save
//! tasks each plugin wants executed before the bundler runs.

pub mod vite;


use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ViteGenResult;

pub use vite::{Alias, ViteConfigPlugin};

/// Host-supplied inputs for a pre-compile pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileContext {
    /// Directory the generated frontend files live in.
    pub web_dir: PathBuf,

    /// Path prefix the frontend is served under, without surrounding
    /// slashes. Empty means the site root.
    pub frontend_path: String,

    /// Whether hot module replacement is enabled for the dev server.
    pub hmr: bool,

    /// Whether every hot update should trigger a full page reload.
    pub force_full_reload: bool,
}

impl Default for CompileContext {
    fn default() -> Self {
        Self {
            web_dir: PathBuf::from(".web"),
            frontend_path: String::new(),
            hmr: true,
            force_full_reload: false,
        }
    }
}

/// A file the host framework should write before compiling the frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTask {
    pub path: PathBuf,
    pub contents: String,
}

impl SaveTask {
    /// Write the file, creating parent directories as needed.
    ///
    /// Whether and when to run a save task is the host framework's call;
    /// plugins only produce them.
    pub fn execute(&self) -> ViteGenResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &self.contents)?;
        info!("Wrote {:?} ({} bytes)", self.path, self.contents.len());
        Ok(())
    }
}

/// A build plugin invoked by the host framework's pre-compile hook.
pub trait Plugin {
    /// Stable identifier for the plugin.
    fn name(&self) -> &str;

    /// Produce the save tasks this plugin needs before compilation.
    fn pre_compile(&self, context: &CompileContext) -> ViteGenResult<Vec<SaveTask>>;
}
