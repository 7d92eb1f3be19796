//! Vite configuration plugin
//!
//! Merges a user-supplied Vite configuration into the framework defaults and
//! renders the result as a `vite.config.js` module for the bundler.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::merge::deep_merge;
use crate::plugin::{CompileContext, Plugin, SaveTask};
use crate::render::{quote_string, JsRenderer};
use crate::value::{child_index, ConfigMap, ConfigValue, RawJs};
use crate::{ViteGenError, ViteGenResult};

/// File name of the generated module inside the web directory.
pub const VITE_CONFIG_FILE: &str = "vite.config.js";

/// A module path alias for Vite's resolver.
///
/// Alias replacements are rewritten at render time to resolve relative to
/// the generated module via `fileURLToPath(new URL(...))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub find: String,
    pub replacement: String,
}

impl Alias {
    pub fn new(find: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replacement: replacement.into(),
        }
    }
}

impl From<Alias> for ConfigValue {
    fn from(alias: Alias) -> Self {
        ConfigValue::object([
            ("find", ConfigValue::from(alias.find)),
            ("replacement", ConfigValue::from(alias.replacement)),
        ])
    }
}

/// Build plugin that customizes the Vite configuration.
///
/// The user supplies a configuration object plus optional extra import
/// statements and helper function declarations; everything is held
/// immutably and combined with the framework defaults on each render.
#[derive(Debug, Clone)]
pub struct ViteConfigPlugin {
    config: ConfigValue,
    imports: Vec<String>,
    functions: Vec<RawJs>,
}

impl ViteConfigPlugin {
    pub fn new(config: ConfigValue) -> Self {
        Self {
            config,
            imports: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Add import statements to emit at the top of the generated module.
    /// Each entry must be a complete JavaScript import statement.
    pub fn with_imports<S, I>(mut self, imports: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Add helper function declarations to emit after the imports. Each
    /// entry must be a complete JavaScript function declaration.
    pub fn with_functions<I>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = RawJs>,
    {
        self.functions.extend(functions);
        self
    }

    /// Render the full `vite.config.js` module text.
    ///
    /// Deterministic for a given plugin and context: rendering twice yields
    /// byte-identical output.
    pub fn render_vite_config(&self, context: &CompileContext) -> ViteGenResult<String> {
        debug!("Merging user Vite configuration into defaults");
        let defaults = default_config(context);
        let mut merged = deep_merge(&defaults, &self.config);
        rewrite_aliases(&mut merged)?;

        let mut imports = default_imports();
        imports.extend(self.imports.iter().cloned());

        let mut functions = default_functions();
        functions.extend(self.functions.iter().cloned());

        info!(
            "Rendering {VITE_CONFIG_FILE} with {} imports and {} helper functions",
            imports.len(),
            functions.len()
        );
        JsRenderer::new().render_module(&imports, &functions, &merged)
    }
}

impl Plugin for ViteConfigPlugin {
    fn name(&self) -> &str {
        "vite_config"
    }

    fn pre_compile(&self, context: &CompileContext) -> ViteGenResult<Vec<SaveTask>> {
        let contents = self.render_vite_config(context)?;
        Ok(vec![SaveTask {
            path: context.web_dir.join(VITE_CONFIG_FILE),
            contents,
        }])
    }
}

/// Import statements every generated module starts with.
fn default_imports() -> Vec<String> {
    vec![
        r#"import { fileURLToPath, URL } from "url";"#.to_string(),
        r#"import { reactRouter } from "@react-router/dev/vite";"#.to_string(),
        r#"import safariCacheBustPlugin from "./vite-plugin-safari-cachebust";"#.to_string(),
    ]
}

/// Helper function declarations every generated module carries.
fn default_functions() -> Vec<RawJs> {
    vec![
        RawJs::new(
            r#"// Ensure that bun always uses the react-dom/server.node functions.
function alwaysUseReactDomServerNode() {
  return {
    name: "vite-plugin-always-use-react-dom-server-node",
    enforce: "pre",

    resolveId(source, importer) {
      if (
        typeof importer === "string" &&
        importer.endsWith("/entry.server.node.tsx") &&
        source.includes("react-dom/server")
      ) {
        return this.resolve("react-dom/server.node", importer, {
          skipSelf: true,
        });
      }
      return null;
    },
  };
}"#,
        ),
        RawJs::new(
            r#"function fullReload() {
  return {
    name: "full-reload",
    enforce: "pre",
    handleHotUpdate({ server }) {
      server.ws.send({
        type: "full-reload",
      });
      return [];
    }
  };
}"#,
        ),
    ]
}

/// Default Vite configuration for a compile pass.
pub(crate) fn default_config(context: &CompileContext) -> ConfigValue {
    let mut base = String::from("/");
    let frontend_path = context.frontend_path.trim_matches('/');
    if !frontend_path.is_empty() {
        base.push_str(frontend_path);
        base.push('/');
    }

    let mut plugins = vec![
        ConfigValue::raw("alwaysUseReactDomServerNode()"),
        ConfigValue::raw("reactRouter()"),
        ConfigValue::raw("safariCacheBustPlugin()"),
    ];
    if context.force_full_reload {
        plugins.push(ConfigValue::raw("fullReload()"));
    }

    ConfigValue::object([
        ("plugins", ConfigValue::Array(plugins)),
        (
            "build",
            ConfigValue::object([
                (
                    "assetsDir",
                    ConfigValue::raw(format!("\"{base}assets\".slice(1)")),
                ),
                (
                    "rollupOptions",
                    ConfigValue::object([
                        ("jsx", ConfigValue::Object(ConfigMap::new())),
                        (
                            "output",
                            ConfigValue::object([(
                                "advancedChunks",
                                ConfigValue::object([(
                                    "groups",
                                    ConfigValue::array([ConfigValue::object([
                                        ("test", ConfigValue::raw("/env.json/")),
                                        ("name", ConfigValue::from("reflex-env")),
                                    ])]),
                                )]),
                            )]),
                        ),
                    ]),
                ),
            ]),
        ),
        (
            "experimental",
            ConfigValue::object([("enableNativePlugin", ConfigValue::from(false))]),
        ),
        (
            "server",
            ConfigValue::object([
                ("port", ConfigValue::raw("process.env.PORT")),
                ("hmr", ConfigValue::from(context.hmr)),
                (
                    "watch",
                    ConfigValue::object([(
                        "ignored",
                        ConfigValue::array([
                            "**/.web/backend/**",
                            "**/.web/reflex.install_frontend_packages.cached",
                        ]),
                    )]),
                ),
            ]),
        ),
        (
            "resolve",
            ConfigValue::object([
                (
                    "mainFields",
                    ConfigValue::array(["browser", "module", "jsnext"]),
                ),
                (
                    "alias",
                    ConfigValue::array([
                        ConfigValue::from(Alias::new("@", "./public")),
                        ConfigValue::from(Alias::new("$", "./")),
                    ]),
                ),
            ]),
        ),
    ])
}

/// Rewrite `resolve.alias` entries into a raw JavaScript array whose
/// replacement paths resolve relative to the generated module.
///
/// A user-supplied raw fragment at `resolve.alias` is left untouched; any
/// other non-array value cannot produce a usable alias configuration and is
/// rejected.
fn rewrite_aliases(config: &mut ConfigValue) -> ViteGenResult<()> {
    let ConfigValue::Object(root) = config else {
        return Ok(());
    };
    let Some(ConfigValue::Object(resolve)) = root.get_mut("resolve") else {
        return Ok(());
    };
    let Some(alias) = resolve.get_mut("alias") else {
        return Ok(());
    };
    let rewritten = match alias {
        ConfigValue::Array(entries) => Some(alias_array(entries, "resolve.alias")?),
        ConfigValue::Raw(_) => None,
        other => {
            return Err(ViteGenError::shape(
                "resolve.alias",
                format!(
                    "alias must be an array of entries or a raw fragment, got {other:?}"
                ),
            ))
        }
    };
    if let Some(raw) = rewritten {
        *alias = ConfigValue::Raw(raw);
    }
    Ok(())
}

fn alias_array(entries: &[ConfigValue], path: &str) -> ViteGenResult<RawJs> {
    if entries.is_empty() {
        return Ok(RawJs::new("[]"));
    }

    let mut lines = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = child_index(path, index);
        let map = entry.as_object().ok_or_else(|| {
            ViteGenError::shape(
                &entry_path,
                "alias entries must be objects with find and replacement",
            )
        })?;

        let find = match map.get("find") {
            Some(ConfigValue::String(s)) => quote_string(s),
            Some(ConfigValue::Raw(raw)) => raw.code().to_string(),
            _ => {
                return Err(ViteGenError::shape(
                    &entry_path,
                    "alias find must be a string or a raw fragment",
                ))
            }
        };

        let replacement = match map.get("replacement") {
            Some(ConfigValue::String(s)) => {
                let safe = s.replace('\\', "/").replace('"', "\\\"");
                format!("fileURLToPath(new URL(\"{safe}\", import.meta.url))")
            }
            Some(ConfigValue::Raw(raw)) => raw.code().to_string(),
            _ => {
                return Err(ViteGenError::shape(
                    &entry_path,
                    "alias replacement must be a string or a raw fragment",
                ))
            }
        };

        lines.push(format!(
            "    {{ find: {find}, replacement: {replacement} }}"
        ));
    }

    Ok(RawJs::new(format!("[\n{}\n  ]", lines.join(",\n"))))
}
