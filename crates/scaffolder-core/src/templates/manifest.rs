//! Package manifest loading and patching
//!
//! The manifest is handled as an ordered JSON object so fields the patcher does
//! not know about come out exactly as they went in.

use super::source::MANIFEST_FILE;
use crate::error::{Result, ScaffoldError};
use crate::selection::{Feature, Language};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Lint toolchain injected into every project that does not bring its own
const BASE_LINT_DEPENDENCIES: &[(&str, &str)] = &[
    ("eslint", "^8.57.0"),
    ("eslint-config-standard", "^17.1.0"),
    ("eslint-plugin-import", "^2.29.1"),
    ("eslint-plugin-n", "^16.6.2"),
    ("eslint-plugin-promise", "^6.1.1"),
];

/// Extra tooling for the statically-typed language variant
const TYPED_LINT_DEPENDENCIES: &[(&str, &str)] = &[
    ("typescript", "^5.4.5"),
    ("@typescript-eslint/parser", "^7.8.0"),
    ("@typescript-eslint/eslint-plugin", "^7.8.0"),
];

/// Lint plugin for the UI framework feature
const UI_LINT_DEPENDENCIES: &[(&str, &str)] = &[("eslint-plugin-react", "^7.34.1")];

/// Key whose presence means the template curates its own lint toolchain
const LINT_GATE: &str = "eslint";

/// A parsed package manifest
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Parse manifest text; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| ScaffoldError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Object(fields) => {
                if let Some(dev) = fields.get("devDependencies") {
                    if !dev.is_object() {
                        return Err(ScaffoldError::InvalidManifest {
                            path: path.to_path_buf(),
                            message: "devDependencies must be an object".to_string(),
                        });
                    }
                }
                Ok(Self { fields })
            }
            _ => Err(ScaffoldError::InvalidManifest {
                path: path.to_path_buf(),
                message: "manifest root must be an object".to_string(),
            }),
        }
    }

    /// Read and parse `package.json` from a template directory
    pub async fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| ScaffoldError::io(&path, e))?;
        Self::parse(&content, &path)
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    pub fn dev_dependencies(&self) -> Option<&Map<String, Value>> {
        self.fields.get("devDependencies").and_then(Value::as_object)
    }

    pub fn has_dev_dependency(&self, package: &str) -> bool {
        self.dev_dependencies()
            .is_some_and(|deps| deps.contains_key(package))
    }

    /// Inject lint tooling unless the template already declares `eslint`
    ///
    /// Entries are only added when absent. Returns the names that were added.
    pub fn inject_lint_tooling(&mut self, language: Language, features: &[Feature]) -> Vec<String> {
        if self.has_dev_dependency(LINT_GATE) {
            return Vec::new();
        }

        let mut wanted: Vec<(&str, &str)> = BASE_LINT_DEPENDENCIES.to_vec();
        if language.is_typed() {
            wanted.extend_from_slice(TYPED_LINT_DEPENDENCIES);
        }
        if features.iter().any(Feature::is_ui_framework) {
            wanted.extend_from_slice(UI_LINT_DEPENDENCIES);
        }

        let dev = self
            .fields
            .entry("devDependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(dev) = dev else {
            // parse() guarantees an object
            return Vec::new();
        };

        let mut added = Vec::new();
        for (package, version) in wanted {
            if !dev.contains_key(package) {
                dev.insert(package.to_string(), Value::String(version.to_string()));
                added.push(package.to_string());
            }
        }
        added
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            ScaffoldError::InvalidManifest {
                path: MANIFEST_FILE.into(),
                message: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Write `package.json` into the target directory
    pub async fn write(&self, target_dir: &Path) -> Result<()> {
        let path = target_dir.join(MANIFEST_FILE);
        let content = self.to_json_string()?;
        fs::write(&path, content)
            .await
            .map_err(|e| ScaffoldError::io(&path, e))
    }
}

/// Load the template manifest, rename it, add lint tooling, write it to the target
///
/// The name is set before injection, and the template copy is never touched.
pub async fn patch(
    template_dir: &Path,
    target_dir: &Path,
    name: &str,
    language: Language,
    features: &[Feature],
) -> Result<PackageManifest> {
    let mut manifest = PackageManifest::load(template_dir).await?;
    manifest.set_name(name);

    let added = manifest.inject_lint_tooling(language, features);
    if added.is_empty() {
        debug!("template declares its own lint toolchain, leaving devDependencies alone");
    } else {
        debug!(added = ?added, "injected lint tooling");
    }

    manifest.write(target_dir).await?;
    Ok(manifest)
}
