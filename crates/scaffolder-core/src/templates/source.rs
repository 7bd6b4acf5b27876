//! Locating template directories on disk

use super::resolver::TemplateId;
use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use std::path::{Path, PathBuf};

/// Well-known manifest file name inside every template
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the directory holding template trees in an installation
const TEMPLATES_DIR: &str = "templates";

/// Root directory holding all template trees
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    /// Pick the template root: explicit path, then the product's environment
    /// variable, then the product default
    pub fn from_config<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Self {
        let root = explicit
            .or_else(|| std::env::var_os(config.template_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| config.default_template_dir());
        Self { root }
    }

    /// Use a local directory as the template root
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Template root shipped alongside an installed binary
    ///
    /// Looks next to the executable, then in `../share/<product>/templates`,
    /// then two levels up for a binary running out of `target/<profile>`.
    pub fn installed_root(exe: &Path, product: &str) -> Option<PathBuf> {
        let bin_dir = exe.parent()?;
        let candidates = [
            Some(bin_dir.join(TEMPLATES_DIR)),
            bin_dir
                .parent()
                .map(|prefix| prefix.join("share").join(product).join(TEMPLATES_DIR)),
            bin_dir
                .parent()
                .and_then(Path::parent)
                .map(|root| root.join(TEMPLATES_DIR)),
        ];
        candidates.into_iter().flatten().find(|dir| dir.is_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a template id; fails if it does not exist
    pub fn locate(&self, id: &TemplateId) -> Result<PathBuf> {
        let dir = self.root.join(id.relative_path());
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(ScaffoldError::TemplateNotFound {
                id: id.to_string(),
                path: dir,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Feature, Language};
    use crate::templates::resolver::resolve;
    use tempfile::TempDir;

    #[test]
    fn test_locate_existing_template() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("hardhat-react-js/packages/web-app")).unwrap();
        let source = TemplateSource::local(tmp.path());

        let id = resolve("hardhat-react", Language::JavaScript, &[Feature::React]);
        let dir = source.locate(&id).unwrap();
        assert!(dir.ends_with("hardhat-react-js/packages/web-app"));
    }

    #[test]
    fn test_locate_missing_template() {
        let tmp = TempDir::new().unwrap();
        let source = TemplateSource::local(tmp.path());

        let id = resolve("hardhat-react", Language::TypeScript, &[]);
        let err = source.locate(&id).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { ref id, .. } if id == "hardhat-react-ts"));
    }

    #[test]
    fn test_installed_root_prefers_exe_dir() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(bin.join("templates")).unwrap();
        std::fs::create_dir_all(tmp.path().join("share/create-web3-app/templates")).unwrap();

        let root = TemplateSource::installed_root(&bin.join("create-web3-app"), "create-web3-app");
        assert_eq!(root, Some(bin.join("templates")));
    }

    #[test]
    fn test_installed_root_checks_share_dir() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let share = tmp.path().join("share/create-web3-app/templates");
        std::fs::create_dir_all(&share).unwrap();

        let root = TemplateSource::installed_root(&bin.join("create-web3-app"), "create-web3-app");
        assert_eq!(root, Some(share));
    }

    #[test]
    fn test_installed_root_finds_workspace_from_target_dir() {
        let tmp = TempDir::new().unwrap();
        let debug = tmp.path().join("target/debug");
        std::fs::create_dir_all(&debug).unwrap();
        std::fs::create_dir_all(tmp.path().join("templates")).unwrap();

        let root = TemplateSource::installed_root(&debug.join("create-web3-app"), "create-web3-app");
        assert_eq!(root, Some(tmp.path().join("templates")));
    }

    #[test]
    fn test_installed_root_none_when_nothing_shipped() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("a/b/bin");
        std::fs::create_dir_all(&bin).unwrap();

        assert_eq!(TemplateSource::installed_root(&bin.join("tool"), "tool"), None);
    }
}
