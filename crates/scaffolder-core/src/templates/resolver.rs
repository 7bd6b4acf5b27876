//! Map user selections to a template id
//!
//! Resolution rule: exactly one selected feature picks that feature's
//! sub-package inside the language template; any other count picks the
//! combined root template. There is no per-feature composition.

use crate::selection::{Feature, Language};
use std::fmt;
use std::path::PathBuf;

/// Key identifying one template directory under the template root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId {
    base: String,
    subpath: Option<&'static str>,
}

impl TemplateId {
    /// Path relative to the template root
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.base);
        if let Some(sub) = self.subpath {
            path.extend(sub.split('/'));
        }
        path
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subpath {
            Some(sub) => write!(f, "{}/{}", self.base, sub),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Relative location of a feature's sub-package inside a root template
pub fn feature_subpath(feature: Feature) -> &'static str {
    match feature {
        Feature::Hardhat => "packages/chain-app",
        Feature::React => "packages/web-app",
    }
}

/// Resolve a template id; existence is checked by the caller via
/// [`TemplateSource::locate`](super::TemplateSource::locate)
pub fn resolve(toolchain_prefix: &str, language: Language, features: &[Feature]) -> TemplateId {
    let base = format!("{}-{}", toolchain_prefix, language.suffix());
    let subpath = match features {
        [single] => Some(feature_subpath(*single)),
        _ => None,
    };
    TemplateId { base, subpath }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        let cases: &[(Language, &[Feature], &str)] = &[
            (Language::JavaScript, &[], "hardhat-react-js"),
            (Language::TypeScript, &[], "hardhat-react-ts"),
            (
                Language::JavaScript,
                &[Feature::Hardhat],
                "hardhat-react-js/packages/chain-app",
            ),
            (
                Language::TypeScript,
                &[Feature::React],
                "hardhat-react-ts/packages/web-app",
            ),
            (
                Language::JavaScript,
                &[Feature::React, Feature::Hardhat],
                "hardhat-react-js",
            ),
            (
                Language::TypeScript,
                &[Feature::Hardhat, Feature::React],
                "hardhat-react-ts",
            ),
        ];

        for (language, features, expected) in cases {
            let id = resolve("hardhat-react", *language, features);
            assert_eq!(id.to_string(), *expected, "{:?} {:?}", language, features);
        }
    }

    #[test]
    fn test_relative_path_joins_segments() {
        let id = resolve("hardhat-react", Language::TypeScript, &[Feature::Hardhat]);
        assert_eq!(
            id.relative_path(),
            PathBuf::from("hardhat-react-ts").join("packages").join("chain-app")
        );
    }

    #[test]
    fn test_every_feature_has_subpath() {
        for feature in Feature::ALL {
            assert!(!feature_subpath(feature).is_empty());
        }
    }
}
