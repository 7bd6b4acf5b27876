//! User selections for one scaffolding run
//!
//! Answers are accumulated in a [`SelectionBuilder`] as each prompt step
//! completes, then frozen into a [`Selection`] once every field is known.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::str::FromStr;

/// Supported template languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Short code used as the template id suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }

    /// The statically-typed variant gets typed lint tooling
    pub fn is_typed(&self) -> bool {
        matches!(self, Language::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            other => Err(ScaffoldError::invalid_selection(format!(
                "unknown language '{}' (expected js or ts)",
                other
            ))),
        }
    }
}

/// Add-on packages ("points") that can be selected independently of language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// React frontend package
    React,
    /// Hardhat blockchain tooling package
    Hardhat,
}

impl Feature {
    pub const ALL: [Feature; 2] = [Feature::React, Feature::Hardhat];

    pub fn id(&self) -> &'static str {
        match self {
            Feature::React => "react",
            Feature::Hardhat => "hardhat",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::React => "frontend web app",
            Feature::Hardhat => "smart contract toolchain",
        }
    }

    /// UI-framework features pull in their own lint plugin
    pub fn is_ui_framework(&self) -> bool {
        matches!(self, Feature::React)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Feature {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "react" => Ok(Feature::React),
            "hardhat" => Ok(Feature::Hardhat),
            other => Err(ScaffoldError::invalid_selection(format!(
                "unknown feature '{}' (expected react or hardhat)",
                other
            ))),
        }
    }
}

/// A complete set of answers for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target_dir: String,
    pub language: Language,
    /// Ordered, deduplicated, never empty
    pub features: Vec<Feature>,
    pub overwrite: bool,
    pub package_name: Option<String>,
}

/// Accumulates answers step by step
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    target_dir: Option<String>,
    language: Option<Language>,
    features: Vec<Feature>,
    overwrite: Option<bool>,
    package_name: Option<String>,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_dir(mut self, dir: impl Into<String>) -> Self {
        self.target_dir = Some(dir.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Replace the feature set; duplicates are dropped, first occurrence wins
    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.clear();
        for feature in features {
            if !self.features.contains(&feature) {
                self.features.push(feature);
            }
        }
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn get_target_dir(&self) -> Option<&str> {
        self.target_dir.as_deref()
    }

    pub fn get_language(&self) -> Option<Language> {
        self.language
    }

    pub fn get_features(&self) -> &[Feature] {
        &self.features
    }

    pub fn get_overwrite(&self) -> Option<bool> {
        self.overwrite
    }

    pub fn get_package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Freeze the answers, checking the selection invariants
    pub fn build(self) -> Result<Selection> {
        let target_dir = self
            .target_dir
            .ok_or_else(|| ScaffoldError::invalid_selection("no target directory given"))?;
        let language = self
            .language
            .ok_or_else(|| ScaffoldError::invalid_selection("no language selected"))?;
        if self.features.is_empty() {
            return Err(ScaffoldError::invalid_selection(
                "at least one feature must be selected",
            ));
        }

        Ok(Selection {
            target_dir,
            language,
            features: self.features,
            overwrite: self.overwrite.unwrap_or(false),
            package_name: self.package_name,
        })
    }
}

/// Parse a list of feature ids, e.g. from a comma-separated flag
pub fn parse_features<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Feature>> {
    ids.iter().map(|s| s.as_ref().parse()).collect()
}
