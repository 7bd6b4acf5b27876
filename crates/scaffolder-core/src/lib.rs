//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library turns a handful of answers (target directory, language,
//! feature packages) into a ready-to-install project copied from a local
//! template tree.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Path normalization, package naming, directory
//!   reconciliation, template resolution, tree copying and manifest patching
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `Scaffolder`,
//!   which sequences a run and pulls missing answers from a `Prompter`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{Scaffolder, ScaffoldOptions, SelectionBuilder, Language, Feature};
//!
//! let options = ScaffoldOptions::from_env(&MyConfig, None);
//! let mut scaffolder = Scaffolder::new(MyConfig, options);
//! let presets = SelectionBuilder::new()
//!     .target_dir("my-dapp")
//!     .language(Language::TypeScript)
//!     .features([Feature::Hardhat]);
//! let outcome = scaffolder.run(&mut my_prompter, presets).await?;
//! ```

pub mod directory;
pub mod error;
pub mod naming;
pub mod package_manager;
pub mod product;
pub mod scaffold;
pub mod selection;
pub mod templates;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use directory::TargetDirectoryState;
pub use error::{Result, ScaffoldError};
pub use package_manager::PackageManager;
pub use product::ProductConfig;
pub use scaffold::{
    Prompter, RunOutcome, RunState, ScaffoldOptions, ScaffoldReport, Scaffolder,
};
pub use selection::{Feature, Language, Selection, SelectionBuilder};
pub use templates::{TemplateId, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
