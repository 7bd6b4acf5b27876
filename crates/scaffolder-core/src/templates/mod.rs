//! Template resolution, copying and manifest patching
//!
//! This module provides:
//! - Template id resolution from language and feature selections
//! - Locating template directories under a local template root
//! - Recursive template copying (everything but the manifest)
//! - Package manifest patching (name, lint tooling)

pub mod copier;
pub mod manifest;
pub mod resolver;
pub mod source;

pub use copier::copy_template;
pub use manifest::{patch, PackageManifest};
pub use resolver::{feature_subpath, resolve, TemplateId};
pub use source::{TemplateSource, MANIFEST_FILE};
