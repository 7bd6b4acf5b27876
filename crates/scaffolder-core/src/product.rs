//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a scaffolding binary implements to
//! configure naming, template lookup and post-setup instructions.

use crate::package_manager::{self, PackageManager};
use std::path::{Path, PathBuf};

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Where templates live and how their ids are prefixed
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Target directory offered when none is given
    fn default_project_dir(&self) -> &'static str;

    /// Prefix shared by all template ids, e.g. `hardhat-react`
    fn toolchain_prefix(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template directory used when neither a flag nor the env var is set
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable carrying the invoking package manager's user agent
    fn user_agent_env(&self) -> &'static str {
        "npm_config_user_agent"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, cwd: &Path, root: &Path, manager: PackageManager) -> Vec<String> {
        package_manager::next_steps(cwd, root, manager)
    }
}
