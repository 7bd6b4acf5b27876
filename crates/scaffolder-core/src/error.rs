//! Error types for scaffolding runs
//!
//! Every failure the engine can hit maps to one [`ScaffoldError`] variant.
//! `Cancelled` is not a defect: front-ends turn it into a clean exit.
//! `VcsInit` never escapes a run; the orchestrator logs it and keeps going.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scaffolding operations
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user declined a prompt or aborted it
    #[error("Operation cancelled")]
    Cancelled,

    /// The resolved template id has no directory under the template root
    #[error("Template '{id}' not found at {}", path.display())]
    TemplateNotFound { id: String, path: PathBuf },

    /// The template manifest is not valid JSON
    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The template manifest is JSON but not shaped like a package manifest
    #[error("Invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    /// User selections that cannot produce a project
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    /// Filesystem failure while reconciling, copying or writing
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Best-effort `git init` failed
    #[error("Failed to initialize git repository: {message}")]
    VcsInit { message: String },
}

impl ScaffoldError {
    /// Wrap an IO error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection {
            message: message.into(),
        }
    }

    /// True for the user-cancelled outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for scaffolding operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;
