//! Target directory normalization and reconciliation

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Version-control metadata that counts as "empty" and survives overwrites
pub const VCS_METADATA_ENTRY: &str = ".git";

/// State of the target directory before anything is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirectoryState {
    Absent,
    EmptyExisting,
    NonEmptyExisting,
}

/// Trim whitespace and trailing path separators from a user-supplied directory
///
/// `None` stays `None` so the caller knows to prompt. A bare `/` is kept as is.
pub fn normalize_target_dir(raw: Option<&str>) -> Option<String> {
    raw.map(|dir| {
        let trimmed = dir.trim();
        let stripped = trimmed.trim_end_matches(['/', '\\']);
        if stripped.is_empty() && !trimmed.is_empty() {
            trimmed[..1].to_string()
        } else {
            stripped.to_string()
        }
    })
}

/// Classify the target directory
///
/// A path that exists but is not a directory is an IO error: it can neither be
/// emptied nor written into.
pub fn classify(path: &Path) -> Result<TargetDirectoryState> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(TargetDirectoryState::Absent)
        }
        Err(e) => return Err(ScaffoldError::io(path, e)),
    };

    if !metadata.is_dir() {
        return Err(ScaffoldError::io(
            path,
            std::io::Error::other("target exists and is not a directory"),
        ));
    }

    if is_empty(path)? {
        Ok(TargetDirectoryState::EmptyExisting)
    } else {
        Ok(TargetDirectoryState::NonEmptyExisting)
    }
}

/// True when the directory has no entries, or only the VCS metadata entry
pub fn is_empty(path: &Path) -> Result<bool> {
    let entries = fs::read_dir(path).map_err(|e| ScaffoldError::io(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(path, e))?;
        if entry.file_name() != VCS_METADATA_ENTRY {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Delete everything in the directory except the VCS metadata entry
///
/// A missing directory is left alone. The target itself may be a symlink to a
/// directory; symlinks inside it are removed, never followed.
pub fn empty(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScaffoldError::io(path, e)),
    };
    if !metadata.is_dir() {
        return Err(ScaffoldError::io(
            path,
            std::io::Error::other("not a directory"),
        ));
    }

    let entries = fs::read_dir(path).map_err(|e| ScaffoldError::io(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(path, e))?;
        if entry.file_name() == VCS_METADATA_ENTRY {
            continue;
        }

        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| ScaffoldError::io(&entry_path, e))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        removed.map_err(|e| ScaffoldError::io(&entry_path, e))?;
        debug!(path = %entry_path.display(), "removed existing entry");
    }

    Ok(())
}

/// Get the target ready for materialization: empty it when overwriting, or
/// create it when absent
pub fn prepare(path: &Path, state: TargetDirectoryState, overwrite: bool) -> Result<()> {
    match state {
        TargetDirectoryState::NonEmptyExisting if overwrite => empty(path),
        TargetDirectoryState::Absent => {
            fs::create_dir_all(path).map_err(|e| ScaffoldError::io(path, e))
        }
        _ => Ok(()),
    }
}
