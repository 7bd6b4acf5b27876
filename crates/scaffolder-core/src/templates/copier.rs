//! Template tree copying

use super::source::MANIFEST_FILE;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Files stored under a placeholder name in templates
const RENAMED_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

/// Copy every entry of the template into the target, except the top-level
/// manifest. Symlinks are dereferenced. Returns the relative paths of the
/// files written.
pub async fn copy_template(template_dir: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .map_err(|e| ScaffoldError::io(target_dir, e))?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(template_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == MANIFEST_FILE))
    {
        let entry = entry.map_err(|e| walk_error(template_dir, e))?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .map_err(|_| {
                ScaffoldError::io(
                    entry.path(),
                    std::io::Error::other("entry escaped the template directory"),
                )
            })?;
        let relative = rename_placeholder(relative);
        let target_path = target_dir.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .map_err(|e| ScaffoldError::io(&target_path, e))?;
            continue;
        }

        // Ensure parent directories exist
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io(parent, e))?;
        }

        // fs::copy reads through symlinks and carries permission bits
        fs::copy(entry.path(), &target_path)
            .await
            .map_err(|e| ScaffoldError::io(&target_path, e))?;
        debug!(file = %relative.display(), "copied");

        copied_files.push(relative);
    }

    Ok(copied_files)
}

fn rename_placeholder(relative: &Path) -> PathBuf {
    let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
        return relative.to_path_buf();
    };
    match RENAMED_FILES.iter().find(|(from, _)| *from == name) {
        Some((_, to)) => relative.with_file_name(to),
        None => relative.to_path_buf(),
    }
}

fn walk_error(template_dir: &Path, err: walkdir::Error) -> ScaffoldError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| template_dir.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("symlink loop in template"));
    ScaffoldError::io(path, source)
}
