//! Best-effort git repository initialization

use crate::directory::VCS_METADATA_ENTRY;
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Program run when no other is configured
pub const GIT_PROGRAM: &str = "git";

/// Timeout for `git init` (10 seconds)
const INIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of the version-control step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsStatus {
    Initialized,
    AlreadyPresent,
    Skipped,
}

/// Run `<program> init` in the project directory
///
/// Does nothing when the directory already holds repository metadata. Any
/// failure comes back as [`ScaffoldError::VcsInit`] for the caller to log.
pub async fn init_repository(dir: &Path, program: &str) -> Result<VcsStatus> {
    if dir.join(VCS_METADATA_ENTRY).exists() {
        return Ok(VcsStatus::AlreadyPresent);
    }
    run_git(dir, program, &["init", "--quiet"]).await?;
    Ok(VcsStatus::Initialized)
}

async fn run_git(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let child = TokioCommand::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ScaffoldError::VcsInit {
            message: format!("could not run {}: {}", program, e),
        })?;

    // Wait for process to complete with timeout
    match timeout(INIT_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(output)) if output.status.success() => Ok(()),
        Ok(Ok(output)) => Err(ScaffoldError::VcsInit {
            message: format!(
                "git {} exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }),
        Ok(Err(e)) => Err(ScaffoldError::VcsInit {
            message: format!("failed to wait for git: {}", e),
        }),
        Err(_) => Err(ScaffoldError::VcsInit {
            message: format!("git timed out after {} seconds", INIT_TIMEOUT.as_secs()),
        }),
    }
}
