//! Package name validation and coercion

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Fallback when coercion leaves nothing usable
pub const FALLBACK_PACKAGE_NAME: &str = "web3-app-project";

static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z\d\-*~][a-z\d\-*._~]*/)?[a-z\d\-~][a-z\d\-._~]*$")
        .expect("package name pattern is valid")
});

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\d\-~]+").expect("invalid char pattern is valid"));

/// Check a name against the package manifest naming rules
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// Coerce any string into a valid package name
///
/// Lowercases, collapses every run of disallowed characters into `-`, and keeps
/// an `@scope/` prefix when one is present. Idempotent.
pub fn to_valid_name(name: &str) -> String {
    let trimmed = name.trim();

    if let Some((scope, rest)) = trimmed
        .strip_prefix('@')
        .and_then(|scoped| scoped.split_once('/'))
    {
        let scope = sanitize_segment(scope);
        let rest = non_empty_or_fallback(sanitize_segment(rest));
        if scope.is_empty() {
            return rest;
        }
        return format!("@{}/{}", scope, rest);
    }

    non_empty_or_fallback(sanitize_segment(trimmed))
}

/// Project name as the user sees it: the target directory, or the current
/// directory's base name when the target is `.`
pub fn project_name(target_dir: &str, cwd: &Path) -> String {
    if target_dir == "." {
        cwd.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_PACKAGE_NAME.to_string())
    } else {
        target_dir.to_string()
    }
}

fn sanitize_segment(segment: &str) -> String {
    let lower = segment.trim().to_lowercase();
    INVALID_CHARS.replace_all(&lower, "-").into_owned()
}

fn non_empty_or_fallback(name: String) -> String {
    if name.is_empty() {
        FALLBACK_PACKAGE_NAME.to_string()
    } else {
        name
    }
}
