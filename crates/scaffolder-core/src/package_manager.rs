//! Package-manager front-end detection and follow-up instructions

use std::fmt;
use std::path::Path;

/// Package managers the generated project can be driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Used when no user agent is available or it names an unknown tool
    pub const DEFAULT: PackageManager = PackageManager::Yarn;

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "npm" => Some(PackageManager::Npm),
            "yarn" => Some(PackageManager::Yarn),
            "pnpm" => Some(PackageManager::Pnpm),
            "bun" => Some(PackageManager::Bun),
            _ => None,
        }
    }

    /// Pick the package manager from a user agent like `pnpm/8.6.0 npm/? node/v20.1.0`
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        user_agent
            .and_then(|ua| ua.split_whitespace().next())
            .and_then(|spec| spec.split('/').next())
            .and_then(Self::from_name)
            .unwrap_or(Self::DEFAULT)
    }

    /// Install and dev-server commands, in order
    pub fn install_and_run(&self) -> [String; 2] {
        match self {
            PackageManager::Yarn => ["yarn".to_string(), "yarn dev".to_string()],
            other => [
                format!("{} install", other.command()),
                format!("{} run dev", other.command()),
            ],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Follow-up commands to print once the project exists
///
/// A `cd` step is included when the project is not the current directory.
pub fn next_steps(cwd: &Path, root: &Path, manager: PackageManager) -> Vec<String> {
    let mut steps = Vec::new();

    if root != cwd {
        let shown = root.strip_prefix(cwd).unwrap_or(root);
        steps.push(format!("cd {}", shown.display()));
    }

    steps.extend(manager.install_and_run());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_agent_table() {
        let cases: &[(Option<&str>, PackageManager)] = &[
            (None, PackageManager::Yarn),
            (Some(""), PackageManager::Yarn),
            (Some("npm/10.2.4 node/v20.11.0 darwin arm64"), PackageManager::Npm),
            (Some("yarn/1.22.19 npm/? node/v18.17.0 linux x64"), PackageManager::Yarn),
            (Some("pnpm/8.15.1 npm/? node/v20.11.0 linux x64"), PackageManager::Pnpm),
            (Some("bun/1.0.25 npm/? node/v21.6.0 linux x64"), PackageManager::Bun),
            (Some("cnpm/9.4.0 npm/? node/v18.0.0"), PackageManager::Yarn),
            (Some("garbage"), PackageManager::Yarn),
        ];

        for (ua, expected) in cases {
            assert_eq!(PackageManager::from_user_agent(*ua), *expected, "{:?}", ua);
        }
    }

    #[test]
    fn test_install_and_run_phrasing() {
        assert_eq!(PackageManager::Yarn.install_and_run(), ["yarn", "yarn dev"]);
        assert_eq!(
            PackageManager::Npm.install_and_run(),
            ["npm install", "npm run dev"]
        );
        assert_eq!(
            PackageManager::Pnpm.install_and_run(),
            ["pnpm install", "pnpm run dev"]
        );
        assert_eq!(
            PackageManager::Bun.install_and_run(),
            ["bun install", "bun run dev"]
        );
    }

    #[test]
    fn test_next_steps_with_cd() {
        let steps = next_steps(
            Path::new("/work"),
            Path::new("/work/my-dapp"),
            PackageManager::Pnpm,
        );
        assert_eq!(steps, vec!["cd my-dapp", "pnpm install", "pnpm run dev"]);
    }

    #[test]
    fn test_next_steps_in_place() {
        let steps = next_steps(Path::new("/work"), Path::new("/work"), PackageManager::Yarn);
        assert_eq!(steps, vec!["yarn", "yarn dev"]);
    }
}
