//! Run orchestration
//!
//! A run walks `CollectingInput -> Reconciling -> Resolving -> Materializing ->
//! Patching -> Finalizing` and ends in exactly one of `Done`, `Cancelled` or
//! `Failed`. Interactive answers come from a [`Prompter`] and are accumulated
//! in a [`SelectionBuilder`], so the whole flow runs without a terminal in
//! tests.
//!
//! The template is located once at the end of `CollectingInput` as well, so a
//! missing template fails the run before the target directory is touched.

use crate::directory::{self, TargetDirectoryState};
use crate::error::{Result, ScaffoldError};
use crate::naming;
use crate::package_manager::PackageManager;
use crate::product::ProductConfig;
use crate::selection::{Feature, Language, Selection, SelectionBuilder};
use crate::templates::{self, TemplateId, TemplateSource};
use crate::vcs::{self, VcsStatus};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Run states, in the order a successful run visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    CollectingInput,
    Reconciling,
    Resolving,
    Materializing,
    Patching,
    Finalizing,
    Done,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Cancelled | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::CollectingInput => "collecting input",
            RunState::Reconciling => "reconciling",
            RunState::Resolving => "resolving",
            RunState::Materializing => "materializing",
            RunState::Patching => "patching",
            RunState::Finalizing => "finalizing",
            RunState::Done => "done",
            RunState::Cancelled => "cancelled",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Source of answers for whatever the presets left open
///
/// Returning [`ScaffoldError::Cancelled`] from any method cancels the run.
pub trait Prompter {
    /// Ask for the project name / target directory
    fn project_name(&mut self, default: &str) -> Result<String>;

    /// Ask whether a non-empty target may be emptied
    fn confirm_overwrite(&mut self, target_dir: &str) -> Result<bool>;

    /// Ask for a package name; `initial` is already valid
    fn package_name(&mut self, initial: &str) -> Result<String>;

    fn language(&mut self) -> Result<Language>;

    /// Must return at least one feature
    fn features(&mut self) -> Result<Vec<Feature>>;

    /// Called on every state transition
    fn on_state(&mut self, _state: RunState) {}
}

/// Environment a run executes in
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Directory relative targets are resolved against
    pub cwd: PathBuf,
    pub templates: TemplateSource,
    /// Run `git init` in the new project
    pub init_git: bool,
    /// Program invoked for `init_git`
    pub git_program: String,
    /// Package-manager user agent, if the tool was launched through one
    pub user_agent: Option<String>,
}

impl ScaffoldOptions {
    /// Options from the process environment
    pub fn from_env<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            templates: TemplateSource::from_config(config, template_dir),
            init_git: true,
            git_program: vcs::GIT_PROGRAM.to_string(),
            user_agent: std::env::var(config.user_agent_env()).ok(),
        }
    }
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub selection: Selection,
    pub template: TemplateId,
    pub root: PathBuf,
    pub package_name: String,
    /// Copied files plus the manifest
    pub files_written: usize,
    /// `None` when git was not requested or failed
    pub vcs: Option<VcsStatus>,
    pub package_manager: PackageManager,
    pub next_steps: Vec<String>,
}

/// Final result of a run that did not fail
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Done(Box<ScaffoldReport>),
    Cancelled,
}

/// Answers gathered during `CollectingInput`
struct CollectedInput {
    selection: Selection,
    package_name: String,
    root: PathBuf,
    state: TargetDirectoryState,
}

/// Sequences one scaffolding run
pub struct Scaffolder<C: ProductConfig> {
    config: C,
    options: ScaffoldOptions,
    history: Vec<RunState>,
}

impl<C: ProductConfig> Scaffolder<C> {
    pub fn new(config: C, options: ScaffoldOptions) -> Self {
        Self {
            config,
            options,
            history: Vec::new(),
        }
    }

    /// States visited by the last run, in order
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Execute one run; `presets` holds answers already known (e.g. from flags)
    ///
    /// Cancellation is an outcome, not an error.
    pub async fn run<P: Prompter>(
        &mut self,
        prompter: &mut P,
        presets: SelectionBuilder,
    ) -> Result<RunOutcome> {
        self.history.clear();

        match self.execute(prompter, presets).await {
            Ok(report) => {
                self.enter(prompter, RunState::Done);
                Ok(RunOutcome::Done(Box::new(report)))
            }
            Err(ScaffoldError::Cancelled) => {
                self.enter(prompter, RunState::Cancelled);
                Ok(RunOutcome::Cancelled)
            }
            Err(e) => {
                self.enter(prompter, RunState::Failed);
                Err(e)
            }
        }
    }

    fn enter<P: Prompter>(&mut self, prompter: &mut P, state: RunState) {
        if state.is_terminal() {
            info!(%state, "run finished");
        } else {
            debug!(%state, "run state");
        }
        self.history.push(state);
        prompter.on_state(state);
    }

    async fn execute<P: Prompter>(
        &mut self,
        prompter: &mut P,
        presets: SelectionBuilder,
    ) -> Result<ScaffoldReport> {
        self.enter(prompter, RunState::CollectingInput);
        let input = self.collect_input(prompter, presets)?;
        let CollectedInput {
            selection,
            package_name,
            root,
            state,
        } = input;

        self.enter(prompter, RunState::Reconciling);
        directory::prepare(&root, state, selection.overwrite)?;

        self.enter(prompter, RunState::Resolving);
        let template = templates::resolve(
            self.config.toolchain_prefix(),
            selection.language,
            &selection.features,
        );
        let template_dir = self.options.templates.locate(&template)?;
        info!(%template, dir = %template_dir.display(), "resolved template");

        self.enter(prompter, RunState::Materializing);
        let copied = templates::copy_template(&template_dir, &root).await?;
        debug!(count = copied.len(), "copied template files");

        self.enter(prompter, RunState::Patching);
        templates::patch(
            &template_dir,
            &root,
            &package_name,
            selection.language,
            &selection.features,
        )
        .await?;

        self.enter(prompter, RunState::Finalizing);
        let vcs = if self.options.init_git {
            match vcs::init_repository(&root, &self.options.git_program).await {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            }
        } else {
            Some(VcsStatus::Skipped)
        };

        let package_manager = PackageManager::from_user_agent(self.options.user_agent.as_deref());
        let next_steps = self
            .config
            .next_steps(&self.options.cwd, &root, package_manager);

        Ok(ScaffoldReport {
            selection,
            template,
            root,
            package_name,
            files_written: copied.len() + 1,
            vcs,
            package_manager,
            next_steps,
        })
    }

    fn collect_input<P: Prompter>(
        &self,
        prompter: &mut P,
        presets: SelectionBuilder,
    ) -> Result<CollectedInput> {
        let default_dir = self.config.default_project_dir();

        let target_dir = match directory::normalize_target_dir(presets.get_target_dir()) {
            Some(dir) if !dir.is_empty() => dir,
            _ => {
                let answer = prompter.project_name(default_dir)?;
                directory::normalize_target_dir(Some(&answer))
                    .filter(|dir| !dir.is_empty())
                    .unwrap_or_else(|| default_dir.to_string())
            }
        };

        let root = if target_dir == "." {
            self.options.cwd.clone()
        } else {
            self.options.cwd.join(&target_dir)
        };
        let state = directory::classify(&root)?;
        debug!(?state, root = %root.display(), "target directory");

        let overwrite = match state {
            TargetDirectoryState::NonEmptyExisting => {
                let confirmed = match presets.get_overwrite() {
                    Some(true) => true,
                    _ => prompter.confirm_overwrite(&target_dir)?,
                };
                if !confirmed {
                    return Err(ScaffoldError::Cancelled);
                }
                true
            }
            _ => false,
        };

        let project_name = naming::project_name(&target_dir, &self.options.cwd);
        let package_name = match presets.get_package_name() {
            Some(name) if naming::is_valid_name(name) => name.to_string(),
            Some(name) => {
                return Err(ScaffoldError::invalid_selection(format!(
                    "'{}' is not a valid package name",
                    name
                )))
            }
            None if naming::is_valid_name(&project_name) => project_name,
            None => {
                let answer = prompter.package_name(&naming::to_valid_name(&project_name))?;
                if !naming::is_valid_name(&answer) {
                    return Err(ScaffoldError::invalid_selection(format!(
                        "'{}' is not a valid package name",
                        answer
                    )));
                }
                answer
            }
        };

        let language = match presets.get_language() {
            Some(language) => language,
            None => prompter.language()?,
        };

        let features = if presets.get_features().is_empty() {
            prompter.features()?
        } else {
            presets.get_features().to_vec()
        };

        let selection = SelectionBuilder::new()
            .target_dir(target_dir)
            .language(language)
            .features(features)
            .overwrite(overwrite)
            .package_name(package_name.clone())
            .build()?;

        // Nothing on disk may change before the template is known to exist
        let template = templates::resolve(
            self.config.toolchain_prefix(),
            selection.language,
            &selection.features,
        );
        self.options.templates.locate(&template)?;

        Ok(CollectedInput {
            selection,
            package_name,
            root,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn cli_description(&self) -> &'static str {
            "test"
        }
        fn default_project_dir(&self) -> &'static str {
            "web3-app-project"
        }
        fn toolchain_prefix(&self) -> &'static str {
            "hardhat-react"
        }
        fn template_dir_env(&self) -> &'static str {
            "TEST_TEMPLATE_DIR"
        }
        fn default_template_dir(&self) -> PathBuf {
            PathBuf::from("templates")
        }
    }

    /// Answers everything with fixed values and records what was asked
    #[derive(Default)]
    struct Scripted {
        project_name: Option<String>,
        overwrite: bool,
        package_name: Option<String>,
        asked: Vec<&'static str>,
    }

    impl Prompter for Scripted {
        fn project_name(&mut self, default: &str) -> Result<String> {
            self.asked.push("project_name");
            Ok(self.project_name.clone().unwrap_or_else(|| default.to_string()))
        }
        fn confirm_overwrite(&mut self, _target_dir: &str) -> Result<bool> {
            self.asked.push("overwrite");
            Ok(self.overwrite)
        }
        fn package_name(&mut self, initial: &str) -> Result<String> {
            self.asked.push("package_name");
            Ok(self.package_name.clone().unwrap_or_else(|| initial.to_string()))
        }
        fn language(&mut self) -> Result<Language> {
            self.asked.push("language");
            Ok(Language::JavaScript)
        }
        fn features(&mut self) -> Result<Vec<Feature>> {
            self.asked.push("features");
            Ok(vec![Feature::Hardhat])
        }
    }

    fn scaffolder(cwd: &std::path::Path, templates: &std::path::Path) -> Scaffolder<TestConfig> {
        Scaffolder::new(
            TestConfig,
            ScaffoldOptions {
                cwd: cwd.to_path_buf(),
                templates: TemplateSource::local(templates),
                init_git: false,
                git_program: vcs::GIT_PROGRAM.to_string(),
                user_agent: None,
            },
        )
    }

    /// Empty template directories for every language and sub-package
    fn template_root() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for base in ["hardhat-react-js", "hardhat-react-ts"] {
            for sub in ["packages/chain-app", "packages/web-app"] {
                std::fs::create_dir_all(tmp.path().join(base).join(sub)).unwrap();
            }
        }
        tmp
    }

    #[test]
    fn test_collect_uses_default_dir_when_answer_blank() {
        let cwd = TempDir::new().unwrap();
        let templates = template_root();
        let s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted {
            project_name: Some("   ".to_string()),
            ..Default::default()
        };

        let input = s.collect_input(&mut prompter, SelectionBuilder::new()).unwrap();
        assert_eq!(input.selection.target_dir, "web3-app-project");
        assert_eq!(input.package_name, "web3-app-project");
        assert_eq!(input.state, TargetDirectoryState::Absent);
        assert_eq!(prompter.asked, vec!["project_name", "language", "features"]);
    }

    #[test]
    fn test_collect_prompts_for_package_name_when_invalid() {
        let cwd = TempDir::new().unwrap();
        let templates = template_root();
        let s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted::default();

        let presets = SelectionBuilder::new().target_dir("My Dapp/");
        let input = s.collect_input(&mut prompter, presets).unwrap();
        assert_eq!(input.selection.target_dir, "My Dapp");
        assert_eq!(input.package_name, "my-dapp");
        assert!(prompter.asked.contains(&"package_name"));
        assert!(!prompter.asked.contains(&"project_name"));
    }

    #[test]
    fn test_collect_rejects_invalid_preset_package_name() {
        let cwd = TempDir::new().unwrap();
        let templates = template_root();
        let s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted::default();

        let presets = SelectionBuilder::new()
            .target_dir("app")
            .package_name("Not Valid");
        let err = s.collect_input(&mut prompter, presets).err().unwrap();
        assert!(matches!(err, ScaffoldError::InvalidSelection { .. }));
    }

    #[test]
    fn test_collect_preset_overwrite_skips_prompt() {
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir(cwd.path().join("app")).unwrap();
        std::fs::write(cwd.path().join("app/old.txt"), "x").unwrap();
        let templates = template_root();
        let s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted::default();

        let presets = SelectionBuilder::new()
            .target_dir("app")
            .overwrite(true)
            .language(Language::TypeScript)
            .features([Feature::React]);
        let input = s.collect_input(&mut prompter, presets).unwrap();
        assert!(input.selection.overwrite);
        assert_eq!(input.state, TargetDirectoryState::NonEmptyExisting);
        assert!(prompter.asked.is_empty());
        // Nothing is deleted while collecting input
        assert!(cwd.path().join("app/old.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_template_fails_before_touching_target() {
        let cwd = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        let mut s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted::default();

        let err = s
            .run(&mut prompter, SelectionBuilder::new().target_dir("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { .. }));
        assert_eq!(s.history(), &[RunState::CollectingInput, RunState::Failed]);
        assert!(!cwd.path().join("app").exists());
    }

    #[tokio::test]
    async fn test_missing_template_keeps_confirmed_overwrite_target() {
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir(cwd.path().join("app")).unwrap();
        std::fs::write(cwd.path().join("app/old.txt"), "x").unwrap();
        let templates = TempDir::new().unwrap();
        let mut s = scaffolder(cwd.path(), templates.path());
        let mut prompter = Scripted {
            overwrite: true,
            ..Default::default()
        };

        let err = s
            .run(&mut prompter, SelectionBuilder::new().target_dir("app"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { .. }));
        assert!(prompter.asked.contains(&"overwrite"));
        assert_eq!(
            std::fs::read_to_string(cwd.path().join("app/old.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunState::Done.is_terminal());
        assert!(RunState::Cancelled.is_terminal());
        assert!(RunState::Failed.is_terminal());
        assert!(!RunState::Patching.is_terminal());
    }
}
