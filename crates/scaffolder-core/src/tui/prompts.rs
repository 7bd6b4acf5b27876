//! Charm-style CLI prompts using cliclack

use crate::error::{Result, ScaffoldError};
use crate::naming;
use crate::product::ProductConfig;
use crate::scaffold::{Prompter, RunOutcome, RunState, ScaffoldOptions, ScaffoldReport, Scaffolder};
use crate::selection::{self, Feature, Language, SelectionBuilder};
use cliclack::ProgressBar;
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<String>,

    /// Local directory to use for templates
    pub template_dir: Option<PathBuf>,

    /// Language to use (js, ts)
    pub language: Option<String>,

    /// Features to include (react, hardhat)
    pub features: Option<Vec<String>>,

    /// Package name for the generated manifest
    pub package_name: Option<String>,

    /// Empty a non-empty target without asking
    pub overwrite: bool,

    /// Skip `git init`
    pub no_git: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    /// Turn flag values into preset answers
    pub fn presets(&self) -> Result<SelectionBuilder> {
        let mut presets = SelectionBuilder::new();
        if let Some(dir) = &self.directory {
            presets = presets.target_dir(dir.clone());
        }
        if let Some(language) = &self.language {
            presets = presets.language(language.parse()?);
        }
        if let Some(features) = &self.features {
            presets = presets.features(selection::parse_features(features)?);
        }
        if let Some(name) = &self.package_name {
            presets = presets.package_name(name.clone());
        }
        if self.overwrite || self.yes {
            presets = presets.overwrite(true);
        }
        Ok(presets)
    }
}

/// Interactive prompter; with `yes` set, every question takes its default
pub struct TerminalPrompter {
    yes: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalPrompter {
    pub fn new(yes: bool) -> Self {
        Self { yes, spinner: None }
    }

    fn stop_spinner(&mut self, message: &str, failed: bool) {
        if let Some(spinner) = self.spinner.take() {
            if failed {
                spinner.error(message);
            } else {
                spinner.stop(message);
            }
        }
    }
}

/// Esc / Ctrl+C inside a prompt surfaces as `Interrupted`
fn prompt_error(err: io::Error) -> ScaffoldError {
    if err.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::Cancelled
    } else {
        ScaffoldError::io("<terminal>", err)
    }
}

impl Prompter for TerminalPrompter {
    fn project_name(&mut self, default: &str) -> Result<String> {
        if self.yes {
            return Ok(default.to_string());
        }
        cliclack::input("Project name")
            .placeholder(default)
            .default_input(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm_overwrite(&mut self, target_dir: &str) -> Result<bool> {
        let location = if target_dir == "." {
            "Current directory".to_string()
        } else {
            format!("Target directory \"{}\"", target_dir)
        };
        cliclack::confirm(format!(
            "{} is not empty. Remove existing files and continue?",
            location
        ))
        .initial_value(false)
        .interact()
        .map_err(prompt_error)
    }

    fn package_name(&mut self, initial: &str) -> Result<String> {
        if self.yes {
            return Ok(initial.to_string());
        }
        cliclack::input("Package name")
            .default_input(initial)
            .validate(|name: &String| {
                if naming::is_valid_name(name) {
                    Ok(())
                } else {
                    Err("Invalid package.json name")
                }
            })
            .interact()
            .map_err(prompt_error)
    }

    fn language(&mut self) -> Result<Language> {
        if self.yes {
            return Ok(Language::JavaScript);
        }
        let mut select = cliclack::select("Select a language");
        for language in Language::ALL {
            select = select.item(language, language.display_name(), language.suffix());
        }
        select.interact().map_err(prompt_error)
    }

    fn features(&mut self) -> Result<Vec<Feature>> {
        if self.yes {
            return Ok(Feature::ALL.to_vec());
        }
        let mut multi = cliclack::multiselect("Select packages");
        for feature in Feature::ALL {
            multi = multi.item(feature, feature.id(), feature.description());
        }
        multi.required(true).interact().map_err(prompt_error)
    }

    fn on_state(&mut self, state: RunState) {
        match state {
            RunState::Reconciling => {
                let spinner = cliclack::spinner();
                spinner.start("Creating project...");
                self.spinner = Some(spinner);
            }
            RunState::Finalizing => self.stop_spinner("Project files written", false),
            RunState::Failed => self.stop_spinner("Failed to create project", true),
            _ => {}
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> anyhow::Result<RunOutcome> {
    cliclack::intro(config.display_name())?;

    let presets = args.presets()?;

    let mut options = ScaffoldOptions::from_env(config, args.template_dir.clone());
    options.init_git = !args.no_git;
    if args.template_dir.is_some() {
        cliclack::log::info(format!(
            "Using local templates from {}",
            options.templates.root().display()
        ))?;
    }

    let mut prompter = TerminalPrompter::new(args.yes);
    let mut scaffolder = Scaffolder::new(config.clone(), options);
    let outcome = scaffolder.run(&mut prompter, presets).await?;

    match &outcome {
        RunOutcome::Done(report) => print_summary(report)?,
        RunOutcome::Cancelled => cliclack::outro_cancel("Operation cancelled")?,
    }

    Ok(outcome)
}

fn print_summary(report: &ScaffoldReport) -> anyhow::Result<()> {
    cliclack::log::success(format!(
        "Created {} files in {} from {}",
        report.files_written,
        report.root.display(),
        report.template
    ))?;

    if report.vcs.is_none() {
        cliclack::log::warning("Could not initialize a git repository")?;
    }

    println!();
    println!("  {}", "Done. Now run:".bold());
    println!();

    for (i, step) in report.next_steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    println!();
    cliclack::outro("Happy hacking!")?;

    Ok(())
}
