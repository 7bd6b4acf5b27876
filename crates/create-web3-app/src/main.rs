//! create-web3-app - Project scaffolding for hardhat + react web3 apps

use anyhow::Result;
use clap::{Command, CommandFactory, FromArgMatches, Parser};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{ProductConfig, RunOutcome, ScaffoldError, TemplateSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Templates in the source checkout, used when nothing was installed
const SOURCE_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Web3 app product configuration
#[derive(Clone)]
pub struct Web3AppConfig;

impl ProductConfig for Web3AppConfig {
    fn name(&self) -> &'static str {
        "create-web3-app"
    }

    fn display_name(&self) -> &'static str {
        "create-web3-app"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding hardhat + react web3 app projects"
    }

    fn default_project_dir(&self) -> &'static str {
        "web3-app-project"
    }

    fn toolchain_prefix(&self) -> &'static str {
        "hardhat-react"
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_WEB3_APP_TEMPLATES"
    }

    fn default_template_dir(&self) -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| TemplateSource::installed_root(&exe, self.name()))
            .unwrap_or_else(|| PathBuf::from(SOURCE_TEMPLATES))
    }
}

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub directory: Option<String>,

    /// Language to use (js, ts)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Packages to include (comma-separated: react,hardhat)
    #[arg(short, long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Package name for the generated package.json
    #[arg(long = "package-name")]
    pub package_name: Option<String>,

    /// Remove existing files in the target directory without asking
    #[arg(long)]
    pub overwrite: bool,

    /// Do not initialize a git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            language: args.language,
            features: args.features,
            package_name: args.package_name,
            overwrite: args.overwrite,
            no_git: args.no_git,
            yes: args.yes,
        }
    }
}

/// Log level: `--debug`, then `RUST_LOG`, then warnings only
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("create_web3_app=debug,scaffolder_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Clap command carrying the product's name and description
fn command<C: ProductConfig>(config: &C) -> Command {
    Args::command()
        .name(config.name())
        .about(config.cli_description())
}

fn parse_args<C: ProductConfig>(config: &C) -> Args {
    let matches = command(config).get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

async fn run<C: ProductConfig>(config: &C, args: Args) -> Result<RunOutcome> {
    scaffolder_core::run(config, args.into()).await
}

/// Cancellation that escaped as an error still exits cleanly
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ScaffoldError>()
        .is_some_and(ScaffoldError::is_cancelled)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = Web3AppConfig;
    let args = parse_args(&config);
    init_tracing(args.debug);
    tracing::debug!("starting with args: {:?}", args);

    let result = run(&config, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if is_cancelled(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
