mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod manifest;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cmd::detect::{self, DetectCommandArgs};
use crate::cmd::validate::{self, ValidateCommandArgs};
use crate::config::{AppConfig, DEFAULT_REMOTE};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::actions::ActionsEnvironment;
use crate::infra::fs::LocalFileSystem;
use crate::infra::git::GitCli;
use crate::services::FetchDepth;

#[derive(Parser)]
#[command(
    name = "diff-rules",
    author,
    version,
    about = "Decide whether declared path rules saw changes against a base branch"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the base branch, evaluate the manifest rules and export DIFF_DETECTED.
    Detect(DetectArgs),
    /// Parse the rules manifest and print its rules without running git.
    Validate(ValidateArgs),
}

#[derive(Args)]
struct ManifestArgs {
    /// Rules manifest, relative to the workspace root.
    #[arg(short, long, env = "INPUT_CONFIG_FILE")]
    config_file: PathBuf,

    /// Repository root; defaults to PWD.
    #[arg(short, long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,
}

#[derive(Args)]
struct DetectArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Branch the working tree is compared against.
    #[arg(short, long, env = "INPUT_BASE_REF")]
    base_ref: String,

    /// Remote that hosts the base branch.
    #[arg(long, env = "INPUT_REMOTE", default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Commits of base branch history to fetch; 0 fetches everything.
    #[arg(long, env = "INPUT_FETCH_DEPTH", default_value_t = FetchDepth::DEFAULT)]
    fetch_depth: u32,

    /// Use the remote ref already present locally instead of fetching it.
    #[arg(long)]
    skip_fetch: bool,

    /// Exit with status 2 when no rule matched.
    #[arg(long)]
    exit_code: bool,
}

#[derive(Args)]
struct ValidateArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Print the parsed rules as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("Action failed with error {err}");
            println!("{}", ActionsEnvironment::error_annotation(&err.to_string()));
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(args).await,
        Commands::Validate(args) => {
            let root = config::workspace_root(args.manifest.workspace)?;
            let path = config::manifest_path(&root, &args.manifest.config_file)?;
            validate::run(&path, ValidateCommandArgs { json: args.json })?;
            Ok(0)
        }
    }
}

async fn run_detect(args: DetectArgs) -> AppResult<i32> {
    let root = config::workspace_root(args.manifest.workspace)?;
    let config = AppConfig::new(root, &args.manifest.config_file, &args.base_ref)?
        .with_remote(&args.remote)
        .with_fetch_depth(FetchDepth::from_commits(args.fetch_depth))
        .with_skip_fetch(args.skip_fetch);

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let filesystem = Arc::new(LocalFileSystem::new());
    let context = AppContext::new(config, git, filesystem);

    detect::run(
        &context,
        &ActionsEnvironment::from_env(),
        DetectCommandArgs {
            exit_code: args.exit_code,
        },
    )
    .await
}
