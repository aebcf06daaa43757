//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Puro - scaffold new projects from templates
#[derive(Parser, Debug)]
#[command(name = "puro")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    CreateProject(CreateProjectArgs),
}

// Create project command
#[derive(Args, Debug)]
pub struct CreateProjectArgs {
    /// Existing directory to scaffold the project into
    pub target_dir: Utf8PathBuf,

    /// Template repository (owner/repo), defaults to the built-in skeleton
    #[arg(short, long)]
    pub template: Option<String>,

    /// Do not run the package manager after extraction
    #[arg(long)]
    pub skip_install: bool,

    /// Fail when the package manager exits with a non-zero status
    #[arg(long)]
    pub strict_install: bool,

    /// Remove the downloaded archive after extraction
    #[arg(long)]
    pub clean: bool,

    /// Package manager executable used to install dependencies
    #[arg(long)]
    pub package_manager: Option<String>,
}
