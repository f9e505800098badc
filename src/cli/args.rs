//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, directory::DirectoryCommands, new::NewArgs,
    summary::SummaryArgs,
};

#[derive(Parser)]
#[command(name = "onboard")]
#[command(author, version, about = "Employee onboarding wizard")]
#[command(long_about = "Walks a new employee through five validated onboarding steps and hands the result to a summary view as a link.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the onboarding wizard and print the summary link
    New(NewArgs),

    /// Show the submission carried by a summary link
    Summary(SummaryArgs),

    /// Re-validate every step of the submission in a summary link
    Check(CheckArgs),

    /// List reference data (managers, skills, relationships)
    #[command(subcommand)]
    Directory(DirectoryCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled terminal output
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Markdown
    Md,
}
