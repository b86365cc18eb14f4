use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "formstate",
    about = "Decide whether a form field changed and print the patch",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two field snapshots and print the resulting patch
    Filter(FilterArgs),
    /// List the standard field attributes
    Attributes,
}

#[derive(Args)]
pub struct FilterArgs {
    /// JSON file holding the new snapshot
    #[arg(long = "new")]
    pub new: PathBuf,
    /// JSON file holding the old snapshot
    #[arg(long = "old")]
    pub old: PathBuf,
    /// Attributes to track, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub select: Vec<String>,
    /// Track every standard attribute
    #[arg(long)]
    pub all: bool,
    /// Report every tracked attribute even if unchanged
    #[arg(long)]
    pub force: bool,
    /// TOML file with filter settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fail if the snapshots have different names
    #[arg(long)]
    pub strict_names: bool,
}
