//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Merge rewritten-article JSON records into a bounded RSS 2.0 feed.
///
/// The feed file is rewritten whole on every run and no lock is taken:
/// runs against the same output file must not overlap.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: json2rss.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "json2rss.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default json2rss.toml
    #[command(visible_alias = "i")]
    Init {
        /// Directory to create the config in (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        /// Print the config template to stdout instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Build or update the feed from the input directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Build arguments. Each one overrides the matching config key.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Input directory with rewritten JSON records (relative to config dir)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Output feed file (relative to config dir)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Maximum number of items kept in the feed
    #[arg(short = 'n', long)]
    pub max_items: Option<usize>,

    /// Incoming records older than this many days are not added
    #[arg(short = 'a', long)]
    pub max_age_days: Option<u32>,

    /// Skip records with a malformed processed_at instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
