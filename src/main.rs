//! json2rss - merge rewritten-article JSON records into an RSS 2.0 feed.

mod cli;
mod config;
mod feed;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::GeneratorConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Init { dir, dry } => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            cli::init::new_config(&dir, &cli.config, *dry)
        }
        Commands::Build { build_args } => {
            let config = GeneratorConfig::load(&cli.config, build_args)?;
            feed::build_feed(&config).map(|_| ())
        }
    }
}
