//! rtti - API schema dump
//!
//! CLI driver that reflects the sample API catalog and prints the
//! resulting structures.

mod catalog;
mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Reflect API types into their schema
#[derive(Parser, Debug)]
#[command(name = "rtti")]
#[command(author, version, about = "Reflect API types and print their schema")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Build configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable a build feature in addition to the config file (repeatable)
    #[arg(long = "feature", global = true)]
    features: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every structure reached from the catalog roots
    Dump(commands::dump::DumpArgs),

    /// Print one structure by fully-qualified name
    Lookup(commands::lookup::LookupArgs),

    /// List the catalog roots
    List(commands::list::ListArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins when set.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut flags = config::load(cli.config.as_deref())?;
    for feature in cli.features {
        flags.enable(feature);
    }

    match cli.command {
        Commands::Dump(args) => commands::dump::run(args, cli.format, flags),
        Commands::Lookup(args) => commands::lookup::run(args, cli.format, flags),
        Commands::List(args) => commands::list::run(args, cli.format),
    }
}
