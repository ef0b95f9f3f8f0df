//! Command-line interface for docgen
//!
//! Provides `generate` and `site` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{self, Config};

mod generate;
mod site;

/// Generate documentation for source files with a hosted chat-completion model
#[derive(Parser)]
#[command(name = "docgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (docgen.toml or docgen.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for a source file
    Generate(generate::GenerateArgs),

    /// Manage the companion Starlight docs site
    #[command(subcommand)]
    Site(site::SiteCommand),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise --verbose selects DEBUG over WARN.
    let default_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir()?;
    let config = resolve_config(&cwd, cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => generate::run(args, config),
        Commands::Site(command) => site::run(command, &config),
    }
}

/// File settings, then `.env` and process environment on top.
fn resolve_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    config::env::load_dotenv(root);
    let mut config = config::load_config(root, config_path)?;
    config::apply_env(&mut config);
    Ok(config)
}
