//! octoblock CLI - codeblock and gist rendering.
//!
//! Provides commands for:
//! - `codeblock`: Render a code block body read from a file or stdin
//! - `gist`: Download a gist and render it as a code block

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use octoblock_config::{CliSettings, Config};
use tracing_subscriber::EnvFilter;

use commands::{CodeblockArgs, GistArgs};
use error::CliError;
use output::Output;

/// octoblock - render codeblocks and gists as HTML figures.
#[derive(Parser)]
#[command(name = "octoblock", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover octoblock.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (show fetch and fallback logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable syntax highlighting.
    #[arg(long, global = true)]
    no_highlight: bool,

    /// Gist host base URL (overrides config).
    #[arg(long, global = true, env = "OCTOBLOCK_GIST_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a code block.
    Codeblock(CodeblockArgs),
    /// Render a gist as a code block.
    Gist(GistArgs),
}

impl Cli {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            highlight: self.no_highlight.then_some(false),
        }
    }

    fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        match self.command {
            Commands::Codeblock(args) => args.execute(&config, output),
            Commands::Gist(args) => args.execute(&config, output),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
