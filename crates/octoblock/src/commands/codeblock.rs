//! `octoblock codeblock` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use octoblock_config::Config;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the codeblock command.
#[derive(Args)]
pub(crate) struct CodeblockArgs {
    /// Directive parameters: `[title] [url] [link text] [lang:type]`.
    params: Vec<String>,

    /// File to read the body from (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl CodeblockArgs {
    /// Execute the codeblock command.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or the output written.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        let body = match &self.input {
            Some(path) => read_body(path)?,
            None => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            }
        };

        let html = renderer_from_config(config).render(&self.params.join(" "), &body);
        output.markup(&html)?;
        Ok(())
    }
}

fn read_body(path: &Path) -> Result<String, CliError> {
    tracing::info!(path = %path.display(), "Reading codeblock body");
    Ok(std::fs::read_to_string(path)?)
}
