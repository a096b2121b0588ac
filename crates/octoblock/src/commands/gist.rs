//! `octoblock gist` command implementation.

use clap::Args;
use octoblock_config::Config;
use octoblock_gist::{GistResolver, GistTag, UreqClient};

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the gist command.
#[derive(Args)]
pub(crate) struct GistArgs {
    /// Gist reference: `[owner/]id [filename]`.
    #[arg(required = true, num_args = 1..=2)]
    reference: Vec<String>,

    /// Fail instead of printing an HTML comment when the gist cannot be rendered.
    #[arg(long)]
    strict: bool,
}

impl GistArgs {
    /// Execute the gist command.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written, or in strict mode if
    /// the gist cannot be rendered.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        let resolver = GistResolver::new(UreqClient::new(config.gist.timeout()))
            .with_base_url(config.gist.base_url.as_str());
        let tag = GistTag::new(resolver, renderer_from_config(config));

        let reference = self.reference.join(" ");
        let html = if self.strict {
            tag.try_render(&reference)?
        } else {
            tag.render(&reference)
        };

        output.markup(&html)?;
        Ok(())
    }
}
