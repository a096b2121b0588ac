//! CLI command implementations.

pub(crate) mod codeblock;
pub(crate) mod gist;

pub(crate) use codeblock::CodeblockArgs;
pub(crate) use gist::GistArgs;

use octoblock_codeblock::{CodeBlockRenderer, Decorations, SyntectHighlighter};
use octoblock_config::Config;

/// Build the renderer described by the `[render]` section.
fn renderer_from_config(config: &Config) -> CodeBlockRenderer<SyntectHighlighter> {
    CodeBlockRenderer::new(SyntectHighlighter)
        .with_decorations(Decorations {
            prefix: config.render.prefix.clone(),
            suffix: config.render.suffix.clone(),
        })
        .with_highlighting(config.render.highlight)
}
