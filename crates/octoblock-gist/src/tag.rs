//! The `gist` tag: download a gist and render it as a codeblock.
//!
//! Rendering never fails outward. Errors are logged and replaced by an
//! HTML comment carrying the message, its causes and, when backtraces are
//! enabled (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`), the stack at the
//! point rendering failed.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

use octoblock_codeblock::{
    CodeBlockDirective, CodeBlockRenderer, DirectiveError, Highlighter, SyntectHighlighter,
};

use crate::client::{HttpClient, UreqClient};
use crate::error::GistError;
use crate::reference::GistReference;
use crate::resolver::{FetchOutcome, GistResolver};

/// A downloaded gist file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GistFile {
    /// File contents.
    pub code: String,
    /// Gist page URL (not the raw URL).
    pub gist_url: String,
    /// File name, when the reference named one.
    pub filename: Option<String>,
}

impl GistFile {
    /// Express the file as a `codeblock` directive captioned with its
    /// name and linked to its gist page.
    pub fn to_directive(&self) -> Result<CodeBlockDirective, DirectiveError> {
        let params = match &self.filename {
            Some(filename) => format!("{filename} {}", self.gist_url),
            None => self.gist_url.clone(),
        };
        CodeBlockDirective::new(params, self.code.as_str())
    }
}

/// Downloads gists and renders them through a [`CodeBlockRenderer`].
pub struct GistTag<C = UreqClient, H = SyntectHighlighter> {
    resolver: GistResolver<C>,
    renderer: CodeBlockRenderer<H>,
}

impl<C: HttpClient, H: Highlighter> GistTag<C, H> {
    #[must_use]
    pub fn new(resolver: GistResolver<C>, renderer: CodeBlockRenderer<H>) -> Self {
        Self { resolver, renderer }
    }

    /// Download the referenced file.
    pub fn download(&self, reference: &GistReference) -> Result<GistFile, GistError> {
        let outcome = self
            .resolver
            .resolve(reference)
            .map_err(|err| GistError::Transport(Box::new(err)))?;

        match outcome {
            FetchOutcome::Success { body } => Ok(GistFile {
                code: body,
                gist_url: self.resolver.pretty_url(reference),
                filename: reference.filename().map(str::to_owned),
            }),
            FetchOutcome::Failure {
                reason,
                attempted_url,
            } => Err(GistError::Remote {
                reason,
                attempted_url,
            }),
        }
    }

    /// Parse `reference`, download the gist and render it.
    pub fn try_render(&self, reference: &str) -> Result<String, GistError> {
        let reference: GistReference = reference.parse()?;
        let file = self.download(&reference)?;
        let source = file.to_directive()?.to_source();

        tracing::debug!(%reference, "Rendering gist as codeblock");
        let directive = CodeBlockDirective::parse(&source)?;
        Ok(directive.render(&self.renderer))
    }

    /// Render `reference`, replacing any failure with an HTML comment.
    #[must_use]
    pub fn render(&self, reference: &str) -> String {
        self.try_render(reference).unwrap_or_else(|err| {
            tracing::error!(reference, error = %err, "Failed to render gist");
            let backtrace = Backtrace::capture();
            let captured = backtrace.status() == BacktraceStatus::Captured;
            error_comment(&err, captured.then_some(&backtrace))
        })
    }
}

/// HTML comment with the error message and each cause on its own line,
/// followed by the backtrace if one was captured.
fn error_comment(err: &GistError, backtrace: Option<&Backtrace>) -> String {
    let mut lines = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(cause.to_string());
        source = cause.source();
    }
    if let Some(backtrace) = backtrace {
        lines.push(backtrace.to_string());
    }

    // Response bodies must not close the comment early.
    let text = lines.join("\n").replace("-->", "--&gt;");
    format!("<!--\n{text}\n-->\n")
}
