//! Error types for gist rendering.

use octoblock_codeblock::DirectiveError;

use crate::reference::ReferenceError;

/// Error turning a gist reference into rendered markup.
#[derive(Debug, thiserror::Error)]
pub enum GistError {
    /// Reference text is not `[owner/]id [filename]`.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The gist host answered with an error status.
    #[error("{reason}")]
    Remote {
        /// Explanation including the response.
        reason: String,
        /// Raw URL that was requested.
        attempted_url: String,
    },

    /// The request failed below the HTTP layer.
    #[error("failed to download gist")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The downloaded gist cannot be expressed as a codeblock.
    #[error("failed to build codeblock for gist")]
    Directive(#[from] DirectiveError),
}
