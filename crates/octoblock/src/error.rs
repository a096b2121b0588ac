//! CLI error types.

use octoblock_config::ConfigError;
use octoblock_gist::GistError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Gist(#[from] GistError),
}
