//! Gist download and outcome classification.

use crate::client::{HttpClient, UreqClient};
use crate::consts::DEFAULT_BASE_URL;
use crate::reference::GistReference;

/// Result of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The gist host returned the file contents.
    Success {
        /// Raw file contents.
        body: String,
    },
    /// The gist host answered with a 4xx or 5xx status.
    Failure {
        /// Human-readable explanation including the response.
        reason: String,
        /// Raw URL that was requested.
        attempted_url: String,
    },
}

/// Resolves [`GistReference`]s against a gist host.
///
/// Holds no mutable state; a single resolver can serve concurrent callers
/// when its client can.
///
/// # Example
///
/// ```no_run
/// use octoblock_gist::{FetchOutcome, GistReference, GistResolver, UreqClient};
///
/// let resolver = GistResolver::new(UreqClient::default());
/// let reference: GistReference = "jbrains/4111662 TestingIoFailure.java".parse().unwrap();
/// match resolver.resolve(&reference).unwrap() {
///     FetchOutcome::Success { body } => println!("{body}"),
///     FetchOutcome::Failure { reason, .. } => eprintln!("{reason}"),
/// }
/// ```
pub struct GistResolver<C = UreqClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> GistResolver<C> {
    /// Create a resolver for `https://gist.github.com`.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Use a different gist host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the raw file is fetched from.
    #[must_use]
    pub fn raw_url(&self, reference: &GistReference) -> String {
        reference.raw_url(&self.base_url)
    }

    /// Gist page URL shown to readers and in error messages.
    #[must_use]
    pub fn pretty_url(&self, reference: &GistReference) -> String {
        reference.pretty_url(&self.base_url)
    }

    /// Download the referenced gist file.
    ///
    /// HTTP error statuses (400-599) are returned as [`FetchOutcome::Failure`].
    /// Transport errors from the client are returned unchanged.
    ///
    /// When several files exist and no filename is given, the host decides
    /// which one is served.
    pub fn resolve(&self, reference: &GistReference) -> Result<FetchOutcome, C::Error> {
        let raw_url = self.raw_url(reference);
        tracing::debug!(url = %raw_url, %reference, "Fetching gist");

        let response = self.client.get(&raw_url)?;

        if response.is_error() {
            let pretty_url = self.pretty_url(reference);
            tracing::debug!(url = %raw_url, status = response.status, "Gist download failed");
            return Ok(FetchOutcome::Failure {
                reason: format!("I failed to download the gist at {pretty_url}\n{response:?}"),
                attempted_url: raw_url,
            });
        }

        Ok(FetchOutcome::Success {
            body: response.body,
        })
    }
}
