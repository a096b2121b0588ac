//! HTTP transport for gist downloads.

use std::time::Duration;

use ureq::Agent;

use crate::consts::REDIRECT_LIMIT;

/// Status and body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is a client or server error (400-599).
    #[must_use]
    pub fn is_error(&self) -> bool {
        (400..=599).contains(&self.status)
    }
}

/// Performs HTTP GET requests.
///
/// Implementations follow at most one redirect. A response to a second
/// redirect is returned as-is instead of being followed.
pub trait HttpClient {
    /// Transport failure below the HTTP layer (connection, timeout, I/O).
    type Error: std::error::Error + Send + Sync + 'static;

    /// GET `url` and return the final response.
    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error>;
}

/// [`HttpClient`] backed by a pooled `ureq` agent.
#[derive(Clone)]
pub struct UreqClient {
    agent: Agent,
}

impl UreqClient {
    /// Create a client with the given global request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .max_redirects(REDIRECT_LIMIT)
            .max_redirects_will_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_TIMEOUT)
    }
}

impl HttpClient for UreqClient {
    type Error = ureq::Error;

    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
        let response = self.agent.get(url).call()?;
        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;

        Ok(HttpResponse { status, body })
    }
}
