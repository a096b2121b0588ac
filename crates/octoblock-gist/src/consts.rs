//! Internal constants for gist fetching.

use std::time::Duration;

/// Gist host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://gist.github.com";

/// Default HTTP timeout for gist downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Redirects followed per download. The owner-less `/raw/{id}` form
/// redirects once to the owner-qualified path.
pub const REDIRECT_LIMIT: u32 = 1;
