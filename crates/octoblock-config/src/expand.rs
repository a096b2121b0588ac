//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Variable referenced by a configuration value but missing from the environment.
struct UnsetVar(String);

/// Expand environment variable references in `value`.
///
/// A value without `${` is returned untouched, so literal dollar signs in
/// URLs survive. Once a value contains `${`, the whole value is expanded
/// and a bare `$VAR` in it is expanded too (and must be set).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.0),
    })
}
