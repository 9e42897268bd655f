//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}`, `${VAR:-default}`, `$VAR` and a leading `~` in a config value.
///
/// `field` is the config path reported on error (e.g. `quarto.renderer_path`).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set ({})", e.var_name, e.cause),
        })
}
