//! Environment references in string settings.
//!
//! `$VAR`, `${VAR}` and `${VAR:-default}` are recognized. The LaTeX preamble is
//! never expanded, since `$` is math mode there.

use std::env::VarError;

use crate::ConfigError;

/// Expand environment references in `value`, replacing it in place.
///
/// An unset variable without a default is an error naming the setting.
pub(crate) fn expand_field(field: &str, value: &mut String) -> Result<(), ConfigError> {
    let expanded = shellexpand::env_with_context(value.as_str(), lookup)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("{} is not set", e.var_name),
                VarError::NotUnicode(_) => format!("{} is not valid UTF-8", e.var_name),
            },
        })?
        .into_owned();
    *value = expanded;
    Ok(())
}

/// [`expand_field`] for settings that may be absent.
pub(crate) fn expand_optional(field: &str, value: Option<&mut String>) -> Result<(), ConfigError> {
    value.map_or(Ok(()), |value| expand_field(field, value))
}

fn lookup(name: &str) -> Result<Option<String>, VarError> {
    std::env::var(name).map(Some)
}
