//! CLI error types.

use duo_ast::AstError;
use duo_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Document(#[from] AstError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
