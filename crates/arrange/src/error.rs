//! CLI error types.

use arrange_config::ConfigError;
use arrange_meta::MetaError;
use arrange_nav::NavError;
use arrange_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Meta(#[from] MetaError),

    #[error("{0}")]
    Nav(#[from] NavError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
