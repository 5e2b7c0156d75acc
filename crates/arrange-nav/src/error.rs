//! Navigation errors and advisory warnings.

use arrange_meta::MetaError;
use arrange_storage::StorageError;

/// Error that aborts a navigation build.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A metadata file or the host nav config is malformed.
    #[error(transparent)]
    Meta(#[from] MetaError),

    /// A nav entry names nothing, under the strict policy.
    #[error("Nav entry \"{entry}\" not found. [{context}]")]
    NavEntryNotFound { entry: String, context: String },

    /// A page or metadata file could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Non-fatal condition reported during a build.
///
/// Warnings are collected on the build result and also logged with
/// `tracing::warn!` at the point they occur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavWarning {
    /// A nav entry names nothing, under the lenient policy.
    #[error("Nav entry \"{entry}\" not found. [{context}]")]
    NavEntryNotFound { entry: String, context: String },

    #[error("Using the \"title\" attribute in the {filename} file of the doc root has no effect")]
    TitleInRoot { filename: String },

    #[error("Using the \"hide\" attribute in the {filename} file of the doc root has no effect")]
    HideInRoot { filename: String },

    /// A nav-handling plugin runs before this engine and will see the
    /// unarranged navigation.
    #[error(
        "The \"{plugin}\" plugin handles navigation and is listed before \"arrange\"; list it after so it sees the arranged navigation"
    )]
    PluginOrder { plugin: String },
}

/// Collects warnings and logs each one as it is pushed.
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<NavWarning>);

impl Warnings {
    pub fn push(&mut self, warning: NavWarning) {
        tracing::warn!("{warning}");
        self.0.push(warning);
    }

    pub fn into_vec(self) -> Vec<NavWarning> {
        self.0
    }
}
