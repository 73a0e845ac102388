//! Dataset loading error types.

use std::path::PathBuf;

/// Errors that prevent the cinema dataset from loading at all.
///
/// Individual rows with bad coordinates never produce an error; they are
/// dropped and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// File missing or unreadable
    #[error("failed to open dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a readable delimited table
    #[error("failed to read dataset {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header row lacks one or more required columns
    #[error("dataset {} is missing required columns: {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// The background load task panicked or was cancelled
    #[error("loading dataset {} was interrupted: {source}", path.display())]
    Interrupted {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },
}
