//! Error types for prompt-sources

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("template not found: {name}")]
    NotFound { name: String },

    #[error("failed to read template at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source '{label}' failed: {message}")]
    Source { label: String, message: String },
}

impl Error {
    /// Build a failure for a custom source implementation.
    pub fn source(label: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Source {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Whether this is the terminal exhaustion error rather than a hard
    /// source failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
