//! Command line errors

use std::path::PathBuf;

use bomview_lib::error::ModelError;
use bomview_lib::error::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid column spec: {0}")]
    Column(#[source] serde_json::Error),

    #[error("Expected HEADER=TEXT or PATH=COLOR, got '{0}'")]
    Pair(String),

    #[error("Unknown colour '{0}'")]
    Color(String),

    #[error("No row at index path '{0}'")]
    UnknownRow(String),

    #[error("Product '{0}' not found")]
    UnknownRoot(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Output failed: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
