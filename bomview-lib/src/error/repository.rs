//! Repository errors

use super::ResolveError;
use crate::model::ProductId;

/// Errors from loading or editing composition data.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The snapshot could not be parsed.
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record references a product that does not exist.
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),

    /// An edit references a document missing from the catalog.
    #[error("Unknown document '{0}'")]
    UnknownDocument(String),

    /// The column cannot be edited through this repository.
    #[error("Column '{header}' is read-only")]
    ReadOnly { header: String },

    /// The column specification of an edit is invalid.
    #[error(transparent)]
    Spec(#[from] ResolveError),
}

impl RepositoryError {
    /// Creates a new read-only error for a column.
    pub fn read_only(header: impl Into<String>) -> Self {
        Self::ReadOnly {
            header: header.into(),
        }
    }
}
