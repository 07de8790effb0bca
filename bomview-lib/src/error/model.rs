//! Tree model errors

use super::BuildError;
use super::CycleSuspected;
use super::RepositoryError;
use crate::RebuildState;
use crate::model::NodeId;
use crate::model::ProductId;

/// Errors surfaced by [`TreeModel`](crate::TreeModel).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A rebuild was requested while another one had not finished.
    #[error("Rebuild requested while in state {0:?}")]
    RebuildInProgress(RebuildState),

    /// The build stopped at the depth limit; the partial tree is installed.
    #[error(transparent)]
    CycleSuspected(#[from] CycleSuspected),

    /// The build could not start.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// No column has this header.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// The node does not exist in the current tree.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The product is not known to the repository.
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),

    /// The repository rejected an edit.
    #[error("Edit failed: {0}")]
    Edit(#[from] RepositoryError),
}

impl ModelError {
    /// Returns the cycle diagnostic if this error carries one.
    pub fn cycle(&self) -> Option<&CycleSuspected> {
        match self {
            Self::CycleSuspected(cycle) => Some(cycle),
            _ => None,
        }
    }
}
