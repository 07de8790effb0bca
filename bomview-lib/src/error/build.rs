//! Tree build diagnostics

use crate::model::NodeId;
use crate::model::ProductId;

/// The depth limit was reached while the branch still had children.
///
/// This is a heuristic: a genuinely acyclic chain deeper than the limit is
/// reported the same way as a composition that references its own ancestor.
/// The node named here exists in the built tree; its children do not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Recursive composition suspected at {name} {deno} (depth {depth})")]
pub struct CycleSuspected {
    /// The over-limit node in the built tree.
    pub node: NodeId,
    /// The product behind the over-limit node.
    pub product: ProductId,
    /// Product name.
    pub name: String,
    /// Product designation.
    pub deno: String,
    /// Depth of the over-limit node.
    pub depth: usize,
}

/// Errors that prevent a build from starting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The root product is not known to the repository.
    #[error("Root product {0} not found")]
    UnknownRoot(ProductId),
}
