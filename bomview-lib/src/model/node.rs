//! Tree nodes

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Link;
use super::ProductId;
use super::ProductRef;
use super::RowColor;

/// Position of a node in the arena of one build.
///
/// Ids are only meaningful for the build that produced them; use
/// [`NodeKey`] to follow a node across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Identity of a node that survives rebuilds.
///
/// Derived from the parent's key, the position among siblings and the
/// designation, so a node keeps its key as long as the path leading to it
/// has the same shape and the same products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub(crate) fn root(deno: &str) -> Self {
        Self(deno.to_string())
    }

    pub(crate) fn child(&self, position: usize, deno: &str) -> Self {
        Self(format!("{}/{}:{}", self.0, position, deno))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the composition tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) key: NodeKey,
    pub(crate) name: String,
    pub(crate) deno: String,
    pub(crate) product: ProductRef,
    pub(crate) link: Link,
    pub(crate) depth: usize,
    pub(crate) index_path: String,
    pub(crate) expanded: bool,
    pub(crate) color: Option<RowColor>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in build order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deno(&self) -> &str {
        &self.deno
    }

    pub fn product(&self) -> &ProductRef {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id()
    }

    /// Relationship attributes from the parent edge.
    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn child_type(&self) -> Option<&str> {
        self.link.child_type.as_deref()
    }

    pub fn quantity(&self) -> Option<Decimal> {
        self.link.quantity
    }

    pub fn unit(&self) -> Option<&str> {
        self.link.unit.as_deref()
    }

    /// Depth in the tree, 0 for the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Dotted sibling path, e.g. `"1.2."`; empty for the root.
    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn color(&self) -> Option<RowColor> {
        self.color
    }
}
