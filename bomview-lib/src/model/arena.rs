//! Arena holding the nodes of one build

use std::collections::HashMap;

use super::Link;
use super::Node;
use super::NodeId;
use super::NodeKey;
use super::ProductRef;

/// Owned node storage for one build.
///
/// Parent and child links are arena indices, so the tree has no shared
/// ownership between nodes. Nodes are stored in creation order, which is the
/// depth-first, sibling-order traversal of the tree.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    by_path: HashMap<String, NodeId>,
    by_key: HashMap<NodeKey, NodeId>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the root node. Any previous content is discarded.
    pub(crate) fn push_root(&mut self, product: ProductRef) -> NodeId {
        self.nodes.clear();
        self.by_path.clear();
        self.by_key.clear();

        let (name, deno) = product.with(|p| (p.name.clone(), p.deno.clone()));
        let id = NodeId(0);
        let node = Node {
            id,
            parent: None,
            children: Vec::new(),
            key: NodeKey::root(&deno),
            name,
            deno,
            product,
            link: Link::default(),
            depth: 0,
            index_path: String::new(),
            expanded: false,
            color: None,
        };
        self.insert(node);
        id
    }

    /// Appends a child after the existing children of `parent`.
    ///
    /// Returns `None` if `parent` is not in the arena.
    pub(crate) fn push_child(&mut self, parent: NodeId, product: ProductRef, link: Link) -> Option<NodeId> {
        let parent_node = self.nodes.get(parent.0)?;
        let position = parent_node.children.len() + 1;
        let (name, deno) = product.with(|p| (p.name.clone(), p.deno.clone()));
        let id = NodeId(self.nodes.len());
        let node = Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            key: parent_node.key.child(position, &deno),
            name,
            deno,
            product,
            link,
            depth: parent_node.depth + 1,
            index_path: format!("{}{}.", parent_node.index_path, position),
            expanded: false,
            color: None,
        };
        self.insert(node);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    fn insert(&mut self, node: Node) {
        self.by_path.insert(node.index_path.clone(), node.id);
        self.by_key.insert(node.key.clone(), node.id);
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Looks up a node by its dotted index path (`""` is the root).
    pub fn find_by_path(&self, path: &str) -> Option<&Node> {
        self.by_path.get(path).and_then(|id| self.get(*id))
    }

    /// Looks up a node by its rebuild-stable key.
    pub fn find_by_key(&self, key: &NodeKey) -> Option<&Node> {
        self.by_key.get(key).and_then(|id| self.get(*id))
    }

    /// Iterates nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Iterates nodes depth-first, children in build order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            arena: self,
            stack: self.root().map(|root| vec![root.id]).unwrap_or_default(),
        }
    }
}

/// Pre-order traversal over a [`NodeArena`].
#[derive(Debug)]
pub struct DepthFirst<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.arena.get(id)?;
        self.stack.extend(node.children.iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn product(id: u64, deno: &str) -> ProductRef {
        ProductRef::new(Product::new(id, format!("P{id}"), deno))
    }

    #[test]
    fn test_paths_and_depths() {
        let mut arena = NodeArena::new();
        let root = arena.push_root(product(1, "ROOT"));
        let a = arena.push_child(root, product(2, "A"), Link::default()).unwrap();
        let b = arena.push_child(root, product(3, "B"), Link::default()).unwrap();
        let c = arena.push_child(a, product(4, "C"), Link::default()).unwrap();

        assert_eq!(arena.get(root).unwrap().index_path(), "");
        assert_eq!(arena.get(a).unwrap().index_path(), "1.");
        assert_eq!(arena.get(b).unwrap().index_path(), "2.");
        assert_eq!(arena.get(c).unwrap().index_path(), "1.1.");
        assert_eq!(arena.get(c).unwrap().depth(), 2);
        assert_eq!(arena.find_by_path("2.").unwrap().deno(), "B");
    }

    #[test]
    fn test_depth_first_order() {
        let mut arena = NodeArena::new();
        let root = arena.push_root(product(1, "ROOT"));
        let a = arena.push_child(root, product(2, "A"), Link::default()).unwrap();
        arena.push_child(root, product(3, "B"), Link::default()).unwrap();
        arena.push_child(a, product(4, "C"), Link::default()).unwrap();

        let order: Vec<&str> = arena.depth_first().map(|n| n.deno()).collect();
        assert_eq!(order, vec!["ROOT", "A", "C", "B"]);
    }

    #[test]
    fn test_keys_include_position_and_deno() {
        let mut arena = NodeArena::new();
        let root = arena.push_root(product(1, "ROOT"));
        let a = arena.push_child(root, product(2, "A"), Link::default()).unwrap();
        let again = arena.push_child(root, product(2, "A"), Link::default()).unwrap();

        assert_ne!(arena.get(a).unwrap().key(), arena.get(again).unwrap().key());
        assert_eq!(arena.get(a).unwrap().key().as_str(), "ROOT/1:A");
    }

    #[test]
    fn test_push_child_unknown_parent() {
        let mut arena = NodeArena::new();
        assert!(arena.push_child(NodeId(5), product(1, "X"), Link::default()).is_none());
    }
}
