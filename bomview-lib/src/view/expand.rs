//! Expand/collapse state

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::NodeArena;
use crate::model::NodeId;
use crate::model::NodeKey;

/// Expand flags keyed by stable node key.
///
/// Captured from one tree and restored onto another; keys missing from the
/// map restore as collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandState(HashMap<NodeKey, bool>);

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the expand flag of every node.
    pub fn capture(arena: &NodeArena) -> Self {
        Self(arena.iter().map(|n| (n.key().clone(), n.is_expanded())).collect())
    }

    /// Applies the recorded flags. Returns the number of nodes found in the map.
    pub fn restore(&self, arena: &mut NodeArena) -> usize {
        let mut matched = 0;
        for node in arena.iter_mut() {
            let expanded = self.0.get(&node.key).copied();
            matched += usize::from(expanded.is_some());
            node.expanded = expanded.unwrap_or(false);
        }
        matched
    }

    pub fn get(&self, key: &NodeKey) -> Option<bool> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A visible row of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub node: NodeId,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// Expands nodes shallower than `level` and collapses the rest.
///
/// Level 0 collapses everything, level 1 opens the root.
pub fn expand_to_level(arena: &mut NodeArena, level: usize) {
    for node in arena.iter_mut() {
        node.expanded = node.depth < level;
    }
}

pub fn expand_all(arena: &mut NodeArena) {
    for node in arena.iter_mut() {
        node.expanded = true;
    }
}

pub fn collapse_all(arena: &mut NodeArena) {
    for node in arena.iter_mut() {
        node.expanded = false;
    }
}

/// Flattens the rows reachable through expanded ancestors, depth-first.
pub fn visible_rows(arena: &NodeArena) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    if let Some(root) = arena.root() {
        collect_visible(arena, root.id(), &mut rows);
    }
    rows
}

fn collect_visible(arena: &NodeArena, id: NodeId, rows: &mut Vec<FlatRow>) {
    let Some(node) = arena.get(id) else {
        return;
    };
    rows.push(FlatRow {
        node: id,
        depth: node.depth(),
        has_children: node.has_children(),
        is_expanded: node.is_expanded(),
    });
    if node.is_expanded() {
        for child in node.children() {
            collect_visible(arena, *child, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;
    use crate::model::Product;
    use crate::model::ProductRef;

    fn arena(denos: &[&str]) -> NodeArena {
        // Root with a chain of children below it.
        let mut arena = NodeArena::new();
        let mut parent = arena.push_root(ProductRef::new(Product::new(0u64, "Root", "ROOT")));
        for (i, deno) in denos.iter().enumerate() {
            let product = ProductRef::new(Product::new(i as u64 + 1, *deno, *deno));
            parent = arena.push_child(parent, product, Link::default()).unwrap();
        }
        arena
    }

    fn flags(arena: &NodeArena) -> Vec<bool> {
        arena.depth_first().map(|n| n.is_expanded()).collect()
    }

    #[test]
    fn test_expand_to_level() {
        let mut arena = arena(&["A", "B", "C"]);
        expand_to_level(&mut arena, 2);
        assert_eq!(flags(&arena), vec![true, true, false, false]);
        expand_to_level(&mut arena, 0);
        assert_eq!(flags(&arena), vec![false; 4]);
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let mut old = arena(&["A", "B", "C"]);
        expand_to_level(&mut old, 2);
        old.get_mut(NodeId(3)).unwrap().expanded = true;
        let state = ExpandState::capture(&old);

        let mut new = arena(&["A", "B", "C"]);
        assert_eq!(state.restore(&mut new), 4);
        assert_eq!(flags(&new), flags(&old));
    }

    #[test]
    fn test_restore_missing_keys_collapse() {
        let mut old = arena(&["A"]);
        expand_all(&mut old);
        let state = ExpandState::capture(&old);

        let mut new = arena(&["X", "Y"]);
        expand_all(&mut new);
        assert_eq!(state.restore(&mut new), 1);
        assert_eq!(flags(&new), vec![true, false, false]);
    }

    #[test]
    fn test_visible_rows() {
        let mut arena = arena(&["A", "B"]);
        assert_eq!(visible_rows(&arena).len(), 1);
        expand_to_level(&mut arena, 1);
        let rows = visible_rows(&arena);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].depth, 1);
        assert!(rows[1].has_children);
        assert!(!rows[1].is_expanded);
        expand_all(&mut arena);
        assert_eq!(visible_rows(&arena).len(), 3);
        collapse_all(&mut arena);
        assert_eq!(visible_rows(&arena).len(), 1);
    }

    #[test]
    fn test_state_serde() {
        let mut arena = arena(&["A"]);
        expand_all(&mut arena);
        let state = ExpandState::capture(&arena);
        let json = serde_json::to_string(&state).unwrap();
        let back: ExpandState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
