//! View state layered over the tree
//!
//! Expand flags, row colours and active searches live outside the node data
//! and are keyed by [`NodeKey`], so they survive a rebuild for every node
//! whose key still exists.

mod expand;
mod search;

pub use expand::*;
pub use search::*;

use std::collections::HashMap;

use crate::column::ColumnProjector;
use crate::model::NodeArena;
use crate::model::NodeId;
use crate::model::NodeKey;
use crate::model::RowColor;

/// A remembered search and its hits in the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSearch {
    pub query: SearchQuery,
    pub hits: Vec<NodeId>,
}

/// Row colours and active searches of one tree model.
#[derive(Debug, Clone, Default)]
pub struct ViewStateTracker {
    colors: HashMap<NodeKey, RowColor>,
    searches: Vec<ActiveSearch>,
}

impl ViewStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Colours
    // -------------------------------------------------------------------------

    /// Colours the row of `node`. A transparent colour clears the mark.
    ///
    /// Returns `false` if the node is not in the arena.
    pub fn set_color(&mut self, arena: &mut NodeArena, node: NodeId, color: RowColor) -> bool {
        if color.is_transparent() {
            return self.clear_color(arena, node);
        }
        let Some(node) = arena.get_mut(node) else {
            return false;
        };
        node.color = Some(color);
        self.colors.insert(node.key.clone(), color);
        true
    }

    /// Removes the colour mark of `node`.
    pub fn clear_color(&mut self, arena: &mut NodeArena, node: NodeId) -> bool {
        let Some(node) = arena.get_mut(node) else {
            return false;
        };
        node.color = None;
        self.colors.remove(&node.key);
        true
    }

    pub fn color_of(&self, key: &NodeKey) -> Option<RowColor> {
        self.colors.get(key).copied()
    }

    /// Number of remembered colour marks.
    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Applies remembered colours to a new tree.
    ///
    /// Marks whose key no longer exists are forgotten. Returns the number of
    /// coloured rows.
    pub fn reapply_colors(&mut self, arena: &mut NodeArena) -> usize {
        let before = self.colors.len();
        self.colors.retain(|key, _| arena.find_by_key(key).is_some());
        if before != self.colors.len() {
            log::debug!("Dropped {} colour marks of removed rows", before - self.colors.len());
        }

        for node in arena.iter_mut() {
            node.color = self.colors.get(&node.key).copied();
        }
        self.colors.len()
    }

    // -------------------------------------------------------------------------
    // Searches
    // -------------------------------------------------------------------------

    /// Runs a query, remembers it for later rebuilds and returns its hits.
    pub fn run_search(&mut self, query: SearchQuery, arena: &NodeArena, columns: &ColumnProjector) -> Vec<NodeId> {
        let hits = query.run(arena, columns);
        match self.searches.iter_mut().find(|s| s.query == query) {
            Some(active) => active.hits = hits.clone(),
            None => self.searches.push(ActiveSearch {
                query,
                hits: hits.clone(),
            }),
        }
        hits
    }

    /// Re-runs every remembered query against the current tree.
    pub fn rerun_searches(&mut self, arena: &NodeArena, columns: &ColumnProjector) {
        for active in &mut self.searches {
            active.hits = active.query.run(arena, columns);
        }
    }

    /// Drops the hits of every query; the queries themselves are kept.
    pub fn clear_hits(&mut self) {
        for active in &mut self.searches {
            active.hits.clear();
        }
    }

    pub fn active_searches(&self) -> &[ActiveSearch] {
        &self.searches
    }

    pub fn clear_searches(&mut self) {
        self.searches.clear();
    }
}
