//! Tree search
//!
//! Two matching rules coexist on purpose: [`search`] is a case-insensitive
//! substring match over every visible column, [`search_column`] an exact match
//! on one column. Both return nodes in depth-first, sibling order.

use crate::column::ColumnProjector;
use crate::model::NodeArena;
use crate::model::NodeId;

/// A search to re-run after rebuilds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Case-insensitive substring over visible columns.
    Contains(String),
    /// Exact match within one column.
    Exact { text: String, header: String },
}

impl SearchQuery {
    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    pub fn exact(text: impl Into<String>, header: impl Into<String>) -> Self {
        Self::Exact {
            text: text.into(),
            header: header.into(),
        }
    }

    /// Runs the query against a tree and its columns.
    pub fn run(&self, arena: &NodeArena, columns: &ColumnProjector) -> Vec<NodeId> {
        match self {
            Self::Contains(text) => search(arena, columns, text),
            Self::Exact { text, header } => search_column(arena, columns, text, header),
        }
    }
}

/// Nodes where any visible column contains `text`, ignoring case.
///
/// Each node is reported once even if several columns match.
pub fn search(arena: &NodeArena, columns: &ColumnProjector, text: &str) -> Vec<NodeId> {
    let needle = text.to_lowercase();
    arena
        .depth_first()
        .filter(|node| {
            columns
                .visible_columns()
                .any(|c| c.display(node.id()).to_lowercase().contains(&needle))
        })
        .map(|node| node.id())
        .collect()
}

/// Nodes whose value in column `header` equals `text` exactly.
///
/// Hidden columns are searched too. An unknown header yields no hits.
pub fn search_column(arena: &NodeArena, columns: &ColumnProjector, text: &str, header: &str) -> Vec<NodeId> {
    let Some(column) = columns.column_by_header(header) else {
        log::debug!("Search in unknown column '{}'", header);
        return Vec::new();
    };
    arena
        .depth_first()
        .filter(|node| column.display(node.id()) == text)
        .map(|node| node.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderLabels;
    use crate::model::Link;
    use crate::model::Product;
    use crate::model::ProductRef;
    use crate::resolve::ProductAttributeResolver;

    fn fixture() -> (NodeArena, ColumnProjector) {
        let mut arena = NodeArena::new();
        let root = arena.push_root(ProductRef::new(Product::new(1u64, "Frame", "FR.1")));
        arena
            .push_child(root, ProductRef::new(Product::new(2u64, "Bracket", "ABC123")), Link::default())
            .unwrap();
        arena
            .push_child(root, ProductRef::new(Product::new(3u64, "Cover abc", "ABC")), Link::default())
            .unwrap();

        let mut columns = ColumnProjector::with_builtin(&HeaderLabels::default());
        columns.redraw_all(&arena, &ProductAttributeResolver::default());
        (arena, columns)
    }

    #[test]
    fn test_contains_vs_exact() {
        let (arena, columns) = fixture();
        let contains = search(&arena, &columns, "ABC");
        let exact = search_column(&arena, &columns, "ABC", "Deno");

        assert_eq!(contains, vec![NodeId(1), NodeId(2)]);
        assert_eq!(exact, vec![NodeId(2)]);
    }

    #[test]
    fn test_contains_ignores_case() {
        let (arena, columns) = fixture();
        assert_eq!(search(&arena, &columns, "bracket"), vec![NodeId(1)]);
        assert_eq!(search_column(&arena, &columns, "abc", "Deno"), Vec::<NodeId>::new());
    }

    #[test]
    fn test_hidden_columns() {
        let (arena, columns) = fixture();
        // Index column is hidden: "1." only matches through search_column.
        assert!(search(&arena, &columns, "1.").iter().all(|id| *id != NodeId(1)));
        assert_eq!(search_column(&arena, &columns, "1.", "Index"), vec![NodeId(1)]);
    }

    #[test]
    fn test_unknown_header() {
        let (arena, columns) = fixture();
        assert!(search_column(&arena, &columns, "ABC", "Nope").is_empty());
        assert!(SearchQuery::exact("ABC", "Nope").run(&arena, &columns).is_empty());
    }
}
