//! Column projection
//!
//! Columns are registered once and persist across rebuilds. Built-in columns
//! read node fields directly; every other column is computed by walking the
//! tree depth-first and asking an [`AttributeResolver`] for each product.

mod aggregate;
mod spec;

pub use spec::*;

use std::collections::HashMap;

use aggregate::PendingLines;

use crate::config::HeaderLabels;
use crate::edit::EditorKind;
use crate::model::AttributeValue;
use crate::model::CellValue;
use crate::model::Node;
use crate::model::NodeArena;
use crate::model::NodeId;
use crate::resolve::AttributeResolver;
use crate::resolve::Resolution;

/// Node fields shown by the built-in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeField {
    Index,
    Level,
    Name,
    Deno,
    ChildType,
    Quantity,
    Unit,
}

impl NodeField {
    /// Reads the field from a node.
    pub fn value(self, node: &Node) -> Option<CellValue> {
        match self {
            NodeField::Index => Some(CellValue::Text(node.index_path().to_string())),
            NodeField::Level => Some(CellValue::Integer(node.depth() as i64)),
            NodeField::Name => Some(CellValue::Text(node.name().to_string())),
            NodeField::Deno => Some(CellValue::Text(node.deno().to_string())),
            NodeField::ChildType => node.child_type().map(|t| CellValue::Text(t.to_string())),
            NodeField::Quantity => node.quantity().map(CellValue::Number),
            NodeField::Unit => node.unit().map(|u| CellValue::Text(u.to_string())),
        }
    }
}

/// Where a column's values come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource {
    Field(NodeField),
    Resolved(ColumnSpec),
}

/// A named column and its values for the current tree.
#[derive(Debug, Clone)]
pub struct Column {
    header: String,
    source: ColumnSource,
    visible: bool,
    cells: HashMap<NodeId, CellValue>,
}

impl Column {
    fn new(header: String, source: ColumnSource, visible: bool) -> Self {
        Self {
            header,
            source,
            visible,
            cells: HashMap::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn source(&self) -> &ColumnSource {
        &self.source
    }

    /// Returns the resolver spec for resolved columns.
    pub fn spec(&self) -> Option<&ColumnSpec> {
        match &self.source {
            ColumnSource::Resolved(spec) => Some(spec),
            ColumnSource::Field(_) => None,
        }
    }

    pub fn editor(&self) -> Option<EditorKind> {
        self.spec().and_then(|s| s.editor)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the stored value of a cell.
    pub fn value(&self, node: NodeId) -> Option<&CellValue> {
        self.cells.get(&node)
    }

    /// Returns the displayed text of a cell (empty when unset).
    pub fn display(&self, node: NodeId) -> String {
        self.cells.get(&node).map(CellValue::display).unwrap_or_default()
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn set(&mut self, node: NodeId, value: Option<CellValue>) {
        match value {
            Some(value) => {
                self.cells.insert(node, value);
            }
            None => {
                self.cells.remove(&node);
            }
        }
    }
}

/// Owns the column table and computes cell values.
#[derive(Debug, Clone, Default)]
pub struct ColumnProjector {
    columns: Vec<Column>,
    by_header: HashMap<String, usize>,
}

impl ColumnProjector {
    /// Creates a projector without columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a projector with the built-in columns; `Index` starts hidden.
    pub fn with_builtin(headers: &HeaderLabels) -> Self {
        let mut projector = Self::new();
        projector.add_field_column(&headers.index, NodeField::Index, false);
        projector.add_field_column(&headers.level, NodeField::Level, true);
        projector.add_field_column(&headers.name, NodeField::Name, true);
        projector.add_field_column(&headers.deno, NodeField::Deno, true);
        projector.add_field_column(&headers.child_type, NodeField::ChildType, true);
        projector.add_field_column(&headers.quantity, NodeField::Quantity, true);
        projector.add_field_column(&headers.unit, NodeField::Unit, true);
        projector
    }

    /// Registers a column backed by a node field. Existing headers are left as is.
    pub fn add_field_column(&mut self, header: &str, field: NodeField, visible: bool) -> usize {
        if let Some(index) = self.index_of(header) {
            return index;
        }
        self.push(Column::new(header.to_string(), ColumnSource::Field(field), visible))
    }

    fn push(&mut self, column: Column) -> usize {
        let index = self.columns.len();
        self.by_header.insert(column.header.clone(), index);
        self.columns.push(column);
        index
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns all columns in registration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn index_of(&self, header: &str) -> Option<usize> {
        self.by_header.get(header).copied()
    }

    pub fn column_by_header(&self, header: &str) -> Option<&Column> {
        self.index_of(header).and_then(|i| self.columns.get(i))
    }

    /// Iterates visible columns in registration order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Displayed values of a node across visible columns.
    pub fn row(&self, node: NodeId) -> Vec<String> {
        self.visible_columns().map(|c| c.display(node)).collect()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Adds a resolved column and fills it for every node.
    ///
    /// If a column with the same header exists, its visibility is toggled
    /// instead and its values are left untouched. Returns the column index in
    /// both cases.
    pub fn add_column<A>(&mut self, spec: ColumnSpec, arena: &NodeArena, resolver: &A) -> usize
    where
        A: AttributeResolver + ?Sized,
    {
        if let Some(index) = self.index_of(&spec.header) {
            let column = &mut self.columns[index];
            column.visible = !column.visible;
            log::debug!("Column '{}' visibility toggled to {}", column.header, column.visible);
            return index;
        }

        let mut column = Column::new(spec.header.clone(), ColumnSource::Resolved(spec), true);
        project(&mut column, arena, resolver);
        log::debug!("Column '{}' added with {} cells", column.header, column.cells.len());
        self.push(column)
    }

    /// Recomputes an existing column in place.
    ///
    /// The stored spec is replaced by `spec`, so later rebuilds replay the
    /// new settings. Returns `None` if no column has this header.
    pub fn redraw_column<A>(&mut self, spec: &ColumnSpec, arena: &NodeArena, resolver: &A) -> Option<usize>
    where
        A: AttributeResolver + ?Sized,
    {
        let index = self.index_of(&spec.header)?;
        let column = &mut self.columns[index];
        if let ColumnSource::Resolved(current) = &mut column.source {
            *current = spec.clone();
        }
        project(column, arena, resolver);
        log::debug!("Column '{}' redrawn", column.header);
        Some(index)
    }

    /// Recomputes every column in registration order.
    pub fn redraw_all<A>(&mut self, arena: &NodeArena, resolver: &A)
    where
        A: AttributeResolver + ?Sized,
    {
        for column in &mut self.columns {
            project(column, arena, resolver);
        }
    }

    /// Recomputes the column at `index` with its stored source.
    pub fn redraw_at<A>(&mut self, index: usize, arena: &NodeArena, resolver: &A) -> Option<()>
    where
        A: AttributeResolver + ?Sized,
    {
        project(self.columns.get_mut(index)?, arena, resolver);
        Some(())
    }

    /// Refills built-in columns from `arena` and empties resolved ones.
    ///
    /// Used when a new tree is installed without replaying column specs.
    pub fn reset_to_fields(&mut self, arena: &NodeArena) {
        for column in &mut self.columns {
            column.cells.clear();
            if let ColumnSource::Field(field) = column.source {
                project_field(&mut column.cells, field, arena);
            }
        }
    }

    /// Flips visibility without touching values. Returns the new visibility.
    pub fn toggle_column(&mut self, header: &str) -> Option<bool> {
        let index = self.index_of(header)?;
        let column = &mut self.columns[index];
        column.visible = !column.visible;
        Some(column.visible)
    }

    /// Sets visibility explicitly.
    pub fn set_visible(&mut self, header: &str, visible: bool) -> Option<()> {
        let index = self.index_of(header)?;
        self.columns[index].visible = visible;
        Some(())
    }

    /// Writes one cell directly, e.g. after an edit was committed.
    pub fn set_cell(&mut self, index: usize, node: NodeId, value: Option<CellValue>) -> Option<()> {
        self.columns.get_mut(index)?.set(node, value);
        Some(())
    }
}

/// Clears and recomputes one column over the whole tree.
fn project<A>(column: &mut Column, arena: &NodeArena, resolver: &A)
where
    A: AttributeResolver + ?Sized,
{
    column.cells.clear();
    let Some(root) = arena.root() else {
        return;
    };

    match &column.source {
        ColumnSource::Field(field) => project_field(&mut column.cells, *field, arena),
        ColumnSource::Resolved(spec) => {
            let mut walk = Walk {
                arena,
                resolver,
                spec,
                pending: PendingLines::new(),
                cells: HashMap::with_capacity(arena.len()),
                failures: 0,
            };
            walk.visit(root);
            if walk.failures > 0 {
                log::warn!(
                    "Column '{}': {} of {} cells failed to resolve",
                    spec.header,
                    walk.failures,
                    arena.len()
                );
            }
            column.cells = walk.cells;
        }
    }
}

fn project_field(cells: &mut HashMap<NodeId, CellValue>, field: NodeField, arena: &NodeArena) {
    for node in arena.iter() {
        if let Some(value) = field.value(node) {
            cells.insert(node.id(), value);
        }
    }
}

/// Depth-first resolution of one column.
struct Walk<'a, A: ?Sized> {
    arena: &'a NodeArena,
    resolver: &'a A,
    spec: &'a ColumnSpec,
    pending: PendingLines,
    cells: HashMap<NodeId, CellValue>,
    failures: usize,
}

impl<A> Walk<'_, A>
where
    A: AttributeResolver + ?Sized,
{
    fn visit(&mut self, node: &Node) {
        let arena = self.arena;
        if let Some(value) = self.resolve(node).normalize() {
            self.cells.insert(node.id(), value);
        }

        for child in node.children() {
            if let Some(child) = arena.get(*child) {
                self.visit(child);
            }
        }
    }

    fn resolve(&mut self, node: &Node) -> AttributeValue {
        let result = node.product().with(|product| {
            self.resolver
                .resolve(product, self.spec)
                .map(|resolution| (product.id, resolution))
        });

        match result {
            Ok((_, Resolution::Value(value))) => value,
            Ok((product, Resolution::Aggregated { value, contributions })) => {
                self.pending.add(contributions);
                self.pending.take_into(product, value)
            }
            Err(e) => {
                log::warn!("{} {}: {}", node.name(), node.deno(), e);
                self.failures += 1;
                AttributeValue::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::model::Link;
    use crate::model::Product;
    use crate::model::ProductId;
    use crate::model::ProductRef;

    fn arena() -> NodeArena {
        let mut arena = NodeArena::new();
        let root = arena.push_root(ProductRef::new(Product::new(1u64, "Frame", "FR")));
        let a = arena
            .push_child(root, ProductRef::new(Product::new(2u64, "Arm", "AR")), Link::default())
            .unwrap();
        arena
            .push_child(a, ProductRef::new(Product::new(3u64, "Bolt", "BT")), Link::default())
            .unwrap();
        arena
    }

    fn deno_resolver(product: &Product, _spec: &ColumnSpec) -> Result<Resolution, ResolveError> {
        Ok(Resolution::value(format!("d:{}", product.deno)))
    }

    #[test]
    fn test_builtin_columns() {
        let arena = arena();
        let mut projector = ColumnProjector::with_builtin(&HeaderLabels::default());
        projector.redraw_all(&arena, &deno_resolver);

        assert_eq!(projector.len(), 7);
        assert!(!projector.column_by_header("Index").unwrap().is_visible());
        let bolt = arena.find_by_path("1.1.").unwrap().id();
        assert_eq!(projector.row(bolt), vec!["2", "Bolt", "BT", "", "", ""]);
    }

    #[test]
    fn test_reset_to_fields() {
        let mut projector = ColumnProjector::with_builtin(&HeaderLabels::default());
        projector.add_column(ColumnSpec::new("D"), &arena(), &deno_resolver);

        let mut partial = NodeArena::new();
        let root = partial.push_root(ProductRef::new(Product::new(4u64, "Hub", "HB")));
        projector.reset_to_fields(&partial);

        assert_eq!(projector.column_by_header("Name").unwrap().display(root), "Hub");
        assert_eq!(projector.column_by_header("Name").unwrap().cell_count(), 1);
        assert_eq!(projector.column_by_header("D").unwrap().cell_count(), 0);
    }

    #[test]
    fn test_add_column_projects_every_node() {
        let arena = arena();
        let mut projector = ColumnProjector::new();
        let index = projector.add_column(ColumnSpec::new("D"), &arena, &deno_resolver);

        let column = projector.column(index).unwrap();
        assert_eq!(column.cell_count(), 3);
        assert_eq!(column.display(arena.root().unwrap().id()), "d:FR");
    }

    #[test]
    fn test_add_existing_header_toggles() {
        let arena = arena();
        let mut projector = ColumnProjector::new();
        let first = projector.add_column(ColumnSpec::new("D"), &arena, &deno_resolver);
        let calls = std::cell::Cell::new(0);
        let counting = |_: &Product, _: &ColumnSpec| -> Result<Resolution, ResolveError> {
            calls.set(calls.get() + 1);
            Ok(Resolution::value("changed"))
        };

        let second = projector.add_column(ColumnSpec::new("D"), &arena, &counting);

        assert_eq!(first, second);
        assert_eq!(calls.get(), 0);
        let column = projector.column(first).unwrap();
        assert!(!column.is_visible());
        assert_eq!(column.display(arena.root().unwrap().id()), "d:FR");
    }

    #[test]
    fn test_failed_cell_does_not_abort() {
        let arena = arena();
        let failing = |product: &Product, _: &ColumnSpec| -> Result<Resolution, ResolveError> {
            if product.id == ProductId(2) {
                Err(ResolveError::failed(product.id, "backend down"))
            } else {
                Ok(Resolution::value(product.name.clone()))
            }
        };
        let mut projector = ColumnProjector::new();
        let index = projector.add_column(ColumnSpec::new("Name2"), &arena, &failing);

        let column = projector.column(index).unwrap();
        assert_eq!(column.cell_count(), 2);
        assert!(column.value(arena.find_by_path("1.").unwrap().id()).is_none());
        assert_eq!(column.display(arena.find_by_path("1.1.").unwrap().id()), "Bolt");
    }

    #[test]
    fn test_redraw_clears_none() {
        let arena = arena();
        let mut projector = ColumnProjector::new();
        let index = projector.add_column(ColumnSpec::new("D"), &arena, &deno_resolver);
        let empty = |_: &Product, _: &ColumnSpec| -> Result<Resolution, ResolveError> { Ok(Resolution::none()) };

        assert_eq!(projector.redraw_column(&ColumnSpec::new("D"), &arena, &empty), Some(index));
        assert_eq!(projector.column(index).unwrap().cell_count(), 0);
        assert_eq!(projector.redraw_column(&ColumnSpec::new("missing"), &arena, &empty), None);
    }

    #[test]
    fn test_aggregated_lines_reach_descendants() {
        let arena = arena();
        let aggregated = |product: &Product, _: &ColumnSpec| -> Result<Resolution, ResolveError> {
            match product.id.0 {
                1 => Ok(Resolution::Aggregated {
                    value: AttributeValue::from("RC-1"),
                    contributions: vec![crate::resolve::Contribution::new(ProductId(3), "Part of RC-1")],
                }),
                3 => Ok(Resolution::Aggregated {
                    value: AttributeValue::from("RC-3"),
                    contributions: Vec::new(),
                }),
                _ => Ok(Resolution::Aggregated {
                    value: AttributeValue::None,
                    contributions: Vec::new(),
                }),
            }
        };
        let mut projector = ColumnProjector::new();
        let index = projector.add_column(ColumnSpec::new("RC"), &arena, &aggregated);
        let column = projector.column(index).unwrap();

        assert_eq!(column.display(arena.find_by_path("").unwrap().id()), "RC-1");
        assert_eq!(column.display(arena.find_by_path("1.").unwrap().id()), "");
        assert_eq!(column.display(arena.find_by_path("1.1.").unwrap().id()), "Part of RC-1\nRC-3");
    }

    #[test]
    fn test_toggle_keeps_values() {
        let arena = arena();
        let mut projector = ColumnProjector::new();
        let index = projector.add_column(ColumnSpec::new("D"), &arena, &deno_resolver);

        assert_eq!(projector.toggle_column("D"), Some(false));
        assert_eq!(projector.column(index).unwrap().cell_count(), 3);
        assert_eq!(projector.toggle_column("D"), Some(true));
        assert_eq!(projector.toggle_column("nope"), None);
    }
}
