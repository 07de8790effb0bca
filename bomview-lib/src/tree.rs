//! Tree model
//!
//! [`TreeModel`] owns the current node arena together with the column table
//! and view state, and drives the rebuild cycle:
//!
//! ```text
//! Idle -> Rebuilding -> Reprojecting -> Reapplying -> Idle
//!              \
//!               -> Aborted (suspected cycle, partial tree installed)
//! ```

use crate::build::TreeBuilder;
use crate::column::Column;
use crate::column::ColumnProjector;
use crate::column::ColumnSpec;
use crate::config::TreeConfig;
use crate::edit::EditCommit;
use crate::edit::EditSession;
use crate::error::CycleSuspected;
use crate::error::ModelError;
use crate::error::RepositoryError;
use crate::model::CellValue;
use crate::model::Node;
use crate::model::NodeArena;
use crate::model::NodeId;
use crate::model::NodeKey;
use crate::model::ProductId;
use crate::model::ProductRef;
use crate::model::RowColor;
use crate::repository::CompositionRepository;
use crate::resolve::AttributeResolver;
use crate::view;
use crate::view::ActiveSearch;
use crate::view::ExpandState;
use crate::view::FlatRow;
use crate::view::SearchQuery;
use crate::view::ViewStateTracker;

/// Phase of the rebuild cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildState {
    #[default]
    Idle,
    Rebuilding,
    Reprojecting,
    Reapplying,
    /// The last build stopped at the depth limit.
    Aborted,
}

impl RebuildState {
    /// Returns `true` if a new rebuild may start.
    pub fn accepts_rebuild(self) -> bool {
        matches!(self, RebuildState::Idle | RebuildState::Aborted)
    }
}

/// Coarse progress of a long operation, for user feedback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub stage: usize,
    pub total: usize,
    pub message: String,
}

impl Progress {
    fn new(stage: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            stage,
            total,
            message: message.into(),
        }
    }
}

/// Summary of a finished rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    /// `Idle` on success, `Aborted` on a suspected cycle.
    pub state: RebuildState,
    pub nodes: usize,
    pub suspected: Vec<CycleSuspected>,
}

impl RebuildReport {
    pub fn cycle(&self) -> Option<&CycleSuspected> {
        self.suspected.first()
    }

    pub fn is_aborted(&self) -> bool {
        self.state == RebuildState::Aborted
    }

    /// Turns a suspected cycle into an error, for callers using `?`.
    pub fn check(self) -> Result<Self, ModelError> {
        match self.suspected.first() {
            Some(cycle) => Err(ModelError::CycleSuspected(cycle.clone())),
            None => Ok(self),
        }
    }
}

/// Read-only view of one node and its row.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    node: &'a Node,
    columns: &'a ColumnProjector,
}

impl<'a> NodeView<'a> {
    /// The underlying node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn key(&self) -> &'a NodeKey {
        self.node.key()
    }

    pub fn name(&self) -> &'a str {
        self.node.name()
    }

    pub fn deno(&self) -> &'a str {
        self.node.deno()
    }

    pub fn depth(&self) -> usize {
        self.node.depth()
    }

    pub fn index_path(&self) -> &'a str {
        self.node.index_path()
    }

    pub fn is_expanded(&self) -> bool {
        self.node.is_expanded()
    }

    pub fn color(&self) -> Option<RowColor> {
        self.node.color()
    }

    pub fn product(&self) -> &'a ProductRef {
        self.node.product()
    }

    /// Displayed values across visible columns.
    pub fn row(&self) -> Vec<String> {
        self.columns.row(self.node.id())
    }

    /// Stored value of the column `header`.
    pub fn value(&self, header: &str) -> Option<&'a CellValue> {
        self.columns.column_by_header(header)?.value(self.node.id())
    }

    /// Displayed text of the column `header` (empty when unset).
    pub fn display(&self, header: &str) -> String {
        self.columns
            .column_by_header(header)
            .map(|c| c.display(self.node.id()))
            .unwrap_or_default()
    }
}

/// A composition tree with columns and view state.
///
/// # Example
///
/// ```
/// use bomview_lib::TreeModel;
/// use bomview_lib::column::ColumnSpec;
/// use bomview_lib::config::TreeConfig;
/// use bomview_lib::model::ChildEdge;
/// use bomview_lib::model::Product;
/// use bomview_lib::model::ProductId;
/// use bomview_lib::repository::InMemoryRepository;
/// use bomview_lib::resolve::ProductAttributeResolver;
///
/// let repo = InMemoryRepository::new();
/// repo.insert_product(Product::new(1u64, "Frame", "FR").with_kind("assembly"));
/// repo.insert_product(Product::new(2u64, "Arm", "AR").with_kind("part"));
/// repo.add_edge(ProductId(1), ChildEdge::new(2u64));
///
/// let mut model =
///     TreeModel::new(repo, ProductAttributeResolver::default(), ProductId(1), TreeConfig::default()).unwrap();
/// model.rebuild().unwrap();
/// model.add_column(ColumnSpec::product_field("Kind", "kind"));
///
/// let arm = model.node_at("1.").unwrap();
/// assert_eq!(arm.display("Kind"), "part");
/// ```
#[derive(Debug)]
pub struct TreeModel<R, A> {
    repository: R,
    resolver: A,
    root: ProductId,
    config: TreeConfig,
    arena: NodeArena,
    columns: ColumnProjector,
    view: ViewStateTracker,
    state: RebuildState,
    suspected: Vec<CycleSuspected>,
    built: bool,
}

impl<R, A> TreeModel<R, A>
where
    R: CompositionRepository,
    A: AttributeResolver,
{
    /// Creates a model rooted at `root` with the built-in columns.
    ///
    /// The tree is empty until the first [`rebuild`](Self::rebuild).
    pub fn new(repository: R, resolver: A, root: ProductId, config: TreeConfig) -> Result<Self, ModelError> {
        if repository.product(root).is_none() {
            return Err(ModelError::UnknownProduct(root));
        }
        let columns = ColumnProjector::with_builtin(&config.headers);
        Ok(Self {
            repository,
            resolver,
            root,
            config,
            arena: NodeArena::new(),
            columns,
            view: ViewStateTracker::new(),
            state: RebuildState::Idle,
            suspected: Vec::new(),
            built: false,
        })
    }

    // -------------------------------------------------------------------------
    // Rebuild
    // -------------------------------------------------------------------------

    /// Rebuilds the tree, replays columns and restores view state.
    pub fn rebuild(&mut self) -> Result<RebuildReport, ModelError> {
        self.rebuild_with(|_| {})
    }

    /// Like [`rebuild`](Self::rebuild), reporting coarse progress.
    ///
    /// A suspected cycle is not an error here: the partial tree is installed,
    /// the model ends in [`RebuildState::Aborted`] and the report carries the
    /// diagnostic.
    pub fn rebuild_with(&mut self, mut progress: impl FnMut(Progress)) -> Result<RebuildReport, ModelError> {
        if !self.state.accepts_rebuild() {
            return Err(ModelError::RebuildInProgress(self.state));
        }
        let total = self.columns.len() + 2;
        let expand_state = self.built.then(|| ExpandState::capture(&self.arena));

        self.state = RebuildState::Rebuilding;
        progress(Progress::new(0, total, "Building tree"));
        let outcome = TreeBuilder::new(&self.repository)
            .with_config(&self.config)
            .build(self.root);
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = RebuildState::Idle;
                return Err(e.into());
            }
        };
        self.arena = outcome.arena;
        self.suspected = outcome.suspected;
        self.built = true;

        if !self.suspected.is_empty() {
            self.columns.reset_to_fields(&self.arena);
            self.view.clear_hits();
            self.state = RebuildState::Aborted;
            log::warn!("Rebuild aborted with {} nodes installed", self.arena.len());
            return Ok(self.report());
        }

        self.state = RebuildState::Reprojecting;
        for index in 0..self.columns.len() {
            if let Some(column) = self.columns.column(index) {
                progress(Progress::new(index + 1, total, column.header()));
            }
            self.columns.redraw_at(index, &self.arena, &self.resolver);
        }

        self.state = RebuildState::Reapplying;
        progress(Progress::new(total - 1, total, "Restoring view"));
        match expand_state {
            Some(state) => {
                state.restore(&mut self.arena);
            }
            None => view::expand_to_level(&mut self.arena, self.config.expand_level),
        }
        self.view.reapply_colors(&mut self.arena);
        self.view.rerun_searches(&self.arena, &self.columns);

        self.state = RebuildState::Idle;
        log::info!("Rebuilt tree with {} nodes", self.arena.len());
        Ok(self.report())
    }

    fn report(&self) -> RebuildReport {
        RebuildReport {
            state: self.state,
            nodes: self.arena.len(),
            suspected: self.suspected.clone(),
        }
    }

    pub fn state(&self) -> RebuildState {
        self.state
    }

    /// Cycle diagnostics of the last build.
    pub fn diagnostics(&self) -> &[CycleSuspected] {
        &self.suspected
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn root(&self) -> Option<NodeView<'_>> {
        self.arena.root().map(|node| self.view_of(node))
    }

    pub fn node(&self, id: NodeId) -> Option<NodeView<'_>> {
        self.arena.get(id).map(|node| self.view_of(node))
    }

    /// Looks up a node by index path (`""` is the root).
    pub fn node_at(&self, path: &str) -> Option<NodeView<'_>> {
        self.arena.find_by_path(path).map(|node| self.view_of(node))
    }

    fn view_of<'a>(&'a self, node: &'a Node) -> NodeView<'a> {
        NodeView {
            node,
            columns: &self.columns,
        }
    }

    /// Displayed values of a node across visible columns, in registration order.
    pub fn row_of(&self, node: NodeId) -> Vec<String> {
        if self.arena.get(node).is_none() {
            return Vec::new();
        }
        self.columns.row(node)
    }

    /// Headers of the visible columns.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.visible_columns().map(Column::header).collect()
    }

    pub fn columns(&self) -> &ColumnProjector {
        &self.columns
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn resolver(&self) -> &A {
        &self.resolver
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Adds a column, or toggles its visibility if the header exists.
    pub fn add_column(&mut self, spec: ColumnSpec) -> usize {
        self.columns.add_column(spec, &self.arena, &self.resolver)
    }

    /// Adds several columns, reporting one stage per column.
    pub fn add_columns(&mut self, specs: Vec<ColumnSpec>, mut progress: impl FnMut(Progress)) -> Vec<usize> {
        let total = specs.len();
        specs
            .into_iter()
            .enumerate()
            .map(|(stage, spec)| {
                progress(Progress::new(stage, total, spec.header.clone()));
                self.add_column(spec)
            })
            .collect()
    }

    /// Flips column visibility. Returns the new visibility.
    pub fn toggle_column(&mut self, header: &str) -> Result<bool, ModelError> {
        self.columns
            .toggle_column(header)
            .ok_or_else(|| ModelError::UnknownColumn(header.to_string()))
    }

    /// Recomputes an existing column with new settings.
    pub fn redraw_column(&mut self, spec: &ColumnSpec) -> Result<usize, ModelError> {
        self.columns
            .redraw_column(spec, &self.arena, &self.resolver)
            .ok_or_else(|| ModelError::UnknownColumn(spec.header.clone()))
    }

    /// Recomputes every column.
    pub fn redraw_all_columns(&mut self) {
        self.columns.redraw_all(&self.arena, &self.resolver);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Case-insensitive substring search over visible columns.
    pub fn search(&mut self, text: &str) -> Vec<NodeId> {
        self.view
            .run_search(SearchQuery::contains(text), &self.arena, &self.columns)
    }

    /// Exact search in one column.
    pub fn search_column(&mut self, text: &str, header: &str) -> Vec<NodeId> {
        self.view
            .run_search(SearchQuery::exact(text, header), &self.arena, &self.columns)
    }

    pub fn active_searches(&self) -> &[ActiveSearch] {
        self.view.active_searches()
    }

    pub fn clear_searches(&mut self) {
        self.view.clear_searches();
    }

    // -------------------------------------------------------------------------
    // Colours
    // -------------------------------------------------------------------------

    /// Colours a row; [`RowColor::BASIC`] clears it.
    pub fn set_color(&mut self, node: NodeId, color: RowColor) -> Result<(), ModelError> {
        if self.view.set_color(&mut self.arena, node, color) {
            Ok(())
        } else {
            Err(ModelError::UnknownNode(node))
        }
    }

    pub fn clear_color(&mut self, node: NodeId) -> Result<(), ModelError> {
        if self.view.clear_color(&mut self.arena, node) {
            Ok(())
        } else {
            Err(ModelError::UnknownNode(node))
        }
    }

    pub fn color_of(&self, node: NodeId) -> Option<RowColor> {
        self.arena.get(node).and_then(Node::color)
    }

    // -------------------------------------------------------------------------
    // Expand state
    // -------------------------------------------------------------------------

    pub fn capture_expand_state(&self) -> ExpandState {
        ExpandState::capture(&self.arena)
    }

    /// Applies captured flags; nodes missing from `state` collapse.
    pub fn restore_expand_state(&mut self, state: &ExpandState) -> usize {
        state.restore(&mut self.arena)
    }

    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) -> Result<(), ModelError> {
        let node = self.arena.get_mut(node).ok_or(ModelError::UnknownNode(node))?;
        node.expanded = expanded;
        Ok(())
    }

    /// Flips one node. Returns the new flag.
    pub fn toggle_expanded(&mut self, node: NodeId) -> Result<bool, ModelError> {
        let node = self.arena.get_mut(node).ok_or(ModelError::UnknownNode(node))?;
        node.expanded = !node.expanded;
        Ok(node.expanded)
    }

    pub fn expand_all(&mut self) {
        view::expand_all(&mut self.arena);
    }

    pub fn collapse_all(&mut self) {
        view::collapse_all(&mut self.arena);
    }

    pub fn expand_to_level(&mut self, level: usize) {
        view::expand_to_level(&mut self.arena, level);
    }

    /// Rows reachable through expanded ancestors, depth-first.
    pub fn visible_rows(&self) -> Vec<FlatRow> {
        view::visible_rows(&self.arena)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn product_of(&self, node: NodeId) -> Option<ProductRef> {
        self.arena.get(node).map(|n| n.product().clone())
    }

    /// Looks up a product by designation.
    pub fn find_product(&self, deno: &str) -> Option<ProductRef> {
        let product = self.repository.find_by_deno(deno);
        if product.is_none() {
            log::warn!("Product '{}' not found", deno);
        }
        product
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Opens the editor declared by column `header` on a cell.
    ///
    /// Returns `None` for unknown nodes and read-only columns.
    pub fn begin_edit(&self, node: NodeId, header: &str) -> Option<EditSession> {
        self.arena.get(node)?;
        let column = self.columns.column_by_header(header)?;
        let kind = column.editor()?;
        let catalog = column
            .spec()
            .map(|spec| self.repository.edit_catalog(spec))
            .unwrap_or_default();
        Some(kind.begin(&column.display(node), &catalog))
    }

    /// Hands a finished edit to the repository and refreshes all columns.
    pub fn commit_edit(&mut self, node: NodeId, header: &str, commit: &EditCommit) -> Result<(), ModelError> {
        let product = self
            .arena
            .get(node)
            .map(|n| n.product().clone())
            .ok_or(ModelError::UnknownNode(node))?;
        let column = self
            .columns
            .column_by_header(header)
            .ok_or_else(|| ModelError::UnknownColumn(header.to_string()))?;
        let spec = column.spec().ok_or_else(|| RepositoryError::read_only(header))?;

        self.repository.apply_edit(&product, spec, commit)?;
        log::debug!("Committed '{}' on {} {}", header, product.name(), product.deno());
        self.redraw_all_columns();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::CellEditor;
    use crate::edit::EditorKind;
    use crate::error::BuildError;
    use crate::model::ChildEdge;
    use crate::model::Product;
    use crate::repository::InMemoryRepository;
    use crate::resolve::ProductAttributeResolver;

    type Model = TreeModel<InMemoryRepository, ProductAttributeResolver>;

    fn repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.insert_product(Product::new(1u64, "Frame", "FR").with_kind("assembly"));
        repo.insert_product(Product::new(2u64, "Arm", "AR").with_kind("part"));
        repo.insert_product(Product::new(3u64, "Bolt", "BT"));
        repo.add_edge(ProductId(1), ChildEdge::new(2u64).with_quantity(2).with_unit("pcs"));
        repo.add_edge(ProductId(2), ChildEdge::new(3u64).with_quantity(1).with_unit("kg"));
        repo.set_catalog("kinds", vec!["assembly".into(), "part".into()]);
        repo
    }

    fn model(repo: InMemoryRepository) -> Model {
        let mut model = TreeModel::new(repo, ProductAttributeResolver::default(), ProductId(1), TreeConfig::default())
            .unwrap();
        model.rebuild().unwrap();
        model
    }

    #[test]
    fn test_unknown_root() {
        let result = TreeModel::new(repo(), ProductAttributeResolver::default(), ProductId(9), TreeConfig::default());
        assert!(matches!(result, Err(ModelError::UnknownProduct(ProductId(9)))));
    }

    #[test]
    fn test_first_build_expands_to_level() {
        let model = model(repo());
        assert_eq!(model.state(), RebuildState::Idle);
        assert!(model.root().unwrap().is_expanded());
        assert!(!model.node_at("1.").unwrap().is_expanded());
        assert_eq!(model.visible_rows().len(), 2);
    }

    #[test]
    fn test_row_of() {
        let model = model(repo());
        let arm = model.node_at("1.").unwrap().id();
        assert_eq!(model.headers(), vec!["Level", "Name", "Deno", "Type", "Qty", "Unit"]);
        assert_eq!(model.row_of(arm), vec!["1", "Arm", "AR", "", "2", "pcs"]);
        assert!(model.row_of(NodeId(42)).is_empty());
    }

    #[test]
    fn test_rebuild_keeps_columns_and_expand_state() {
        let mut model = model(repo());
        model.add_column(ColumnSpec::product_field("Kind", "kind"));
        let arm = model.node_at("1.").unwrap().id();
        model.set_expanded(arm, true).unwrap();

        let mut stages = Vec::new();
        let report = model.rebuild_with(|p| stages.push(p.message)).unwrap();

        assert_eq!(report.state, RebuildState::Idle);
        assert_eq!(report.nodes, 3);
        assert_eq!(stages.first().map(String::as_str), Some("Building tree"));
        assert_eq!(stages.last().map(String::as_str), Some("Restoring view"));
        assert!(stages.iter().any(|s| s == "Kind"));
        assert!(model.node_at("1.").unwrap().is_expanded());
        assert_eq!(model.node_at("1.").unwrap().display("Kind"), "part");
    }

    #[test]
    fn test_cycle_aborts() {
        let mut model = model(repo());
        model.add_column(ColumnSpec::product_field("Kind", "kind"));
        model.repository().add_edge(ProductId(3), ChildEdge::new(1u64));

        let report = model.rebuild().unwrap();
        assert!(report.is_aborted());
        assert_eq!(model.state(), RebuildState::Aborted);
        assert_eq!(report.cycle().unwrap().deno, "FR");
        assert!(matches!(report.clone().check(), Err(ModelError::CycleSuspected(_))));
        assert_eq!(model.diagnostics().len(), 1);

        // Built-in columns describe the partial tree, resolved columns stay empty.
        let arm = model.node_at("1.").unwrap().id();
        assert_eq!(model.row_of(arm), vec!["1", "Arm", "AR", "", "2", "pcs", ""]);
        assert_eq!(model.node(arm).unwrap().display("Deno"), "AR");
        assert_eq!(model.columns().column_by_header("Kind").unwrap().cell_count(), 0);
        assert!(model.search_column("AR", "Deno").contains(&arm));
        assert!(model.search("arm").contains(&arm));

        // A new rebuild is accepted after an abort.
        assert!(model.repository().remove_edge(ProductId(3), ProductId(1)));
        assert_eq!(model.rebuild().unwrap().state, RebuildState::Idle);
        assert_eq!(model.node_at("1.").unwrap().display("Kind"), "part");
    }

    /// Repository whose root disappears once `gone` is set.
    struct Vanishing {
        inner: InMemoryRepository,
        gone: std::cell::Cell<bool>,
    }

    impl CompositionRepository for Vanishing {
        fn children(&self, product: ProductId) -> Vec<ChildEdge> {
            self.inner.children(product)
        }

        fn product(&self, product: ProductId) -> Option<ProductRef> {
            if self.gone.get() {
                return None;
            }
            self.inner.product(product)
        }
    }

    #[test]
    fn test_rebuild_unknown_root() {
        let repo = Vanishing {
            inner: repo(),
            gone: std::cell::Cell::new(false),
        };
        let mut model = TreeModel::new(repo, ProductAttributeResolver::default(), ProductId(1), TreeConfig::default())
            .unwrap();
        model.rebuild().unwrap();

        model.repository().gone.set(true);
        let result = model.rebuild();
        assert!(matches!(result, Err(ModelError::Build(BuildError::UnknownRoot(ProductId(1))))));
        assert_eq!(model.state(), RebuildState::Idle);
    }

    #[test]
    fn test_add_column_toggles() {
        let mut model = model(repo());
        let first = model.add_column(ColumnSpec::product_field("Kind", "kind"));
        let second = model.add_column(ColumnSpec::product_field("Kind", "kind"));
        assert_eq!(first, second);
        assert!(!model.headers().contains(&"Kind"));
        assert_eq!(model.node_at("").unwrap().display("Kind"), "assembly");
        assert!(model.toggle_column("Kind").unwrap());
        assert!(matches!(model.toggle_column("Nope"), Err(ModelError::UnknownColumn(_))));
    }

    #[test]
    fn test_search_remembered() {
        let mut model = model(repo());
        let hits = model.search("ar");
        assert_eq!(hits, vec![model.node_at("1.").unwrap().id()]);
        assert_eq!(model.search_column("BT", "Deno").len(), 1);
        assert_eq!(model.active_searches().len(), 2);
        model.clear_searches();
        assert!(model.active_searches().is_empty());
    }

    #[test]
    fn test_edit_kind() {
        let mut model = model(repo());
        let spec = ColumnSpec::product_field("Kind", "kind")
            .with_setting("catalog", "kinds")
            .with_editor(EditorKind::SingleSelect);
        model.add_column(spec);
        let arm = model.node_at("1.").unwrap().id();

        let mut session = model.begin_edit(arm, "Kind").unwrap();
        assert_eq!(session.kind(), EditorKind::SingleSelect);
        assert!(session.select("assembly"));
        model.commit_edit(arm, "Kind", &session.commit()).unwrap();

        assert_eq!(model.node(arm).unwrap().display("Kind"), "assembly");
        assert!(model.begin_edit(arm, "Name").is_none());
    }

    #[test]
    fn test_edit_read_only_column() {
        let mut model = model(repo());
        let commit = EditCommit {
            kind: EditorKind::PlainText,
            values: vec!["x".into()],
        };
        let root = model.root().unwrap().id();
        assert!(matches!(model.commit_edit(root, "Name", &commit), Err(ModelError::Edit(_))));
        assert!(matches!(model.commit_edit(NodeId(99), "Name", &commit), Err(ModelError::UnknownNode(_))));
    }

    #[test]
    fn test_find_product() {
        let model = model(repo());
        assert_eq!(model.find_product("BT").unwrap().id(), ProductId(3));
        assert!(model.find_product("nope").is_none());
        let bolt = model.node_at("1.1.").unwrap().id();
        assert_eq!(model.product_of(bolt).unwrap().id(), ProductId(3));
    }
}
