//! Composition tree construction
//!
//! [`TreeBuilder`] turns the edges reported by a [`CompositionRepository`]
//! into a fresh [`NodeArena`]. Children keep the order the repository returns
//! them in; nothing is sorted.

use crate::config::DEFAULT_MAX_DEPTH;
use crate::config::Direction;
use crate::config::TreeConfig;
use crate::error::BuildError;
use crate::error::CycleSuspected;
use crate::model::NodeArena;
use crate::model::NodeId;
use crate::model::ProductId;
use crate::model::ProductRef;
use crate::repository::CompositionRepository;

/// Result of one build.
///
/// A suspected cycle does not fail the build: the tree built so far is
/// returned together with the diagnostics.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub arena: NodeArena,
    /// One entry per over-limit node that still had edges, in build order.
    pub suspected: Vec<CycleSuspected>,
    /// Edges that produced a node.
    pub traversed_edges: usize,
    /// Edges dropped because the related product was unknown.
    pub skipped_edges: usize,
}

impl BuildOutcome {
    /// Returns the first cycle diagnostic, if any.
    pub fn cycle(&self) -> Option<&CycleSuspected> {
        self.suspected.first()
    }

    pub fn is_complete(&self) -> bool {
        self.suspected.is_empty()
    }
}

/// Builds composition trees from a repository.
///
/// # Example
///
/// ```
/// use bomview_lib::build::TreeBuilder;
/// use bomview_lib::model::ChildEdge;
/// use bomview_lib::model::Product;
/// use bomview_lib::model::ProductId;
/// use bomview_lib::repository::InMemoryRepository;
///
/// let repo = InMemoryRepository::new();
/// repo.insert_product(Product::new(1u64, "Frame", "FR"));
/// repo.insert_product(Product::new(2u64, "Arm", "AR"));
/// repo.add_edge(ProductId(1), ChildEdge::new(2u64).with_quantity(2));
///
/// let outcome = TreeBuilder::new(&repo).build(ProductId(1)).unwrap();
/// assert_eq!(outcome.arena.len(), 2);
/// assert_eq!(outcome.arena.find_by_path("1.").unwrap().deno(), "AR");
/// ```
#[derive(Debug)]
pub struct TreeBuilder<'a, R: ?Sized> {
    repository: &'a R,
    max_depth: usize,
    direction: Direction,
}

impl<'a, R> TreeBuilder<'a, R>
where
    R: CompositionRepository + ?Sized,
{
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            max_depth: DEFAULT_MAX_DEPTH,
            direction: Direction::default(),
        }
    }

    /// Takes depth limit and direction from a tree configuration.
    pub fn with_config(self, config: &TreeConfig) -> Self {
        self.with_max_depth(config.max_depth).with_direction(config.direction)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builds the tree below the product with id `root`.
    pub fn build(&self, root: ProductId) -> Result<BuildOutcome, BuildError> {
        let product = self
            .repository
            .product(root)
            .ok_or(BuildError::UnknownRoot(root))?;
        Ok(self.build_from(product))
    }

    /// Builds the tree below an already resolved root product.
    pub fn build_from(&self, root: ProductRef) -> BuildOutcome {
        let mut outcome = BuildOutcome::default();
        let root_id = outcome.arena.push_root(root);
        self.expand(&mut outcome, root_id);

        log::debug!(
            "Built {} nodes ({} edges traversed, {} skipped)",
            outcome.arena.len(),
            outcome.traversed_edges,
            outcome.skipped_edges
        );
        for cycle in &outcome.suspected {
            log::warn!("{}", cycle);
        }
        outcome
    }

    fn expand(&self, outcome: &mut BuildOutcome, parent: NodeId) {
        let Some(product) = outcome.arena.get(parent).map(|n| n.product_id()) else {
            return;
        };

        for edge in self.repository.edges(product, self.direction) {
            let Some(child) = self.repository.product(edge.product) else {
                log::warn!("Unknown product {} referenced by {}", edge.product, product);
                outcome.skipped_edges += 1;
                continue;
            };
            let Some(id) = outcome.arena.push_child(parent, child, edge.link()) else {
                continue;
            };
            outcome.traversed_edges += 1;

            let depth = outcome.arena.get(id).map(|n| n.depth()).unwrap_or_default();
            if depth < self.max_depth {
                self.expand(outcome, id);
            } else if !self.repository.edges(edge.product, self.direction).is_empty()
                && let Some(node) = outcome.arena.get(id)
            {
                outcome.suspected.push(CycleSuspected {
                    node: id,
                    product: node.product_id(),
                    name: node.name().to_string(),
                    deno: node.deno().to_string(),
                    depth,
                });
            }
        }
    }
}
