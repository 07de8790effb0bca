//! Composition repository
//!
//! The tree never reads product data from ambient state. Everything it needs
//! comes through a [`CompositionRepository`] passed in by the caller.

mod memory;
mod snapshot;

pub use memory::*;
pub use snapshot::*;

use crate::column::ColumnSpec;
use crate::config::Direction;
use crate::edit::EditCommit;
use crate::error::RepositoryError;
use crate::model::ChildEdge;
use crate::model::ProductId;
use crate::model::ProductRef;

/// Source of products and their composition edges.
///
/// The order of the edges returned for a product determines the index paths
/// of the built nodes and must not change during one build.
pub trait CompositionRepository {
    /// Ordered components of `product`.
    fn children(&self, product: ProductId) -> Vec<ChildEdge>;

    /// Ordered assemblies using `product`, for where-used trees.
    fn parents(&self, _product: ProductId) -> Vec<ChildEdge> {
        Vec::new()
    }

    /// Looks up a product handle.
    fn product(&self, product: ProductId) -> Option<ProductRef>;

    /// Looks up a product by designation.
    fn find_by_deno(&self, _deno: &str) -> Option<ProductRef> {
        None
    }

    /// Options offered by the editor of an editable column.
    fn edit_catalog(&self, _spec: &ColumnSpec) -> Vec<String> {
        Vec::new()
    }

    /// Applies a committed cell edit to the product behind the cell.
    fn apply_edit(&self, _product: &ProductRef, spec: &ColumnSpec, _commit: &EditCommit) -> Result<(), RepositoryError> {
        Err(RepositoryError::read_only(&spec.header))
    }

    /// Edges followed from `product` in the given direction.
    fn edges(&self, product: ProductId, direction: Direction) -> Vec<ChildEdge> {
        match direction {
            Direction::Composition => self.children(product),
            Direction::WhereUsed => self.parents(product),
        }
    }
}

impl<R: CompositionRepository + ?Sized> CompositionRepository for &R {
    fn children(&self, product: ProductId) -> Vec<ChildEdge> {
        (**self).children(product)
    }

    fn parents(&self, product: ProductId) -> Vec<ChildEdge> {
        (**self).parents(product)
    }

    fn product(&self, product: ProductId) -> Option<ProductRef> {
        (**self).product(product)
    }

    fn find_by_deno(&self, deno: &str) -> Option<ProductRef> {
        (**self).find_by_deno(deno)
    }

    fn edit_catalog(&self, spec: &ColumnSpec) -> Vec<String> {
        (**self).edit_catalog(spec)
    }

    fn apply_edit(&self, product: &ProductRef, spec: &ColumnSpec, commit: &EditCommit) -> Result<(), RepositoryError> {
        (**self).apply_edit(product, spec, commit)
    }
}
