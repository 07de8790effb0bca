//! Attribute resolution
//!
//! The projector does not know what a column means. It hands each product and
//! the column's [`ColumnSpec`] to an [`AttributeResolver`] and stores what
//! comes back.

mod extraction;
mod product;

pub use extraction::*;
pub use product::*;

use crate::column::ColumnSpec;
use crate::error::ResolveError;
use crate::model::AttributeValue;
use crate::model::Product;
use crate::model::ProductId;

/// Text a product contributes to the cell of a related product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// The product whose cell receives the text.
    pub product: ProductId,
    pub text: String,
}

impl Contribution {
    pub fn new(product: ProductId, text: impl Into<String>) -> Self {
        Self {
            product,
            text: text.into(),
        }
    }
}

/// Result of resolving one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A plain value for this product.
    Value(AttributeValue),
    /// A value plus lines owed to related products.
    ///
    /// The projector merges contributed lines into the related products'
    /// cells when the walk reaches them, and prepends lines owed to this
    /// product to `value`.
    Aggregated {
        value: AttributeValue,
        contributions: Vec<Contribution>,
    },
}

impl Resolution {
    /// Creates a plain value resolution.
    pub fn value(value: impl Into<AttributeValue>) -> Self {
        Resolution::Value(value.into())
    }

    /// Creates an empty resolution that clears the cell.
    pub fn none() -> Self {
        Resolution::Value(AttributeValue::None)
    }
}

/// Computes column values for products.
pub trait AttributeResolver {
    /// Resolves the value of `spec` for `product`.
    fn resolve(&self, product: &Product, spec: &ColumnSpec) -> Result<Resolution, ResolveError>;
}

impl<F> AttributeResolver for F
where
    F: Fn(&Product, &ColumnSpec) -> Result<Resolution, ResolveError>,
{
    fn resolve(&self, product: &Product, spec: &ColumnSpec) -> Result<Resolution, ResolveError> {
        self(product, spec)
    }
}
