//! Attribute resolution errors

use crate::model::ProductId;

/// Errors raised while resolving one cell.
///
/// These never abort a projection: the affected cell is left empty and the
/// walk continues with the next node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The column specification cannot be interpreted.
    #[error("Column '{header}': invalid specification: {reason}")]
    InvalidSpec { header: String, reason: String },

    /// The column names a field the resolver does not know.
    #[error("Column '{header}': unknown field '{field}'")]
    UnknownField { header: String, field: String },

    /// The resolver failed for one product.
    #[error("Attribute resolution failed for product {product}: {message}")]
    Failed { product: ProductId, message: String },
}

impl ResolveError {
    /// Creates a new invalid specification error.
    pub fn invalid_spec(header: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            header: header.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unknown field error.
    pub fn unknown_field(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            header: header.into(),
            field: field.into(),
        }
    }

    /// Creates a new resolution failure for a product.
    pub fn failed(product: ProductId, message: impl Into<String>) -> Self {
        Self::Failed {
            product,
            message: message.into(),
        }
    }
}
