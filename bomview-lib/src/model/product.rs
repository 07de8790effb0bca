//! Product records and composition edges

use std::sync::Arc;
use std::sync::RwLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// Identity of a product in the composition repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A document attached to a product (drawing, route card, process card).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document designation, unique within the catalog.
    pub deno: String,
    /// Document title.
    #[serde(default)]
    pub name: String,
    /// Document class, e.g. "TD".
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
    /// Short sign shown in document columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    /// Date of the last revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Other products this document also covers (complex documents).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covers: Vec<ProductId>,
}

impl Document {
    /// Creates a new document of the given class.
    pub fn new(deno: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            deno: deno.into(),
            name: String::new(),
            class_name: class_name.into(),
            subtype_name: None,
            organization_code: None,
            sign: None,
            date: None,
            covers: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_subtype(mut self, subtype_name: impl Into<String>) -> Self {
        self.subtype_name = Some(subtype_name.into());
        self
    }

    pub fn with_organization(mut self, code: impl Into<String>) -> Self {
        self.organization_code = Some(code.into());
        self
    }

    pub fn with_sign(mut self, sign: impl Into<String>) -> Self {
        self.sign = Some(sign.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Marks other products as covered by this document.
    pub fn covering(mut self, products: impl IntoIterator<Item = ProductId>) -> Self {
        self.covers.extend(products);
        self
    }
}

/// A product record as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Designation code.
    pub deno: String,
    /// Product kind (assembly, part, purchased item...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<Document>,
}

impl Product {
    /// Creates a new product without kind or documents.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, deno: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deno: deno.into(),
            kind: None,
            documents: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }
}

/// Shared handle to a product owned by the repository.
///
/// Nodes hold handles rather than copies, so edits made through the
/// repository are visible to every node showing the product.
#[derive(Debug, Clone)]
pub struct ProductRef(Arc<RwLock<Product>>);

impl ProductRef {
    /// Wraps a product in a new shared handle.
    pub fn new(product: Product) -> Self {
        Self(Arc::new(RwLock::new(product)))
    }

    /// Runs `f` with read access to the product.
    pub fn with<R>(&self, f: impl FnOnce(&Product) -> R) -> R {
        match self.0.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Runs `f` with write access to the product.
    pub fn update<R>(&self, f: impl FnOnce(&mut Product) -> R) -> R {
        match self.0.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn id(&self) -> ProductId {
        self.with(|p| p.id)
    }

    pub fn name(&self) -> String {
        self.with(|p| p.name.clone())
    }

    pub fn deno(&self) -> String {
        self.with(|p| p.deno.clone())
    }

    /// Returns a detached copy of the current record.
    pub fn snapshot(&self) -> Product {
        self.with(Product::clone)
    }

    /// Returns `true` if both handles point to the same record.
    pub fn same(&self, other: &ProductRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Product> for ProductRef {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}

/// One parent→child composition record as returned by the repository.
///
/// The attributes describe the relationship, not the product: the same part
/// can appear under two assemblies with different quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEdge {
    /// The related product (child, or parent for where-used queries).
    pub product: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ChildEdge {
    /// Creates an edge to `product` without relationship attributes.
    pub fn new(product: impl Into<ProductId>) -> Self {
        Self {
            product: product.into(),
            child_type: None,
            quantity: None,
            unit: None,
        }
    }

    pub fn with_type(mut self, child_type: impl Into<String>) -> Self {
        self.child_type = Some(child_type.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<Decimal>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Returns the relationship attributes of this edge.
    pub fn link(&self) -> Link {
        Link {
            child_type: self.child_type.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
        }
    }
}

/// Relationship attributes carried by a node (empty for the root).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub child_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ref_shares_updates() {
        let product = ProductRef::new(Product::new(1u64, "Bracket", "AB.001"));
        let other = product.clone();

        product.update(|p| p.kind = Some("part".to_string()));

        assert!(product.same(&other));
        assert_eq!(other.with(|p| p.kind.clone()), Some("part".to_string()));
    }

    #[test]
    fn test_edge_link() {
        let edge = ChildEdge::new(7u64)
            .with_type("assembly")
            .with_quantity(Decimal::from(2))
            .with_unit("pcs");
        let link = edge.link();
        assert_eq!(link.child_type.as_deref(), Some("assembly"));
        assert_eq!(link.quantity, Some(Decimal::from(2)));
        assert_eq!(link.unit.as_deref(), Some("pcs"));
    }

    #[test]
    fn test_edge_deserialize_minimal() {
        let edge: ChildEdge = serde_json::from_str(r#"{"product": 3}"#).unwrap();
        assert_eq!(edge, ChildEdge::new(3u64));
    }
}
