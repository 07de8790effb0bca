//! Serializable repository contents

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::ChildEdge;
use crate::model::Document;
use crate::model::Product;
use crate::model::ProductId;

/// One composition record in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub parent: ProductId,
    #[serde(flatten)]
    pub edge: ChildEdge,
}

/// Products, composition records and catalogs as loaded from JSON.
///
/// Edges keep their order per parent.
///
/// ```json
/// {
///   "products": [{"id": 1, "name": "Frame", "deno": "FR.100"}],
///   "edges": [{"parent": 1, "product": 2, "quantity": "2", "unit": "pcs"}],
///   "documents": [{"deno": "KT-1", "class_name": "TD"}],
///   "catalogs": {"kinds": ["assembly", "part"]}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// Documents that can be attached to products through edits.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Named option lists for single-select editors.
    #[serde(default)]
    pub catalogs: BTreeMap<String, Vec<String>>,
}
