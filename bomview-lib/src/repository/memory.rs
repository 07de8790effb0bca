//! In-memory repository using DashMap

use dashmap::DashMap;

use super::CompositionRepository;
use super::RepositorySnapshot;
use crate::column::ColumnSpec;
use crate::edit::EditCommit;
use crate::error::RepositoryError;
use crate::model::ChildEdge;
use crate::model::Document;
use crate::model::Product;
use crate::model::ProductId;
use crate::model::ProductRef;
use crate::resolve::Extraction;
use crate::resolve::ProductField;

/// A repository holding everything in memory.
///
/// Besides products and edges it owns the document catalog (documents keyed
/// by designation) and named option catalogs used by editors. Maps use
/// interior mutability so edits go through `&self`.
///
/// # Example
///
/// ```
/// use bomview_lib::model::ChildEdge;
/// use bomview_lib::model::Product;
/// use bomview_lib::model::ProductId;
/// use bomview_lib::repository::CompositionRepository;
/// use bomview_lib::repository::InMemoryRepository;
///
/// let repo = InMemoryRepository::new();
/// repo.insert_product(Product::new(1u64, "Frame", "FR.100"));
/// repo.insert_product(Product::new(2u64, "Arm", "AR.200"));
/// repo.add_edge(ProductId(1), ChildEdge::new(2u64));
///
/// assert_eq!(repo.children(ProductId(1)).len(), 1);
/// assert_eq!(repo.parents(ProductId(2))[0].product, ProductId(1));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    products: DashMap<ProductId, ProductRef>,
    by_deno: DashMap<String, ProductId>,
    children: DashMap<ProductId, Vec<ChildEdge>>,
    parents: DashMap<ProductId, Vec<ChildEdge>>,
    documents: DashMap<String, Document>,
    catalogs: DashMap<String, Vec<String>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot. Edges whose parent is unknown are rejected.
    pub fn from_snapshot(snapshot: RepositorySnapshot) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        for product in snapshot.products {
            repo.insert_product(product);
        }
        for record in snapshot.edges {
            if !repo.products.contains_key(&record.parent) {
                return Err(RepositoryError::UnknownProduct(record.parent));
            }
            repo.add_edge(record.parent, record.edge);
        }
        for document in snapshot.documents {
            repo.insert_document(document);
        }
        for (name, options) in snapshot.catalogs {
            repo.set_catalog(name, options);
        }
        log::info!(
            "Repository loaded: {} products, {} documents",
            repo.products.len(),
            repo.documents.len()
        );
        Ok(repo)
    }

    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        let snapshot: RepositorySnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Inserts or replaces a product and returns its shared handle.
    ///
    /// Replacing keeps the existing handle so nodes built earlier see the
    /// new record.
    pub fn insert_product(&self, product: Product) -> ProductRef {
        let id = product.id;
        self.by_deno.insert(product.deno.clone(), id);
        if let Some(existing) = self.products.get(&id) {
            let handle = existing.value().clone();
            drop(existing);
            handle.update(|p| *p = product);
            return handle;
        }
        let handle = ProductRef::new(product);
        self.products.insert(id, handle.clone());
        handle
    }

    /// Appends a composition edge below the existing edges of `parent`.
    pub fn add_edge(&self, parent: ProductId, edge: ChildEdge) {
        let reverse = ChildEdge {
            product: parent,
            ..edge.clone()
        };
        self.parents.entry(edge.product).or_default().push(reverse);
        self.children.entry(parent).or_default().push(edge);
    }

    /// Removes every edge from `parent` to `child`. Returns `true` if any existed.
    pub fn remove_edge(&self, parent: ProductId, child: ProductId) -> bool {
        let removed = match self.children.get_mut(&parent) {
            Some(mut edges) => {
                let before = edges.len();
                edges.retain(|e| e.product != child);
                before != edges.len()
            }
            None => false,
        };
        if let Some(mut edges) = self.parents.get_mut(&child) {
            edges.retain(|e| e.product != parent);
        }
        removed
    }

    /// Adds or replaces a catalog document.
    pub fn insert_document(&self, document: Document) {
        self.documents.insert(document.deno.clone(), document);
    }

    /// Looks up a catalog document by designation.
    pub fn document(&self, deno: &str) -> Option<Document> {
        self.documents.get(deno).map(|d| d.value().clone())
    }

    /// Sets a named option list.
    pub fn set_catalog(&self, name: impl Into<String>, options: Vec<String>) {
        self.catalogs.insert(name.into(), options);
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn replace_documents(&self, product: &ProductRef, extraction: &Extraction, values: &[String]) -> Result<(), RepositoryError> {
        let selected = values
            .iter()
            .map(|deno| self.document(deno).ok_or_else(|| RepositoryError::UnknownDocument(deno.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let filter = extraction.document_filter().cloned().unwrap_or_default();

        product.update(|p| {
            p.documents.retain(|d| !filter.matches(d));
            p.documents.extend(selected);
        });
        Ok(())
    }
}

impl CompositionRepository for InMemoryRepository {
    fn children(&self, product: ProductId) -> Vec<ChildEdge> {
        self.children.get(&product).map(|e| e.value().clone()).unwrap_or_default()
    }

    fn parents(&self, product: ProductId) -> Vec<ChildEdge> {
        self.parents.get(&product).map(|e| e.value().clone()).unwrap_or_default()
    }

    fn product(&self, product: ProductId) -> Option<ProductRef> {
        self.products.get(&product).map(|p| p.value().clone())
    }

    fn find_by_deno(&self, deno: &str) -> Option<ProductRef> {
        let id = *self.by_deno.get(deno)?.value();
        self.product(id)
    }

    fn edit_catalog(&self, spec: &ColumnSpec) -> Vec<String> {
        if let Some(name) = spec.setting_str("catalog") {
            return self.catalogs.get(name).map(|c| c.value().clone()).unwrap_or_default();
        }

        let Ok(extraction) = Extraction::from_spec(spec) else {
            return Vec::new();
        };
        let Some(filter) = extraction.document_filter() else {
            return Vec::new();
        };
        let mut denos: Vec<String> = self
            .documents
            .iter()
            .filter(|d| filter.matches(d.value()))
            .map(|d| d.key().clone())
            .collect();
        denos.sort();
        denos
    }

    fn apply_edit(&self, product: &ProductRef, spec: &ColumnSpec, commit: &EditCommit) -> Result<(), RepositoryError> {
        let extraction = Extraction::from_spec(spec)?;
        match extraction {
            Extraction::Product(ProductField::Kind) => {
                let kind = commit.first().filter(|k| !k.is_empty()).map(str::to_string);
                product.update(|p| p.kind = kind);
                Ok(())
            }
            Extraction::Document { .. } => self.replace_documents(product, &extraction, &commit.values),
            Extraction::Product(_) => Err(RepositoryError::read_only(&spec.header)),
        }
    }
}
