//! Resolver over product records and their documents

use super::AttributeResolver;
use super::Contribution;
use super::DocumentField;
use super::Extraction;
use super::ProductField;
use super::Resolution;
use crate::column::ColumnSpec;
use crate::error::ResolveError;
use crate::model::AttributeValue;
use crate::model::Document;
use crate::model::Product;

const DEFAULT_PREFIX: &str = "Part of";

/// Resolves columns from the fields and documents of a [`Product`].
///
/// Document columns with `aggregate` set also report, for each matching
/// document that covers other products, a `"Part of <document>"` line owed
/// to each covered product.
#[derive(Debug, Clone)]
pub struct ProductAttributeResolver {
    prefix: String,
}

impl Default for ProductAttributeResolver {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl ProductAttributeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text placed before the document designation in aggregated lines.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn document_value(documents: &[&Document], field: DocumentField) -> AttributeValue {
        if field == DocumentField::Date {
            return documents.iter().filter_map(|d| d.date).max().into();
        }

        let lines: Vec<&str> = documents
            .iter()
            .map(|d| match field {
                DocumentField::Deno => d.deno.as_str(),
                DocumentField::Name => d.name.as_str(),
                _ => d.sign.as_deref().unwrap_or(&d.deno),
            })
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            AttributeValue::None
        } else {
            AttributeValue::Text(lines.join("\n"))
        }
    }
}

impl AttributeResolver for ProductAttributeResolver {
    fn resolve(&self, product: &Product, spec: &ColumnSpec) -> Result<Resolution, ResolveError> {
        match Extraction::from_spec(spec)? {
            Extraction::Product(field) => Ok(Resolution::value(match field {
                ProductField::Name => AttributeValue::from(product.name.as_str()),
                ProductField::Deno => AttributeValue::from(product.deno.as_str()),
                ProductField::Kind => AttributeValue::from(product.kind.clone()),
            })),
            Extraction::Document {
                filter,
                field,
                first_only,
                aggregate,
            } => {
                let limit = if first_only { 1 } else { usize::MAX };
                let documents: Vec<&Document> = product
                    .documents
                    .iter()
                    .filter(|d| filter.matches(d))
                    .take(limit)
                    .collect();
                let value = Self::document_value(&documents, field);

                if !aggregate {
                    return Ok(Resolution::Value(value));
                }

                let contributions = documents
                    .iter()
                    .flat_map(|d| {
                        d.covers
                            .iter()
                            .filter(|covered| **covered != product.id)
                            .map(|covered| Contribution::new(*covered, format!("{} {}", self.prefix, d.deno)))
                    })
                    .collect();
                Ok(Resolution::Aggregated { value, contributions })
            }
        }
    }
}
