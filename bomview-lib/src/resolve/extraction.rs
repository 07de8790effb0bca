//! Interpretation of column settings

use crate::column::ColumnSpec;
use crate::error::ResolveError;
use crate::model::Document;

/// Product fields available to product columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Deno,
    Kind,
}

/// Document fields available to document columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    Deno,
    Name,
    /// The short sign, falling back to the designation.
    Sign,
    /// Latest revision date among matching documents.
    Date,
}

/// Selects the documents a column looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub class_name: Option<String>,
    pub subtype_name: Option<String>,
    pub organization_code: Option<String>,
}

impl DocumentFilter {
    /// Returns `true` if every configured criterion matches.
    pub fn matches(&self, document: &Document) -> bool {
        self.class_name
            .as_deref()
            .is_none_or(|c| c == document.class_name)
            && self
                .subtype_name
                .as_deref()
                .is_none_or(|s| document.subtype_name.as_deref() == Some(s))
            && self
                .organization_code
                .as_deref()
                .is_none_or(|o| document.organization_code.as_deref() == Some(o))
    }
}

/// What a column extracts, parsed from its settings.
///
/// Settings keys:
/// - `source`: `"product"` or `"document"`
/// - `field`: product field (`name`, `deno`, `kind`) or document field
///   (`deno`, `name`, `sign`, `date`; default `sign`)
/// - `class_name`, `subtype_name`, `organization_code`: document filter
/// - `first`: only the first matching document
/// - `aggregate`: documents covering other products contribute to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Product(ProductField),
    Document {
        filter: DocumentFilter,
        field: DocumentField,
        first_only: bool,
        aggregate: bool,
    },
}

impl Extraction {
    /// Parses the settings of `spec`.
    pub fn from_spec(spec: &ColumnSpec) -> Result<Self, ResolveError> {
        let source = spec
            .setting_str("source")
            .ok_or_else(|| ResolveError::invalid_spec(&spec.header, "missing 'source'"))?;

        match source {
            "product" => {
                let field = spec
                    .setting_str("field")
                    .ok_or_else(|| ResolveError::invalid_spec(&spec.header, "missing 'field'"))?;
                let field = match field {
                    "name" => ProductField::Name,
                    "deno" => ProductField::Deno,
                    "kind" => ProductField::Kind,
                    other => return Err(ResolveError::unknown_field(&spec.header, other)),
                };
                Ok(Extraction::Product(field))
            }
            "document" => {
                let field = match spec.setting_str("field").unwrap_or("sign") {
                    "deno" => DocumentField::Deno,
                    "name" => DocumentField::Name,
                    "sign" => DocumentField::Sign,
                    "date" => DocumentField::Date,
                    other => return Err(ResolveError::unknown_field(&spec.header, other)),
                };
                Ok(Extraction::Document {
                    filter: DocumentFilter {
                        class_name: spec.setting_str("class_name").map(str::to_string),
                        subtype_name: spec.setting_str("subtype_name").map(str::to_string),
                        organization_code: spec.setting_str("organization_code").map(str::to_string),
                    },
                    field,
                    first_only: spec.flag("first"),
                    aggregate: spec.flag("aggregate"),
                })
            }
            other => Err(ResolveError::invalid_spec(
                &spec.header,
                format!("unknown source '{other}'"),
            )),
        }
    }

    /// Returns the document filter for document extractions.
    pub fn document_filter(&self) -> Option<&DocumentFilter> {
        match self {
            Extraction::Document { filter, .. } => Some(filter),
            Extraction::Product(_) => None,
        }
    }
}
