//! Column specifications

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::edit::EditorKind;

/// Describes a dynamically added column.
///
/// `settings` is handed to the attribute resolver unchanged; the projector
/// only reads `header` and `editor`.
///
/// # Example
///
/// ```
/// use bomview_lib::column::ColumnSpec;
///
/// let spec = ColumnSpec::new("Route card")
///     .with_setting("source", "document")
///     .with_setting("class_name", "TD")
///     .with_setting("aggregate", true);
/// assert!(spec.flag("aggregate"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Unique display name.
    pub header: String,
    /// Extraction settings passed to the resolver.
    #[serde(default)]
    pub settings: Map<String, Value>,
    /// Editor used for cells of this column, if editable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorKind>,
}

impl ColumnSpec {
    /// Creates a spec with no settings.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            settings: Map::new(),
            editor: None,
        }
    }

    /// Creates a spec extracting a product field (`name`, `deno`, `kind`).
    pub fn product_field(header: impl Into<String>, field: &str) -> Self {
        Self::new(header)
            .with_setting("source", "product")
            .with_setting("field", field)
    }

    /// Creates a spec extracting document signs of one class.
    pub fn document(header: impl Into<String>, class_name: &str) -> Self {
        Self::new(header)
            .with_setting("source", "document")
            .with_setting("class_name", class_name)
    }

    /// Adds or replaces one setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_editor(mut self, editor: EditorKind) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Returns a string setting, `None` if absent or not a string.
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }

    /// Returns a boolean setting, `false` if absent.
    pub fn flag(&self, key: &str) -> bool {
        self.settings.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}
