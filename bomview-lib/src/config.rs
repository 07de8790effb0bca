//! Tree configuration

use serde::Deserialize;
use serde::Serialize;

/// Default recursion limit for building, projecting and searching.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Default number of levels expanded after the first build.
pub const DEFAULT_EXPAND_LEVEL: usize = 1;

/// Which relationship the tree follows away from its root product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Root is an assembly; children are its components.
    #[default]
    Composition,
    /// Root is a component; children are the assemblies that use it.
    WhereUsed,
}

/// Display names of the built-in columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLabels {
    pub index: String,
    pub level: String,
    pub name: String,
    pub deno: String,
    pub child_type: String,
    pub quantity: String,
    pub unit: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            index: "Index".to_string(),
            level: "Level".to_string(),
            name: "Name".to_string(),
            deno: "Deno".to_string(),
            child_type: "Type".to_string(),
            quantity: "Qty".to_string(),
            unit: "Unit".to_string(),
        }
    }
}

/// Configuration for building and presenting a composition tree.
///
/// # Example
///
/// ```
/// use bomview_lib::config::Direction;
/// use bomview_lib::config::TreeConfig;
///
/// let config = TreeConfig::default()
///     .with_max_depth(12)
///     .with_direction(Direction::WhereUsed);
/// assert_eq!(config.max_depth, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Depth at which recursion stops and a cycle is suspected.
    ///
    /// Default: 30
    pub max_depth: usize,

    /// Levels expanded after the first build (0 collapses everything).
    ///
    /// Default: 1
    pub expand_level: usize,

    /// Relationship followed from the root product.
    pub direction: Direction,

    /// Headers of the built-in columns.
    pub headers: HeaderLabels,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            expand_level: DEFAULT_EXPAND_LEVEL,
            direction: Direction::default(),
            headers: HeaderLabels::default(),
        }
    }
}

impl TreeConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recursion limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of levels expanded after the first build.
    pub fn with_expand_level(mut self, level: usize) -> Self {
        self.expand_level = level;
        self
    }

    /// Sets the relationship followed from the root.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Replaces the built-in column headers.
    pub fn with_headers(mut self, headers: HeaderLabels) -> Self {
        self.headers = headers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeConfig::default();
        assert_eq!(config.max_depth, 30);
        assert_eq!(config.expand_level, 1);
        assert_eq!(config.direction, Direction::Composition);
        assert_eq!(config.headers.deno, "Deno");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TreeConfig =
            serde_json::from_str(r#"{"max_depth": 5, "direction": "where_used"}"#).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.expand_level, 1);
        assert_eq!(config.direction, Direction::WhereUsed);
        assert_eq!(config.headers, HeaderLabels::default());
    }
}
