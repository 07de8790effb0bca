//! Persistent command line settings.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use bomview_lib::column::ColumnSpec;
use bomview_lib::config::TreeConfig;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;

/// Contents of `settings.json`; command line flags take precedence.
///
/// ```json
/// {
///   "tree": {"max_depth": 30, "expand_level": 2},
///   "columns": [{"header": "Kind", "settings": {"source": "product", "field": "kind"}}],
///   "max_logs": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tree: TreeConfig,
    /// Columns added after the first build, before command line columns.
    pub columns: Vec<ColumnSpec>,
    /// Archived log files kept next to `latest.log`.
    pub max_logs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            columns: Vec::new(),
            max_logs: 10,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No settings at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(CliError::read(path, e)),
        };
        serde_json::from_str(&text).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::load(Path::new("/nonexistent/bomview/settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_partial() {
        let json = r#"{"tree": {"expand_level": 3}, "columns": [{"header": "Kind", "settings": {"source": "product", "field": "kind"}}]}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tree.expand_level, 3);
        assert_eq!(settings.tree.max_depth, 30);
        assert_eq!(settings.columns[0].header, "Kind");
        assert_eq!(settings.max_logs, 10);
    }

    #[test]
    fn test_max_logs() {
        let settings: Settings = serde_json::from_str(r#"{"max_logs": 3}"#).unwrap();
        assert_eq!(settings.max_logs, 3);
        assert!(settings.columns.is_empty());
    }
}
