//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "bomview";
const APPLICATION: &str = "bomview";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory holding rotated log files.
///
/// - Linux: `$XDG_CACHE_HOME/bomview` or `~/.cache/bomview`
/// - macOS: `~/Library/Caches/org.bomview.bomview`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding `settings.json`.
///
/// - Linux: `$XDG_CONFIG_HOME/bomview` or `~/.config/bomview`
/// - macOS: `~/Library/Application Support/org.bomview.bomview`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}
