// src/config.rs

//! Application configuration, read from `fieldboard.yml` next to the binary.
//! Every knob has a sensible default so the file is optional; a malformed
//! file is logged and ignored rather than refusing to start.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::log_warn;

pub const DEFAULT_CONFIG_PATH: &str = "fieldboard.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldboardConfig {
    /// Items per board column.
    pub pip_capacity: usize,
    /// Items per form column.
    pub field_capacity: usize,
    /// Board columns shown per page; page size is this times `pip_capacity`.
    pub pip_cols_per_page: usize,
    /// Window for coalescing layout-changed signals into one rebalance.
    pub debounce_ms: u64,
    /// Descriptors materialized per tick while the catalog builds.
    pub build_batch: usize,
    /// Primary key/value state directory.
    pub state_dir: String,
    /// Fallback state directory, read when the primary has no value.
    pub fallback_state_dir: String,
    /// Optional YAML field catalog overriding the built-in one.
    pub catalog_file: Option<String>,
}

impl Default for FieldboardConfig {
    fn default() -> Self {
        Self {
            pip_capacity: 20,
            field_capacity: 10,
            pip_cols_per_page: 3,
            debounce_ms: 150,
            build_batch: 50,
            state_dir: "./state".to_string(),
            fallback_state_dir: "./state-fallback".to_string(),
            catalog_file: None,
        }
    }
}

impl FieldboardConfig {
    /// Loads the config file, falling back to defaults when it is missing or
    /// unreadable. Parse errors are logged, never fatal.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Board page size in pips.
    pub fn pips_per_page(&self) -> usize {
        self.pip_cols_per_page * self.pip_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = FieldboardConfig::load(Path::new("./does-not-exist.yml"));
        assert_eq!(config.pip_capacity, 20);
        assert_eq!(config.field_capacity, 10);
        assert_eq!(config.pips_per_page(), 60);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldboard.yml");
        std::fs::write(&path, "pip_capacity: 8\ndebounce_ms: 10\n").unwrap();

        let config = FieldboardConfig::load(&path);
        assert_eq!(config.pip_capacity, 8);
        assert_eq!(config.debounce_ms, 10);
        assert_eq!(config.field_capacity, 10);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldboard.yml");
        std::fs::write(&path, "pip_capacity: [not a number\n").unwrap();

        let config = FieldboardConfig::load(&path);
        assert_eq!(config.pip_capacity, 20);
    }
}
