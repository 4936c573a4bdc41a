//! Tracker configuration.
//!
//! Configuration is looked up in order:
//! 1. `<workspace>/.changetrail.json`
//! 2. `<config dir>/changetrail/config.json`
//! 3. built-in defaults
//!
//! Every field has a default, so partial files are accepted.

use crate::core::dirs::get_config_directory;
use crate::core::error::{ChangetrailError, Result};
use crate::core::file_type::FileType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = ".changetrail.json";

/// What the very first `detect_changes` reports when no baseline exists yet
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FirstRunPolicy {
    /// Record the baseline and report nothing
    #[default]
    Empty,
    /// Report every current file as ADDED
    ReportAll,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ValidationThresholds {
    pub scan_time_ms: u64,
    pub state_gen_ms: u64,
    pub cache_hit_rate: f64,
    pub memory_mb: f64,
    pub response_time_ms: u64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            scan_time_ms: 5000,
            state_gen_ms: 1000,
            cache_hit_rate: 0.80,
            memory_mb: 50.0,
            response_time_ms: 50,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory names pruned from every scan, at any depth
    pub ignored_dirs: Vec<String>,
    /// File names skipped at any depth
    pub ignored_files: Vec<String>,
    /// Types whose changes are always HIGH impact
    pub critical_types: Vec<FileType>,
    /// Files above this many bytes are HIGH impact
    pub large_file_threshold: u64,
    pub first_run: FirstRunPolicy,
    /// Relative to the workspace root unless absolute
    pub changelog_path: PathBuf,
    /// Upper bound on follow-up changes accepted by the post-response sync check
    pub max_sync_changes: usize,
    pub thresholds: ValidationThresholds,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: [
                ".git",
                ".hg",
                ".svn",
                "__pycache__",
                ".mypy_cache",
                ".pytest_cache",
                ".venv",
                "node_modules",
                "target",
                ".idea",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignored_files: vec!["Changelog.md".to_string(), ".DS_Store".to_string()],
            critical_types: vec![FileType::Config],
            large_file_threshold: 10_000,
            first_run: FirstRunPolicy::Empty,
            changelog_path: PathBuf::from("Changelog.md"),
            max_sync_changes: 100,
            thresholds: ValidationThresholds::default(),
        }
    }
}

impl TrackerConfig {
    /// Load the configuration that applies to a workspace
    pub fn load(root: &Path) -> Result<Self> {
        let workspace_file = root.join(WORKSPACE_CONFIG_FILE);
        if workspace_file.is_file() {
            log::debug!("Loading workspace config: {}", workspace_file.display());
            return Self::load_from(&workspace_file);
        }

        match get_config_directory() {
            Ok(dir) => {
                let global_file = dir.join("config.json");
                if global_file.is_file() {
                    log::debug!("Loading global config: {}", global_file.display());
                    return Self::load_from(&global_file);
                }
            }
            Err(e) => log::debug!("No global config directory: {e}"),
        }

        log::debug!("Using default configuration");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChangetrailError::config_read(path, e))?;
        serde_json::from_str(&content).map_err(|e| ChangetrailError::config_parse(path, e))
    }

    /// Write this configuration as the workspace config file
    pub fn save_to_workspace(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(WORKSPACE_CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Changelog location resolved against the workspace root
    pub fn resolve_changelog_path(&self, root: &Path) -> PathBuf {
        if self.changelog_path.is_absolute() {
            self.changelog_path.clone()
        } else {
            root.join(&self.changelog_path)
        }
    }

    pub fn is_critical(&self, file_type: FileType) -> bool {
        self.critical_types.contains(&file_type)
    }
}
