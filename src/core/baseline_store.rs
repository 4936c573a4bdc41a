//! Persisted baseline snapshots.
//!
//! Every CLI invocation is a fresh process, so the baseline that `detect_changes` diffs
//! against is stored on disk between runs:
//!
//! ```text
//! <cache dir>/changetrail/<md5 of workspace root>/baseline.json
//! ```
//!
//! A file that cannot be parsed, or whose snapshot fails verification, is reported as
//! [`ChangetrailError::CacheCorrupted`].

use crate::core::dirs::get_cache_directory;
use crate::core::error::{ChangetrailError, Result};
use crate::core::state::WorkspaceState;
use std::fs;
use std::path::{Path, PathBuf};

const BASELINE_FILE: &str = "baseline.json";

#[derive(Debug, Clone)]
pub struct BaselineStore {
    dir: PathBuf,
}

impl BaselineStore {
    /// Store for a workspace root, under the user cache directory
    pub fn for_root(root: &Path) -> Result<Self> {
        let cache_home = get_cache_directory().map_err(|e| {
            log::warn!("Failed to determine cache directory: {e}");
            e
        })?;

        let root_hash = format!("{:x}", md5::compute(root.to_string_lossy().as_bytes()));
        log::debug!("BaselineStore: root = {root:?}, root_hash = {root_hash}");

        Ok(Self::at(cache_home.join(root_hash)))
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(BASELINE_FILE)
    }

    /// Load the persisted baseline, `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<WorkspaceState>> {
        let path = self.path();
        if !path.exists() {
            log::debug!("No persisted baseline at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read baseline '{}': {}", path.display(), e);
            ChangetrailError::cache_corrupted(&path, e.to_string())
        })?;

        let state: WorkspaceState = serde_json::from_str(&content).map_err(|e| {
            log::error!("Failed to parse baseline '{}': {}", path.display(), e);
            ChangetrailError::cache_corrupted(&path, e.to_string())
        })?;

        state
            .verify()
            .map_err(|reason| ChangetrailError::cache_corrupted(&path, reason))?;

        log::debug!(
            "Loaded baseline {} ({} files)",
            state.short_hash(),
            state.total_files
        );
        Ok(Some(state))
    }

    pub fn save(&self, state: &WorkspaceState) -> Result<()> {
        let path = self.path();

        fs::create_dir_all(&self.dir).map_err(|e| {
            log::error!(
                "Failed to create cache directory '{}': {}",
                self.dir.display(),
                e
            );
            ChangetrailError::baseline_write(&self.dir, e)
        })?;

        let json = serde_json::to_string(state)?;
        fs::write(&path, json).map_err(|e| ChangetrailError::baseline_write(&path, e))?;

        log::debug!("Saved baseline {} to {}", state.short_hash(), path.display());
        Ok(())
    }

    /// Remove the persisted baseline; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed baseline {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ChangetrailError::baseline_write(&path, e)),
        }
    }
}
