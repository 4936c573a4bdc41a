//! Centralized initialization for workspace commands.
//!
//! Every CLI command starts the same way: resolve the workspace root, load its
//! configuration and locate its persisted baseline. [`WorkspaceCommandInit`] does this
//! once and hands back a [`WorkspaceCommandContext`] that builds managers and engines
//! with the baseline already restored.
//!
//! # Initialization Steps
//! 1. **Root resolution**: `--root` or the current directory, validated and canonicalized
//! 2. **Configuration**: workspace file, then global file, then defaults
//! 3. **Baseline store**: per-root JSON file under the cache directory
//!
//! # Error Handling
//! - **Bad root**: returned to the caller as `ChangetrailError::RootNotFound` or
//!   `ChangetrailError::RootNotDirectory`
//! - **Corrupted baseline**: reported as a warning, removed, and treated as absent

use crate::core::{
    baseline_store::BaselineStore,
    changelog::ChangelogEngine,
    config::TrackerConfig,
    error::Result,
    manager::StateManager,
    output::print_warning,
    scanner::WorkspaceScanner,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// Initialized context shared by all workspace commands
#[derive(Debug)]
pub struct WorkspaceCommandContext {
    pub root: PathBuf,
    pub config: TrackerConfig,
    pub store: BaselineStore,
}

pub struct WorkspaceCommandInit;

impl WorkspaceCommandInit {
    pub fn initialize(root: Option<PathBuf>) -> Result<WorkspaceCommandContext> {
        let root = match root {
            Some(root) => root,
            None => env::current_dir()?,
        };
        let root = WorkspaceScanner::check_root(&root)?;
        log::debug!("Workspace root: {}", root.display());

        let config = TrackerConfig::load(&root)?;
        let store = BaselineStore::for_root(&root)?;
        log::debug!("Baseline store: {}", store.path().display());

        Ok(WorkspaceCommandContext {
            root,
            config,
            store,
        })
    }
}

impl WorkspaceCommandContext {
    /// Manager with the persisted baseline installed, if there is a usable one
    pub fn restore_manager(&self) -> Result<StateManager> {
        let mut manager = StateManager::new(&self.root, &self.config);

        match self.store.load() {
            Ok(Some(baseline)) => manager.set_baseline(Arc::new(baseline)),
            Ok(None) => log::debug!("No persisted baseline, starting fresh"),
            Err(e) if e.is_cache_corruption() => {
                print_warning(&format!("{e}. Starting from a fresh baseline."));
                self.store.clear()?;
            }
            Err(e) => return Err(e),
        }

        Ok(manager)
    }

    pub fn restore_engine(&self) -> Result<ChangelogEngine> {
        let manager = self.restore_manager()?;
        let changelog_path = self.config.resolve_changelog_path(&self.root);
        Ok(ChangelogEngine::new(manager, changelog_path))
    }

    /// Persist the manager's baseline for the next invocation
    pub fn persist(&self, manager: &StateManager) -> Result<()> {
        match manager.baseline() {
            Some(baseline) => self.store.save(baseline),
            None => {
                log::debug!("No baseline to persist");
                Ok(())
            }
        }
    }

    pub fn clear_baseline(&self) -> Result<bool> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> WorkspaceCommandContext {
        let root = dir.path().canonicalize().unwrap();
        WorkspaceCommandContext {
            store: BaselineStore::at(root.join(".store")),
            config: TrackerConfig {
                ignored_dirs: vec![".store".to_string()],
                ..Default::default()
            },
            root,
        }
    }

    #[test]
    fn test_initialize_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = WorkspaceCommandInit::initialize(Some(dir.path().join("missing"))).unwrap_err();
        assert!(err.is_bad_root());
    }

    #[test]
    fn test_baseline_survives_between_managers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "1").unwrap();
        let ctx = context(&dir);

        let mut first = ctx.restore_manager().unwrap();
        assert!(first.detect_changes().unwrap().is_empty());
        ctx.persist(&first).unwrap();

        fs::write(dir.path().join("b.py"), "2").unwrap();
        let mut second = ctx.restore_manager().unwrap();
        let changes = second.detect_changes().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].file_path, "b.py");
    }

    #[test]
    fn test_corrupted_baseline_is_discarded() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        fs::create_dir_all(ctx.root.join(".store")).unwrap();
        fs::write(ctx.store.path(), "not json").unwrap();

        let manager = ctx.restore_manager().unwrap();
        assert!(manager.baseline().is_none());
        assert!(!ctx.store.path().exists());
    }
}
