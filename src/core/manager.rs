//! Workspace state management.
//!
//! [`StateManager`] owns the scanner, the snapshot cache, the classifier and the current
//! baseline for one workspace root. It is the entry point the changelog engine, the hooks
//! and the CLI go through.
//!
//! # Public API
//! - [`StateManager::get_current_state`]: Cached snapshot, rescanning only when needed
//! - [`StateManager::detect_changes`]: Events since the baseline; advances the baseline
//! - [`StateManager::generate_change_summary`]: Aggregate counts over a list of events
//! - [`StateManager::get_metrics`]: Cache statistics as [`CacheMetrics`]
//! - [`StateManager::cleanup_cache`]: Drop the cached snapshot
//!
//! Mutating operations take `&mut self`; callers that share a manager across threads
//! wrap it in a `Mutex`.

use crate::core::cache::StateCache;
use crate::core::change::{ChangeEvent, ChangeSummary};
use crate::core::classifier::{self, ChangeClassifier, StateComparison};
use crate::core::config::{FirstRunPolicy, TrackerConfig};
use crate::core::error::Result;
use crate::core::scanner::WorkspaceScanner;
use crate::core::state::WorkspaceState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cache statistics. `cache_hit_rate` is a ratio in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub cache_hit_rate: f64,
    pub cache_size_mb: f64,
}

impl CacheMetrics {
    /// Hit rate formatted for display, e.g. `"66.7%"`
    pub fn hit_rate_percent(&self) -> String {
        format!("{:.1}%", self.cache_hit_rate * 100.0)
    }

    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

#[derive(Debug)]
pub struct StateManager {
    root: PathBuf,
    scanner: WorkspaceScanner,
    cache: StateCache,
    classifier: ChangeClassifier,
    baseline: Option<Arc<WorkspaceState>>,
    first_run: FirstRunPolicy,
}

impl StateManager {
    /// Create a manager for `root`. The root is validated lazily on the first scan.
    pub fn new(root: impl Into<PathBuf>, config: &TrackerConfig) -> Self {
        let root = root.into();
        let root = root.canonicalize().unwrap_or(root);

        Self {
            scanner: WorkspaceScanner::from_config(config, &root),
            classifier: ChangeClassifier::from_config(config),
            cache: StateCache::new(),
            baseline: None,
            first_run: config.first_run,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn classifier(&self) -> &ChangeClassifier {
        &self.classifier
    }

    /// Current snapshot; also becomes the baseline when none is set yet
    pub fn get_current_state(&mut self, force_refresh: bool) -> Result<Arc<WorkspaceState>> {
        let state = self.cache.get_or_scan(&self.scanner, &self.root, force_refresh)?;

        if self.baseline.is_none() {
            log::debug!("Recording initial baseline {}", state.short_hash());
            self.baseline = Some(Arc::clone(&state));
        }

        Ok(state)
    }

    /// Changes between the baseline and the current tree, in display order.
    ///
    /// The baseline advances to the current snapshot, so a second call with no
    /// filesystem activity in between returns nothing. Without a baseline the outcome
    /// follows the configured [`FirstRunPolicy`].
    pub fn detect_changes(&mut self) -> Result<Vec<ChangeEvent>> {
        let previous = self.baseline.clone();
        let current = self.cache.get_or_scan(&self.scanner, &self.root, false)?;

        let changes = match previous {
            Some(baseline) if baseline.state_hash == current.state_hash => Vec::new(),
            Some(baseline) => self.classifier.diff(&baseline, &current),
            None => match self.first_run {
                FirstRunPolicy::Empty => {
                    log::debug!("No baseline yet, recording {}", current.short_hash());
                    Vec::new()
                }
                FirstRunPolicy::ReportAll => {
                    let empty = WorkspaceState::empty(current.root.clone());
                    self.classifier.diff(&empty, &current)
                }
            },
        };

        log::debug!("Detected {} changes", changes.len());
        self.baseline = Some(current);
        Ok(changes)
    }

    pub fn generate_change_summary(&self, changes: &[ChangeEvent]) -> ChangeSummary {
        ChangeSummary::from_events(changes)
    }

    pub fn get_metrics(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.cache.hits(),
            misses: self.cache.misses(),
            cache_hit_rate: self.cache.hit_rate(),
            cache_size_mb: self.cache.estimated_size_bytes() as f64 / (1024.0 * 1024.0),
        }
    }

    /// Drop the cached snapshot; the next state request rescans
    pub fn cleanup_cache(&mut self) {
        self.cache.clear();
    }

    pub fn compare_states(&self, old: &WorkspaceState, new: &WorkspaceState) -> StateComparison {
        classifier::compare_states(old, new)
    }

    pub fn baseline(&self) -> Option<&Arc<WorkspaceState>> {
        self.baseline.as_ref()
    }

    /// Install a baseline, e.g. one restored from the persisted store
    pub fn set_baseline(&mut self, state: Arc<WorkspaceState>) {
        log::debug!("Baseline set to {}", state.short_hash());
        self.baseline = Some(state);
    }

    /// Rebaseline to a fresh scan of the tree
    pub fn reset_baseline(&mut self) -> Result<Arc<WorkspaceState>> {
        let state = self.cache.get_or_scan(&self.scanner, &self.root, true)?;
        self.baseline = Some(Arc::clone(&state));
        Ok(state)
    }

    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}
