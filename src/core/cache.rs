//! Single-slot snapshot cache.
//!
//! [`StateCache`] memoizes the last scan of a workspace, keyed by the scanner's cheap
//! metadata fingerprint. A lookup is a hit only when the slot belongs to the same root,
//! the fingerprint still matches and the cached snapshot is internally consistent.
//! Anything else is a miss and triggers a full scan.

use crate::core::error::Result;
use crate::core::scanner::WorkspaceScanner;
use crate::core::state::{FileRecord, WorkspaceState};
use std::mem::size_of;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct CacheEntry {
    root: PathBuf,
    fingerprint: String,
    state: Arc<WorkspaceState>,
}

#[derive(Debug, Default)]
pub struct StateCache {
    slot: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for `root` if still valid, otherwise scan and store
    pub fn get_or_scan(
        &mut self,
        scanner: &WorkspaceScanner,
        root: &Path,
        force_refresh: bool,
    ) -> Result<Arc<WorkspaceState>> {
        let fingerprint = scanner.fingerprint(root)?;

        if !force_refresh {
            if let Some(state) = self.lookup(root, &fingerprint) {
                self.hits += 1;
                log::debug!("State cache hit ({})", state.short_hash());
                return Ok(state);
            }
        }

        self.misses += 1;
        log::debug!(
            "State cache miss (force_refresh = {force_refresh}), scanning {}",
            root.display()
        );

        let state = Arc::new(scanner.scan(root)?);
        self.slot = Some(CacheEntry {
            root: root.to_path_buf(),
            fingerprint,
            state: Arc::clone(&state),
        });

        Ok(state)
    }

    fn lookup(&mut self, root: &Path, fingerprint: &str) -> Option<Arc<WorkspaceState>> {
        let entry = self.slot.as_ref()?;
        if entry.root != root || entry.fingerprint != fingerprint {
            return None;
        }

        if let Err(reason) = entry.state.verify() {
            log::warn!("Discarding inconsistent cached state: {reason}");
            self.slot = None;
            return None;
        }

        Some(Arc::clone(&entry.state))
    }

    /// Empty the slot; counters are kept so the hit rate reflects the forced miss
    pub fn clear(&mut self) {
        if self.slot.take().is_some() {
            log::debug!("State cache cleared");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// hits / (hits + misses); 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Approximate heap footprint of the cached snapshot
    pub fn estimated_size_bytes(&self) -> usize {
        let Some(entry) = &self.slot else {
            return 0;
        };

        let state = &entry.state;
        let files: usize = state
            .files
            .iter()
            .map(|(key, record)| {
                key.len() + record.path.len() + record.content_hash.len() + size_of::<FileRecord>()
            })
            .sum();
        let directories: usize = state
            .directories
            .iter()
            .map(|dir| dir.len() + size_of::<String>())
            .sum();

        size_of::<WorkspaceState>()
            + state.state_hash.len()
            + entry.fingerprint.len()
            + entry.root.as_os_str().len()
            + files
            + directories
    }
}
