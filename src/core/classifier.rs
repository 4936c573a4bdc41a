//! Snapshot diffing and change classification.
//!
//! [`compare_states`] partitions the union of two snapshots' paths into added, removed,
//! modified and unchanged sets. [`ChangeClassifier::diff`] turns that partition into an
//! ordered list of [`ChangeEvent`]s with impact levels.
//!
//! Content hashes are authoritative: a file whose bytes are unchanged is never reported
//! as modified, whatever its timestamp says. Renames show up as REMOVED + ADDED.

use crate::core::change::{ChangeDetails, ChangeEvent, ChangeType, ImpactLevel};
use crate::core::config::TrackerConfig;
use crate::core::file_type::FileType;
use crate::core::state::WorkspaceState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Path-level partition of two snapshots. All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateComparison {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    pub unchanged: Vec<String>,
}

impl StateComparison {
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty())
    }
}

pub fn compare_states(old: &WorkspaceState, new: &WorkspaceState) -> StateComparison {
    let old_paths: BTreeSet<&String> = old.files.keys().collect();
    let new_paths: BTreeSet<&String> = new.files.keys().collect();

    let mut comparison = StateComparison {
        added: new_paths.difference(&old_paths).map(|p| p.to_string()).collect(),
        removed: old_paths.difference(&new_paths).map(|p| p.to_string()).collect(),
        ..Default::default()
    };

    for path in old_paths.intersection(&new_paths) {
        if old.files[*path].content_hash == new.files[*path].content_hash {
            comparison.unchanged.push(path.to_string());
        } else {
            comparison.modified.push(path.to_string());
        }
    }

    comparison
}

#[derive(Debug, Clone)]
pub struct ChangeClassifier {
    critical_types: BTreeSet<FileType>,
    large_file_threshold: u64,
}

impl Default for ChangeClassifier {
    fn default() -> Self {
        Self::from_config(&TrackerConfig::default())
    }
}

impl ChangeClassifier {
    pub fn new(critical_types: impl IntoIterator<Item = FileType>, large_file_threshold: u64) -> Self {
        Self {
            critical_types: critical_types.into_iter().collect(),
            large_file_threshold,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.critical_types.iter().copied(), config.large_file_threshold)
    }

    pub fn large_file_threshold(&self) -> u64 {
        self.large_file_threshold
    }

    /// Ordered change events from `old` to `new`
    pub fn diff(&self, old: &WorkspaceState, new: &WorkspaceState) -> Vec<ChangeEvent> {
        let comparison = compare_states(old, new);
        let mut events = Vec::with_capacity(
            comparison.added.len() + comparison.modified.len() + comparison.removed.len(),
        );

        for path in comparison.added {
            let record = &new.files[&path];
            events.push(self.event(ChangeType::Added, path, record.file_type, record.size, None));
        }

        for path in comparison.modified {
            let before = &old.files[&path];
            let after = &new.files[&path];
            let size_change = after.size as i64 - before.size as i64;
            events.push(self.event(
                ChangeType::Modified,
                path,
                after.file_type,
                after.size,
                Some(size_change),
            ));
        }

        for path in comparison.removed {
            let record = &old.files[&path];
            events.push(self.event(ChangeType::Removed, path, record.file_type, record.size, None));
        }

        events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        events
    }

    /// HIGH for critical types or large files, MEDIUM for recognized types, LOW otherwise
    pub fn impact_level(&self, file_type: FileType, size: u64, size_change: Option<i64>) -> ImpactLevel {
        let relevant_size = size.max(size_change.map_or(0, i64::unsigned_abs));

        if self.critical_types.contains(&file_type) || relevant_size > self.large_file_threshold {
            ImpactLevel::High
        } else if file_type.is_recognized() {
            ImpactLevel::Medium
        } else {
            ImpactLevel::Low
        }
    }

    fn event(
        &self,
        change_type: ChangeType,
        file_path: String,
        file_type: FileType,
        size: u64,
        size_change: Option<i64>,
    ) -> ChangeEvent {
        ChangeEvent {
            change_type,
            impact_level: self.impact_level(file_type, size, size_change),
            file_path,
            details: ChangeDetails {
                file_type,
                size,
                size_change,
            },
        }
    }
}
