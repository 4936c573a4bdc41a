//! Change events produced by diffing two workspace snapshots.
//!
//! # Public API
//! - [`ChangeType`]: ADDED / MODIFIED / REMOVED, ordered by display priority
//! - [`ImpactLevel`]: LOW / MEDIUM / HIGH severity attached to each event
//! - [`ChangeEvent`]: One change to one path, with [`ChangeDetails`]
//! - [`ChangeSummary`]: Aggregated counts over a list of events
//!
//! Events are created fresh for every diff and are never persisted by the core.

use crate::core::file_type::FileType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of change. Declaration order is the output ordering: ADDED < MODIFIED < REMOVED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Added,
    Modified,
    Removed,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "ADDED",
            ChangeType::Modified => "MODIFIED",
            ChangeType::Removed => "REMOVED",
        }
    }

    /// Sort priority used for deterministic event ordering
    pub fn sort_priority(&self) -> u8 {
        match self {
            ChangeType::Added => 0,
            ChangeType::Modified => 1,
            ChangeType::Removed => 2,
        }
    }

    /// Get human-readable description for display
    pub fn description(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Modified => "modified",
            ChangeType::Removed => "removed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "LOW",
            ImpactLevel::Medium => "MEDIUM",
            ImpactLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-event metadata.
///
/// `size` is the new size for ADDED and MODIFIED events and the last known size
/// for REMOVED ones. `size_change` is only present for MODIFIED events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDetails {
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_change: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub change_type: ChangeType,
    pub file_path: String,
    pub impact_level: ImpactLevel,
    pub details: ChangeDetails,
}

impl ChangeEvent {
    /// Ordering key: change type priority, then path
    pub fn sort_key(&self) -> (u8, &str) {
        (self.change_type.sort_priority(), self.file_path.as_str())
    }
}

/// Aggregated view of a list of change events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total_changes: usize,
    pub affected_types: BTreeSet<FileType>,
    pub by_impact: BTreeMap<ImpactLevel, usize>,
    pub by_type: BTreeMap<ChangeType, usize>,
}

impl ChangeSummary {
    pub fn from_events(changes: &[ChangeEvent]) -> Self {
        let mut summary = ChangeSummary {
            total_changes: changes.len(),
            ..Default::default()
        };

        for event in changes {
            summary.affected_types.insert(event.details.file_type);
            *summary.by_impact.entry(event.impact_level).or_insert(0) += 1;
            *summary.by_type.entry(event.change_type).or_insert(0) += 1;
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes == 0
    }
}

/// Render a count map as `{ADDED: 1, REMOVED: 2}` for changelog text
pub fn format_counts<K: fmt::Display>(counts: &BTreeMap<K, usize>) -> String {
    let parts: Vec<String> = counts.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(change_type: ChangeType, path: &str, impact: ImpactLevel, file_type: FileType) -> ChangeEvent {
        ChangeEvent {
            change_type,
            file_path: path.to_string(),
            impact_level: impact,
            details: ChangeDetails {
                file_type,
                size: 10,
                size_change: None,
            },
        }
    }

    #[test]
    fn test_change_type_ordering() {
        assert!(ChangeType::Added < ChangeType::Modified);
        assert!(ChangeType::Modified < ChangeType::Removed);
        assert!(ChangeType::Added.sort_priority() < ChangeType::Removed.sort_priority());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ChangeType::Added), "ADDED");
        assert_eq!(format!("{}", ImpactLevel::High), "HIGH");
        assert_eq!(ChangeType::Removed.description(), "removed");
    }

    #[test]
    fn test_details_serialize_with_type_key() {
        let details = ChangeDetails {
            file_type: FileType::Python,
            size: 15,
            size_change: Some(5),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["type"], "python");
        assert_eq!(json["size"], 15);
        assert_eq!(json["size_change"], 5);

        let added = ChangeDetails {
            file_type: FileType::Config,
            size: 20,
            size_change: None,
        };
        let json = serde_json::to_value(&added).unwrap();
        assert!(json.get("size_change").is_none());
    }

    #[test]
    fn test_summary_counts() {
        let changes = vec![
            event(ChangeType::Added, "c.json", ImpactLevel::High, FileType::Config),
            event(ChangeType::Modified, "a.py", ImpactLevel::Medium, FileType::Python),
            event(ChangeType::Removed, "b.md", ImpactLevel::Medium, FileType::Markdown),
            event(ChangeType::Added, "d.py", ImpactLevel::Medium, FileType::Python),
        ];

        let summary = ChangeSummary::from_events(&changes);
        assert_eq!(summary.total_changes, 4);
        assert_eq!(summary.affected_types.len(), 3);
        assert_eq!(summary.by_impact[&ImpactLevel::Medium], 3);
        assert_eq!(summary.by_impact[&ImpactLevel::High], 1);
        assert_eq!(summary.by_type[&ChangeType::Added], 2);
        assert!(!summary.by_impact.contains_key(&ImpactLevel::Low));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ChangeSummary::from_events(&[]);
        assert!(summary.is_empty());
        assert!(summary.affected_types.is_empty());
    }

    #[test]
    fn test_format_counts() {
        let mut counts = BTreeMap::new();
        counts.insert(ChangeType::Removed, 2);
        counts.insert(ChangeType::Added, 1);
        assert_eq!(format_counts(&counts), "{ADDED: 1, REMOVED: 2}");
        assert_eq!(format_counts::<ChangeType>(&BTreeMap::new()), "{}");
    }
}
