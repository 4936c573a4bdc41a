//! Markdown changelog generation.
//!
//! [`ChangelogEngine`] turns the changes detected by a [`StateManager`] into numbered
//! answer entries and keeps them in a markdown changelog, newest first:
//!
//! ```text
//! # CHANGELOG
//! ...
//! ---
//! ### Answer #002 - <summary>
//! ...
//! ---
//! ### Answer #001 - <summary>
//! ...
//! ```
//!
//! Entry numbers continue from the highest `### Answer #NNN` already in the file.

use crate::core::change::{format_counts, ChangeEvent, ChangeSummary, ChangeType, ImpactLevel};
use crate::core::config::TrackerConfig;
use crate::core::error::{ChangetrailError, Result};
use crate::core::file_type::FileType;
use crate::core::manager::{CacheMetrics, StateManager};
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const ENTRY_SEPARATOR: &str = "---\n";

/// Broad category of work an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Architecture,
    Implementation,
    Modification,
    Documentation,
    Configuration,
    Optimization,
    Integration,
}

impl ActionType {
    /// Declaration order; earlier types win score ties
    pub const ALL: [ActionType; 7] = [
        ActionType::Architecture,
        ActionType::Implementation,
        ActionType::Modification,
        ActionType::Documentation,
        ActionType::Configuration,
        ActionType::Optimization,
        ActionType::Integration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Architecture => "Architecture",
            ActionType::Implementation => "Implementation",
            ActionType::Modification => "Modification",
            ActionType::Documentation => "Documentation",
            ActionType::Configuration => "Configuration",
            ActionType::Optimization => "Optimization",
            ActionType::Integration => "Integration",
        }
    }

    /// Summary keywords, matched as lowercase substrings
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ActionType::Architecture => &["system", "framework", "design", "structure"],
            ActionType::Implementation => &["code", "script", "function", "class"],
            ActionType::Modification => &["update", "change", "modify", "refactor"],
            ActionType::Documentation => &["doc", "readme", "guide", "comment"],
            ActionType::Configuration => &["config", "setting", "env", "ini"],
            ActionType::Optimization => &["performance", "speed", "memory", "cache"],
            ActionType::Integration => &["connect", "link", "merge", "combine"],
        }
    }

    /// Whether a change to this file type counts towards this action type
    fn boosted_by(&self, file_type: FileType) -> bool {
        match self {
            ActionType::Implementation => file_type.is_source(),
            ActionType::Documentation => file_type == FileType::Markdown,
            ActionType::Configuration => file_type == FileType::Config,
            _ => false,
        }
    }

    pub fn next_actions(&self) -> [&'static str; 3] {
        match self {
            ActionType::Architecture => [
                "Implement core system components",
                "Establish integration protocols",
                "Define performance benchmarks",
            ],
            ActionType::Implementation => [
                "Execute comprehensive testing protocols",
                "Validate system integration points",
                "Monitor performance metrics",
            ],
            ActionType::Modification => [
                "Verify system stability",
                "Update dependent components",
                "Document change impacts",
            ],
            _ => [
                "Continue systematic development",
                "Maintain architectural consistency",
                "Execute validation protocols",
            ],
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Changelog verb for a change, ordered NEW < MODIFIED < REMOVED
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileOperation {
    New,
    Modified,
    Removed,
}

impl FileOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOperation::New => "NEW",
            FileOperation::Modified => "MODIFIED",
            FileOperation::Removed => "REMOVED",
        }
    }
}

impl From<ChangeType> for FileOperation {
    fn from(change_type: ChangeType) -> Self {
        match change_type {
            ChangeType::Added => FileOperation::New,
            ChangeType::Modified => FileOperation::Modified,
            ChangeType::Removed => FileOperation::Removed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAffected {
    pub operation: FileOperation,
    pub file: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub number: u32,
    pub timestamp: String,
    pub action_type: ActionType,
    pub summary: String,
    pub previous_state: String,
    pub current_state: String,
    pub changes_made: Vec<String>,
    pub files_affected: Vec<FileAffected>,
    pub technical_decisions: Vec<String>,
    pub next_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceOverview {
    pub total_files: usize,
    pub total_size_mb: f64,
    pub directories: usize,
    pub state_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub cache_efficiency: f64,
    pub response_time_ms: f64,
    pub memory_usage_mb: f64,
    pub scan_warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceReport {
    pub workspace_overview: WorkspaceOverview,
    pub change_analysis: ChangeSummary,
    pub changes: Vec<ChangeEvent>,
    pub performance_metrics: CacheMetrics,
    pub system_health: HealthSnapshot,
}

/// Highest `### Answer #NNN` number in `content`, 0 when there is none
pub fn last_answer_number(content: &str) -> u32 {
    let re = match Regex::new(r"### Answer #(\d+)") {
        Ok(re) => re,
        Err(e) => {
            log::warn!("Failed to compile answer heading regex: {e}");
            return 0;
        }
    };

    re.captures_iter(content)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Pick the action type whose keywords and file-type boosts score highest
pub fn classify_action_type(changes: &[ChangeEvent], summary: &str) -> ActionType {
    let summary = summary.to_lowercase();
    let mut best = (ActionType::Implementation, 0usize);

    for action_type in ActionType::ALL {
        let keyword_score = action_type
            .keywords()
            .iter()
            .filter(|keyword| summary.contains(*keyword))
            .count();
        let boost = changes
            .iter()
            .filter(|event| action_type.boosted_by(event.details.file_type))
            .count()
            * 2;

        let score = keyword_score + boost;
        if score > best.1 {
            best = (action_type, score);
        }
    }

    best.0
}

pub fn files_affected(changes: &[ChangeEvent]) -> Vec<FileAffected> {
    let mut affected: Vec<FileAffected> = changes
        .iter()
        .map(|event| {
            let details = &event.details;
            let description = match event.change_type {
                ChangeType::Added => {
                    format!("Created {} with {} bytes", details.file_type, details.size)
                }
                ChangeType::Modified => format!(
                    "Updated content ({:+} bytes)",
                    details.size_change.unwrap_or(0)
                ),
                ChangeType::Removed => format!("Deleted {}", details.file_type),
            };

            FileAffected {
                operation: event.change_type.into(),
                file: event.file_path.clone(),
                description,
            }
        })
        .collect();

    affected.sort_by(|a, b| (a.operation, &a.file).cmp(&(b.operation, &b.file)));
    affected
}

pub fn technical_decisions(changes: &[ChangeEvent], large_file_threshold: u64) -> Vec<String> {
    let mut decisions = Vec::new();

    let high_impact = changes
        .iter()
        .filter(|e| e.impact_level == ImpactLevel::High)
        .count();
    if high_impact > 0 {
        decisions.push(format!(
            "Critical system components modified: {high_impact} files"
        ));
    }

    let file_types: BTreeSet<&str> = changes.iter().map(|e| e.details.file_type.as_str()).collect();
    if file_types.len() > 1 {
        let types: Vec<&str> = file_types.into_iter().collect();
        decisions.push(format!("Multi-technology approach: {}", types.join(", ")));
    }

    let large_files = changes
        .iter()
        .filter(|e| e.details.size > large_file_threshold)
        .count();
    if large_files > 0 {
        decisions.push(format!(
            "Large file operations optimized: {large_files} files"
        ));
    }

    if decisions.is_empty() {
        decisions.push("Implementation follows established architectural patterns".to_string());
    }

    decisions
}

/// Render an entry as a markdown block ending in a `---` separator
pub fn format_answer_entry(entry: &AnswerEntry) -> String {
    let mut lines = vec![
        format!("### Answer #{:03} - {}", entry.number, entry.summary),
        format!("**Timestamp:** {}", entry.timestamp),
        format!("**Action Type:** {}", entry.action_type),
        format!("**Previous State:** {}", entry.previous_state),
        format!("**Current State:** {}", entry.current_state),
        String::new(),
        "#### Changes Made:".to_string(),
    ];
    lines.extend(entry.changes_made.iter().map(|c| format!("- {c}")));

    lines.push(String::new());
    lines.push("#### Files Affected:".to_string());
    lines.extend(entry.files_affected.iter().map(|f| {
        format!("- **{}:** {} - {}", f.operation.as_str(), f.file, f.description)
    }));

    lines.push(String::new());
    lines.push("#### Technical Decisions:".to_string());
    lines.extend(entry.technical_decisions.iter().map(|d| format!("- {d}")));

    lines.push(String::new());
    lines.push("#### Next Actions Required:".to_string());
    lines.extend(entry.next_actions.iter().map(|a| format!("- {a}")));

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    lines.join("\n")
}

fn changelog_header() -> String {
    format!(
        "# CHANGELOG\n\n## Session: {}\n\n**Automated workspace changelog**\n\n{ENTRY_SEPARATOR}\n",
        Local::now().format("%Y-%m-%d")
    )
}

/// Insert `entry` right after the first separator, or append when there is none
fn insert_entry(existing: &str, entry: &str) -> String {
    match existing.find(ENTRY_SEPARATOR) {
        Some(index) => {
            let split = index + ENTRY_SEPARATOR.len();
            let mut content = String::with_capacity(existing.len() + entry.len());
            content.push_str(&existing[..split]);
            content.push_str(entry);
            content.push_str(&existing[split..]);
            content
        }
        None => format!("{existing}{entry}"),
    }
}

#[derive(Debug)]
pub struct ChangelogEngine {
    changelog_path: PathBuf,
    manager: StateManager,
    answer_counter: u32,
}

impl ChangelogEngine {
    pub fn new(manager: StateManager, changelog_path: impl Into<PathBuf>) -> Self {
        let changelog_path = changelog_path.into();
        let answer_counter = read_last_answer_number(&changelog_path);
        log::debug!(
            "Changelog engine for {} starting at answer #{answer_counter}",
            changelog_path.display()
        );

        Self {
            changelog_path,
            manager,
            answer_counter,
        }
    }

    pub fn from_config(root: &Path, config: &TrackerConfig) -> Self {
        let manager = StateManager::new(root, config);
        let changelog_path = config.resolve_changelog_path(manager.root());
        Self::new(manager, changelog_path)
    }

    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut StateManager {
        &mut self.manager
    }

    pub fn answer_counter(&self) -> u32 {
        self.answer_counter
    }

    /// Highest answer number currently in the changelog file
    pub fn last_answer_number(&self) -> u32 {
        read_last_answer_number(&self.changelog_path)
    }

    /// Detect changes and build the next numbered entry
    pub fn generate_answer_entry(
        &mut self,
        summary: &str,
        previous_description: &str,
        current_description: &str,
    ) -> Result<AnswerEntry> {
        let changes = self.manager.detect_changes()?;
        self.answer_counter += 1;

        let action_type = classify_action_type(&changes, summary);

        let changes_made = if changes.is_empty() {
            vec!["No workspace file changes detected".to_string()]
        } else {
            let change_summary = self.manager.generate_change_summary(&changes);
            vec![
                format!(
                    "Modified {} files across {} technologies",
                    change_summary.total_changes,
                    change_summary.affected_types.len()
                ),
                format!(
                    "Impact distribution: {}",
                    format_counts(&change_summary.by_impact)
                ),
                format!(
                    "Operation breakdown: {}",
                    format_counts(&change_summary.by_type)
                ),
            ]
        };

        Ok(AnswerEntry {
            number: self.answer_counter,
            timestamp: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            action_type,
            summary: summary.to_string(),
            previous_state: non_empty_or(previous_description, "Development continuation state"),
            current_state: non_empty_or(current_description, "Enhanced system implementation"),
            changes_made,
            files_affected: files_affected(&changes),
            technical_decisions: technical_decisions(
                &changes,
                self.manager.classifier().large_file_threshold(),
            ),
            next_actions: action_type.next_actions().iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn format_answer_entry(&self, entry: &AnswerEntry) -> String {
        format_answer_entry(entry)
    }

    /// Generate an entry and write it into the changelog. Returns the rendered entry.
    pub fn update_changelog(
        &mut self,
        summary: &str,
        previous_description: &str,
        current_description: &str,
    ) -> Result<String> {
        let entry = self.generate_answer_entry(summary, previous_description, current_description)?;
        let formatted = format_answer_entry(&entry);

        let existing = if self.changelog_path.exists() {
            fs::read_to_string(&self.changelog_path)
                .map_err(|e| ChangetrailError::changelog_read(&self.changelog_path, e))?
        } else {
            changelog_header()
        };

        fs::write(&self.changelog_path, insert_entry(&existing, &formatted))
            .map_err(|e| ChangetrailError::changelog_write(&self.changelog_path, e))?;

        log::debug!(
            "Wrote answer #{:03} to {}",
            entry.number,
            self.changelog_path.display()
        );
        Ok(formatted)
    }

    /// Create the changelog with a header when it does not exist. Returns whether it was created.
    pub fn ensure_changelog(&self) -> Result<bool> {
        if self.changelog_path.exists() {
            return Ok(false);
        }

        fs::write(&self.changelog_path, changelog_header())
            .map_err(|e| ChangetrailError::changelog_write(&self.changelog_path, e))?;
        log::debug!("Created changelog {}", self.changelog_path.display());
        Ok(true)
    }

    /// Overview, pending changes, cache metrics and health of the workspace.
    ///
    /// Pending changes are detected against the baseline, which advances as a result.
    pub fn generate_workspace_report(&mut self) -> Result<WorkspaceReport> {
        let started = Instant::now();
        let current = self.manager.get_current_state(false)?;
        let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let changes = self.manager.detect_changes()?;
        let change_analysis = self.manager.generate_change_summary(&changes);
        let metrics = self.manager.get_metrics();

        Ok(WorkspaceReport {
            workspace_overview: WorkspaceOverview {
                total_files: current.total_files,
                total_size_mb: current.total_size_mb(),
                directories: current.directories.len(),
                state_hash: current.state_hash.clone(),
            },
            change_analysis,
            changes,
            performance_metrics: metrics,
            system_health: HealthSnapshot {
                cache_efficiency: metrics.cache_hit_rate,
                response_time_ms,
                memory_usage_mb: metrics.cache_size_mb,
                scan_warnings: current.warnings.len(),
            },
        })
    }

    /// Changelog location usable, a snapshot obtainable and the counter in step with the file
    pub fn validate_system_integrity(&mut self) -> bool {
        let parent_exists = match self.changelog_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
            _ => true,
        };
        if !parent_exists {
            log::warn!(
                "Changelog directory missing for {}",
                self.changelog_path.display()
            );
            return false;
        }

        match self.manager.get_current_state(false) {
            Ok(state) if !state.state_hash.is_empty() => {}
            Ok(_) => return false,
            Err(e) => {
                log::warn!("Integrity check could not obtain workspace state: {e}");
                return false;
            }
        }

        let file_counter = self.last_answer_number();
        if self.answer_counter.abs_diff(file_counter) > 1 {
            log::warn!(
                "Answer counter {} out of step with changelog ({file_counter})",
                self.answer_counter
            );
            return false;
        }

        true
    }
}

fn read_last_answer_number(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(content) => last_answer_number(&content),
        Err(e) => {
            if path.exists() {
                log::warn!("Could not read changelog {}: {e}", path.display());
            }
            0
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::ChangeDetails;
    use tempfile::TempDir;

    fn event(change_type: ChangeType, path: &str, size: u64, size_change: Option<i64>) -> ChangeEvent {
        let file_type = FileType::from_path(path);
        ChangeEvent {
            change_type,
            file_path: path.to_string(),
            impact_level: if file_type == FileType::Config {
                ImpactLevel::High
            } else {
                ImpactLevel::Medium
            },
            details: ChangeDetails {
                file_type,
                size,
                size_change,
            },
        }
    }

    fn engine() -> (TempDir, ChangelogEngine) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "print('hi')").unwrap();
        let engine = ChangelogEngine::from_config(dir.path(), &TrackerConfig::default());
        (dir, engine)
    }

    #[test]
    fn test_last_answer_number() {
        assert_eq!(last_answer_number(""), 0);
        assert_eq!(
            last_answer_number("### Answer #003 - a\n### Answer #012 - b\n### Answer #7 - c"),
            12
        );
        assert_eq!(last_answer_number("## Answer #5"), 0);
    }

    #[test]
    fn test_classify_by_keywords() {
        assert_eq!(
            classify_action_type(&[], "Refactor and update the parser"),
            ActionType::Modification
        );
        assert_eq!(
            classify_action_type(&[], "Improve cache performance"),
            ActionType::Optimization
        );
    }

    #[test]
    fn test_classify_defaults_to_implementation() {
        assert_eq!(classify_action_type(&[], "misc"), ActionType::Implementation);
    }

    #[test]
    fn test_classify_ties_use_declaration_order() {
        // "design" (Architecture) and "code" (Implementation) score 1 each
        assert_eq!(classify_action_type(&[], "design code"), ActionType::Architecture);
    }

    #[test]
    fn test_classify_file_type_boosts() {
        let docs = vec![
            event(ChangeType::Added, "README.md", 10, None),
            event(ChangeType::Added, "guide.md", 10, None),
        ];
        assert_eq!(classify_action_type(&docs, "misc"), ActionType::Documentation);

        let config = vec![event(ChangeType::Modified, "settings.yaml", 10, Some(1))];
        assert_eq!(
            classify_action_type(&config, "update"),
            ActionType::Configuration
        );
    }

    #[test]
    fn test_files_affected_order_and_descriptions() {
        let changes = vec![
            event(ChangeType::Removed, "old.md", 5, None),
            event(ChangeType::Modified, "a.py", 15, Some(5)),
            event(ChangeType::Added, "c.json", 20, None),
            event(ChangeType::Modified, "b.py", 1, Some(-3)),
        ];
        let affected = files_affected(&changes);

        let files: Vec<_> = affected.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["c.json", "a.py", "b.py", "old.md"]);
        assert_eq!(affected[0].operation, FileOperation::New);
        assert_eq!(affected[0].description, "Created config with 20 bytes");
        assert_eq!(affected[1].description, "Updated content (+5 bytes)");
        assert_eq!(affected[2].description, "Updated content (-3 bytes)");
        assert_eq!(affected[3].description, "Deleted markdown");
    }

    #[test]
    fn test_technical_decisions() {
        assert_eq!(
            technical_decisions(&[], 10_000),
            vec!["Implementation follows established architectural patterns"]
        );

        let changes = vec![
            event(ChangeType::Added, "c.json", 20_000, None),
            event(ChangeType::Added, "a.py", 10, None),
        ];
        let decisions = technical_decisions(&changes, 10_000);
        assert_eq!(
            decisions,
            vec![
                "Critical system components modified: 1 files",
                "Multi-technology approach: config, python",
                "Large file operations optimized: 1 files",
            ]
        );
    }

    #[test]
    fn test_format_answer_entry() {
        let entry = AnswerEntry {
            number: 7,
            timestamp: "2024-01-02 03:04".to_string(),
            action_type: ActionType::Implementation,
            summary: "Add parser".to_string(),
            previous_state: "before".to_string(),
            current_state: "after".to_string(),
            changes_made: vec!["Modified 1 files across 1 technologies".to_string()],
            files_affected: files_affected(&[event(ChangeType::Added, "p.rs", 3, None)]),
            technical_decisions: vec!["d".to_string()],
            next_actions: vec!["n".to_string()],
        };
        let text = format_answer_entry(&entry);

        assert!(text.starts_with("### Answer #007 - Add parser\n"));
        assert!(text.contains("**Action Type:** Implementation"));
        assert!(text.contains("- **NEW:** p.rs - Created rust with 3 bytes"));
        assert!(text.contains("#### Next Actions Required:\n- n"));
        assert!(text.ends_with("\n---\n"));
    }

    #[test]
    fn test_insert_entry_after_first_separator() {
        let existing = "# Title\n\n---\n\nold entry\n---\n";
        let updated = insert_entry(existing, "NEW\n---\n");
        assert_eq!(updated, "# Title\n\n---\nNEW\n---\n\nold entry\n---\n");
        assert_eq!(insert_entry("no separator\n", "E\n"), "no separator\nE\n");
    }

    #[test]
    fn test_update_changelog_numbers_entries_newest_first() {
        let (dir, mut engine) = engine();

        engine.update_changelog("First entry", "", "").unwrap();
        fs::write(dir.path().join("lib.rs"), "pub fn f() {}").unwrap();
        engine.update_changelog("Second entry", "", "").unwrap();

        let content = fs::read_to_string(engine.changelog_path()).unwrap();
        assert!(content.starts_with("# CHANGELOG"));
        let second = content.find("### Answer #002 - Second entry").unwrap();
        let first = content.find("### Answer #001 - First entry").unwrap();
        assert!(second < first);
        assert!(content.contains("- **NEW:** lib.rs - Created rust with 13 bytes"));
        assert_eq!(engine.last_answer_number(), 2);
    }

    #[test]
    fn test_counter_continues_from_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Changelog.md"), "---\n### Answer #041 - old\n---\n").unwrap();
        let mut engine = ChangelogEngine::from_config(dir.path(), &TrackerConfig::default());
        assert_eq!(engine.answer_counter(), 41);

        let entry = engine.generate_answer_entry("next", "", "").unwrap();
        assert_eq!(entry.number, 42);
        assert_eq!(entry.previous_state, "Development continuation state");
        assert_eq!(entry.current_state, "Enhanced system implementation");
    }

    #[test]
    fn test_changelog_write_is_not_a_workspace_change() {
        let (_dir, mut engine) = engine();
        engine.update_changelog("one", "", "").unwrap();
        let entry = engine.generate_answer_entry("two", "", "").unwrap();
        assert!(entry.files_affected.is_empty());
        assert_eq!(entry.changes_made, vec!["No workspace file changes detected"]);
    }

    #[test]
    fn test_workspace_report() {
        let (dir, mut engine) = engine();
        engine.manager_mut().get_current_state(false).unwrap();
        fs::write(dir.path().join("extra.md"), "# notes").unwrap();

        let report = engine.generate_workspace_report().unwrap();
        assert_eq!(report.workspace_overview.total_files, 2);
        assert_eq!(report.change_analysis.total_changes, 1);
        assert_eq!(report.changes[0].file_path, "extra.md");
        assert_eq!(report.workspace_overview.state_hash.len(), 32);
    }

    #[test]
    fn test_validate_system_integrity() {
        let (_dir, mut engine) = engine();
        assert!(engine.validate_system_integrity());

        engine.answer_counter = 5;
        assert!(!engine.validate_system_integrity());
    }

    #[test]
    fn test_integrity_fails_without_changelog_directory() {
        let dir = TempDir::new().unwrap();
        let manager = StateManager::new(dir.path(), &TrackerConfig::default());
        let mut engine = ChangelogEngine::new(manager, dir.path().join("missing/Changelog.md"));
        assert!(!engine.validate_system_integrity());
    }

    #[test]
    fn test_ensure_changelog() {
        let (_dir, engine) = engine();
        assert!(engine.ensure_changelog().unwrap());
        assert!(!engine.ensure_changelog().unwrap());
        assert_eq!(engine.last_answer_number(), 0);
    }
}
