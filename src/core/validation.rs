//! Self-test of the tracking pipeline.
//!
//! [`ValidationSuite`] exercises each component against a real workspace and grades it
//! PASS, WARNING or FAIL against the configured [`ValidationThresholds`]. The results
//! roll up into a [`SystemHealth`] that can be rendered as a markdown report.
//!
//! Checks never write into the workspace or its changelog; anything that needs to
//! mutate files works in a scratch `tempfile` directory.

use crate::core::changelog::{format_answer_entry, ChangelogEngine};
use crate::core::config::{TrackerConfig, ValidationThresholds};
use crate::core::manager::StateManager;
use crate::core::scanner::WorkspaceScanner;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Cached reads used to probe cache behavior and response time
const CACHE_PROBES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Warning,
    Fail,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "PASS",
            ValidationStatus::Warning => "WARNING",
            ValidationStatus::Fail => "FAIL",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "✓",
            ValidationStatus::Warning => "⚠",
            ValidationStatus::Fail => "✗",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    SystemOptimal,
    SystemDegraded,
    SystemFailure,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::SystemOptimal => "SYSTEM_OPTIMAL",
            OverallStatus::SystemDegraded => "SYSTEM_DEGRADED",
            OverallStatus::SystemFailure => "SYSTEM_FAILURE",
        }
    }

    /// FAIL anywhere is a failure, otherwise WARNING anywhere degrades
    pub fn from_results(results: &[ValidationResult]) -> Self {
        if results.iter().any(|r| r.status == ValidationStatus::Fail) {
            OverallStatus::SystemFailure
        } else if results.iter().any(|r| r.status == ValidationStatus::Warning) {
            OverallStatus::SystemDegraded
        } else {
            OverallStatus::SystemOptimal
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub component: String,
    pub status: ValidationStatus,
    pub message: String,
    /// Seconds
    pub execution_time: f64,
    pub details: Value,
}

impl ValidationResult {
    fn new(
        component: &str,
        status: ValidationStatus,
        message: impl Into<String>,
        started: Instant,
        details: Value,
    ) -> Self {
        Self {
            component: component.to_string(),
            status,
            message: message.into(),
            execution_time: started.elapsed().as_secs_f64(),
            details,
        }
    }

    fn fail(component: &str, message: impl Into<String>, started: Instant) -> Self {
        let message = message.into();
        Self::new(
            component,
            ValidationStatus::Fail,
            message.clone(),
            started,
            json!({ "error": message }),
        )
    }

    /// `workspace_scanner` -> `Workspace Scanner`
    pub fn title(&self) -> String {
        self.component
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub overall_status: OverallStatus,
    pub results: Vec<ValidationResult>,
    /// Fraction of checks that passed
    pub pass_rate: f64,
    /// Seconds across all checks
    pub total_time: f64,
    pub average_component_time: f64,
    pub recommendations: Vec<String>,
}

impl SystemHealth {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let count = results.len().max(1) as f64;
        let passed = results
            .iter()
            .filter(|r| r.status == ValidationStatus::Pass)
            .count();
        let total_time: f64 = results.iter().map(|r| r.execution_time).sum();

        Self {
            overall_status: OverallStatus::from_results(&results),
            pass_rate: passed as f64 / count,
            total_time,
            average_component_time: total_time / count,
            recommendations: recommendations(&results),
            results,
        }
    }
}

fn recommendations(results: &[ValidationResult]) -> Vec<String> {
    let mut recommendations: Vec<String> = results
        .iter()
        .filter_map(|result| match result.status {
            ValidationStatus::Fail => Some(format!(
                "CRITICAL: Fix {} - {}",
                result.component, result.message
            )),
            ValidationStatus::Warning => {
                Some(format!("OPTIMIZE: Improve {} performance", result.component))
            }
            ValidationStatus::Pass => None,
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push("System operating at optimal performance".to_string());
    }
    recommendations
}

pub struct ValidationSuite {
    root: PathBuf,
    config: TrackerConfig,
    scanner: WorkspaceScanner,
    manager: StateManager,
}

impl ValidationSuite {
    pub fn new(root: &Path, config: TrackerConfig) -> Self {
        let manager = StateManager::new(root, &config);
        let root = manager.root().to_path_buf();
        Self {
            scanner: WorkspaceScanner::from_config(&config, &root),
            manager,
            root,
            config,
        }
    }

    fn thresholds(&self) -> &ValidationThresholds {
        &self.config.thresholds
    }

    pub fn validate_workspace_scanner(&self) -> ValidationResult {
        const COMPONENT: &str = "workspace_scanner";
        let started = Instant::now();

        let state = match self.scanner.scan(&self.root) {
            Ok(state) => state,
            Err(e) => return ValidationResult::fail(COMPONENT, format!("Scanner error: {e}"), started),
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let details = json!({
            "files_count": state.total_files,
            "directories_count": state.directories.len(),
            "total_size": state.total_size,
            "warnings": state.warnings.len(),
            "performance_ms": elapsed_ms,
        });

        if state.state_hash.is_empty() {
            return ValidationResult::new(
                COMPONENT,
                ValidationStatus::Fail,
                "Scanner produced incomplete state",
                started,
                details,
            );
        }

        let (status, message) = if state.files.is_empty() {
            (ValidationStatus::Warning, "Scanner found no files".to_string())
        } else if elapsed_ms > self.thresholds().scan_time_ms as f64 {
            (
                ValidationStatus::Warning,
                format!("Scanner performance below threshold: {elapsed_ms:.1}ms"),
            )
        } else {
            (
                ValidationStatus::Pass,
                format!(
                    "Scanner operational: {} files, {elapsed_ms:.1}ms",
                    state.total_files
                ),
            )
        };

        ValidationResult::new(COMPONENT, status, message, started, details)
    }

    pub fn validate_state_manager(&mut self) -> ValidationResult {
        const COMPONENT: &str = "state_manager";
        let started = Instant::now();

        let current = match self.manager.get_current_state(false) {
            Ok(state) => state,
            Err(e) => {
                return ValidationResult::fail(COMPONENT, format!("State manager error: {e}"), started)
            }
        };

        let mut stable = true;
        for _ in 0..CACHE_PROBES {
            match self.manager.get_current_state(false) {
                Ok(cached) => stable &= Arc::ptr_eq(&cached, &current),
                Err(e) => {
                    return ValidationResult::fail(COMPONENT, format!("State manager error: {e}"), started)
                }
            }
        }

        let changes = match self.manager.detect_changes() {
            Ok(changes) => changes,
            Err(e) => {
                return ValidationResult::fail(COMPONENT, format!("Change detection error: {e}"), started)
            }
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let metrics = self.manager.get_metrics();

        let mut issues = Vec::new();
        if elapsed_ms > self.thresholds().state_gen_ms as f64 {
            issues.push(format!("Performance: {elapsed_ms:.1}ms"));
        }
        if metrics.cache_hit_rate < self.thresholds().cache_hit_rate {
            issues.push(format!("Cache efficiency: {}", metrics.hit_rate_percent()));
        }
        if !stable {
            issues.push("Workspace changed during validation".to_string());
        }

        let (status, message) = if issues.is_empty() {
            (ValidationStatus::Pass, "State manager optimal".to_string())
        } else {
            (
                ValidationStatus::Warning,
                format!("State manager operational: {}", issues.join(", ")),
            )
        };

        ValidationResult::new(
            COMPONENT,
            status,
            message,
            started,
            json!({
                "state_hash": current.state_hash,
                "cache_hit_rate": metrics.cache_hit_rate,
                "changes_detected": changes.len(),
                "performance_ms": elapsed_ms,
            }),
        )
    }

    /// Runs the engine against the workspace with its changelog redirected to a scratch file
    pub fn validate_changelog_engine(&self) -> ValidationResult {
        const COMPONENT: &str = "changelog_engine";
        let started = Instant::now();

        let scratch = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return ValidationResult::fail(COMPONENT, format!("Scratch directory error: {e}"), started)
            }
        };
        let manager = StateManager::new(&self.root, &self.config);
        let mut engine = ChangelogEngine::new(manager, scratch.path().join("Changelog.md"));

        let integrity = engine.validate_system_integrity();

        let entry = match engine.generate_answer_entry(
            "Validation test entry",
            "Test previous state",
            "Test current state",
        ) {
            Ok(entry) => entry,
            Err(e) => {
                return ValidationResult::fail(COMPONENT, format!("Entry generation error: {e}"), started)
            }
        };
        let formatted = format_answer_entry(&entry);

        let report = match engine.generate_workspace_report() {
            Ok(report) => report,
            Err(e) => {
                return ValidationResult::fail(COMPONENT, format!("Report generation error: {e}"), started)
            }
        };

        let mut issues = Vec::new();
        if !integrity {
            issues.push("Integrity check failed");
        }
        if formatted.len() < 100 {
            issues.push("Entry formatting failed");
        }
        if report.workspace_overview.state_hash.is_empty() {
            issues.push("Report generation failed");
        }

        let (status, message) = if issues.is_empty() {
            (ValidationStatus::Pass, "Changelog engine operational".to_string())
        } else {
            (
                ValidationStatus::Fail,
                format!("Changelog engine: {}", issues.join(", ")),
            )
        };

        ValidationResult::new(
            COMPONENT,
            status,
            message,
            started,
            json!({
                "integrity_check": integrity,
                "entry_length": formatted.len(),
                "report_files": report.workspace_overview.total_files,
                "performance_ms": started.elapsed().as_secs_f64() * 1000.0,
            }),
        )
    }

    /// Write, rescan and diff inside a scratch directory
    pub fn validate_file_operations(&self) -> ValidationResult {
        const COMPONENT: &str = "file_operations";
        let started = Instant::now();

        match check_file_operations(&self.scanner) {
            Ok(modified) => ValidationResult::new(
                COMPONENT,
                ValidationStatus::Pass,
                "File operations validated successfully",
                started,
                json!({
                    "file_creation": true,
                    "file_reading": true,
                    "change_detection": modified,
                }),
            ),
            Err(message) => {
                ValidationResult::fail(COMPONENT, format!("File operations failed: {message}"), started)
            }
        }
    }

    pub fn validate_performance_metrics(&mut self) -> ValidationResult {
        const COMPONENT: &str = "performance_metrics";
        let started = Instant::now();

        let mut worst_ms: f64 = 0.0;
        for _ in 0..CACHE_PROBES {
            let probe = Instant::now();
            if let Err(e) = self.manager.get_current_state(false) {
                return ValidationResult::fail(COMPONENT, format!("Performance probe error: {e}"), started);
            }
            worst_ms = worst_ms.max(probe.elapsed().as_secs_f64() * 1000.0);
        }

        let metrics = self.manager.get_metrics();
        let thresholds = self.thresholds();

        let mut issues = Vec::new();
        if metrics.cache_size_mb > thresholds.memory_mb {
            issues.push(format!("Memory: {:.1}MB", metrics.cache_size_mb));
        }
        if worst_ms > thresholds.response_time_ms as f64 {
            issues.push(format!("Response: {worst_ms:.1}ms"));
        }
        if metrics.cache_hit_rate < thresholds.cache_hit_rate {
            issues.push(format!("Cache: {}", metrics.hit_rate_percent()));
        }

        let (status, message) = if issues.is_empty() {
            (ValidationStatus::Pass, "Performance optimal".to_string())
        } else {
            (
                ValidationStatus::Warning,
                format!("Performance: {}", issues.join(", ")),
            )
        };

        ValidationResult::new(
            COMPONENT,
            status,
            message,
            started,
            json!({
                "memory_mb": metrics.cache_size_mb,
                "response_time_ms": worst_ms,
                "cache_hit_rate": metrics.cache_hit_rate,
            }),
        )
    }

    /// Run all checks in order
    pub fn run_full_validation(&mut self) -> SystemHealth {
        let results = vec![
            self.validate_workspace_scanner(),
            self.validate_state_manager(),
            self.validate_changelog_engine(),
            self.validate_file_operations(),
            self.validate_performance_metrics(),
        ];

        for result in &results {
            log::debug!(
                "Validation {} {}: {} ({:.3}s)",
                result.component,
                result.status,
                result.message,
                result.execution_time
            );
        }

        SystemHealth::from_results(results)
    }
}

fn check_file_operations(scanner: &WorkspaceScanner) -> Result<bool, String> {
    let scratch = tempfile::tempdir().map_err(|e| e.to_string())?;
    let test_file = scratch.path().join("test_file.txt");

    fs::write(&test_file, "Validation test content").map_err(|e| e.to_string())?;
    let content = fs::read_to_string(&test_file).map_err(|e| e.to_string())?;
    if content != "Validation test content" {
        return Err("File content validation failed".to_string());
    }

    let initial = scanner.scan(scratch.path()).map_err(|e| e.to_string())?;
    fs::write(&test_file, "Modified content").map_err(|e| e.to_string())?;
    let modified = scanner.scan(scratch.path()).map_err(|e| e.to_string())?;

    let comparison = crate::core::classifier::compare_states(&initial, &modified);
    if comparison.modified.is_empty() {
        return Err("Change detection failed".to_string());
    }

    Ok(true)
}

/// Markdown report for a completed validation run
pub fn generate_validation_report(health: &SystemHealth) -> String {
    let mut lines = vec![
        "# SYSTEM VALIDATION REPORT".to_string(),
        format!("**Overall Status:** {}", health.overall_status),
        format!(
            "**Validation Date:** {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        String::new(),
        "## Component Validation Results".to_string(),
        String::new(),
    ];

    for result in &health.results {
        let details = serde_json::to_string_pretty(&result.details)
            .unwrap_or_else(|_| result.details.to_string());
        lines.push(format!("### {} {}", result.status.icon(), result.title()));
        lines.push(format!("**Status:** {}", result.status));
        lines.push(format!("**Message:** {}", result.message));
        lines.push(format!("**Execution Time:** {:.3}s", result.execution_time));
        lines.push(format!("**Details:** {details}"));
        lines.push(String::new());
    }

    lines.push("## Performance Metrics".to_string());
    lines.push(format!(
        "- **Total Validation Time:** {:.3}s",
        health.total_time
    ));
    lines.push(format!(
        "- **Average Component Time:** {:.3}s",
        health.average_component_time
    ));
    lines.push(format!("- **Pass Rate:** {:.1}%", health.pass_rate * 100.0));
    lines.push(String::new());
    lines.push("## Recommendations".to_string());
    lines.extend(health.recommendations.iter().map(|r| format!("- {r}")));

    lines.join("\n")
}
