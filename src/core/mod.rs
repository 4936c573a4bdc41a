//! Core functionality for the changetrail tool.
//!
//! This module provides the snapshot-and-diff engine (scanner, cache, classifier,
//! manager), the layers built on it (changelog, validation, hooks) and the shared
//! error, configuration and UI building blocks.

pub mod baseline_store;
pub mod cache;
pub mod change;
pub mod changelog;
pub mod classifier;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod file_type;
pub mod hooks;
pub mod manager;
pub mod output;
pub mod scanner;
pub mod state;
pub mod templates;
pub mod validation;

// === Error handling ===
pub use error::{ChangetrailError, Result};

// === Configuration ===
pub use config::{FirstRunPolicy, TrackerConfig, ValidationThresholds};

// === Snapshots ===
// Immutable workspace snapshots and the scanner that produces them
pub use file_type::FileType;
pub use scanner::WorkspaceScanner;
pub use state::{FileRecord, ScanWarning, WorkspaceState};

// === Change detection ===
pub use cache::StateCache;
pub use change::{ChangeDetails, ChangeEvent, ChangeSummary, ChangeType, ImpactLevel};
pub use classifier::{compare_states, ChangeClassifier, StateComparison};
pub use manager::{CacheMetrics, StateManager};

// === Persistence ===
pub use baseline_store::BaselineStore;

// === Command initialization ===
// Root resolution, config loading and baseline restore shared by all commands
pub use command_init::{WorkspaceCommandContext, WorkspaceCommandInit};

// === Changelog, validation and hooks ===
pub use changelog::{
    ActionType, AnswerEntry, ChangelogEngine, FileAffected, FileOperation, WorkspaceReport,
};
pub use hooks::{ChangelogHooks, HookOutcome, SessionInfo};
pub use validation::{
    generate_validation_report, OverallStatus, SystemHealth, ValidationResult, ValidationStatus,
    ValidationSuite,
};

// === UI templates ===
pub use templates::{
    render_template, render_template_plain, strip_ansi_codes, TemplateContext, Templates, TEMPLATES,
};

// === Output formatting ===
pub use output::{
    print_error, print_field, print_info, print_section_header, print_success, print_warning,
};
