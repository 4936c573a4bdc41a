//! Changetrail - workspace snapshot, diff and changelog generation.
//!
//! This library snapshots a directory tree, diffs successive snapshots to find added,
//! modified and removed files, classifies each change by file type and impact, and
//! records the result as numbered markdown changelog entries.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Workspace scanning and immutable snapshots
//! - Cached state management and change classification
//! - Changelog generation, validation and pre/post hooks
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    compare_states,
    // Changelog and hooks
    ChangelogEngine,
    ChangelogHooks,
    // Change detection
    ChangeClassifier,
    ChangeEvent,
    ChangeSummary,
    ChangeType,
    // Error handling
    ChangetrailError,
    FileType,
    ImpactLevel,
    Result,
    StateComparison,
    StateManager,
    // Configuration
    TrackerConfig,
    ValidationSuite,
    // Snapshots
    WorkspaceScanner,
    WorkspaceState,
};
