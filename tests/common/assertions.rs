//! Predicates for validating changetrail command output

#![allow(dead_code)]

use predicates::prelude::*;

pub fn bad_root() -> impl Predicate<str> {
    predicates::str::contains("Invalid workspace root")
}

pub fn has_workspace_header() -> impl Predicate<str> {
    predicates::str::contains("Workspace:").and(predicates::str::contains("State:"))
}

/// Checks for a numbered change line index
pub fn has_change_index(index: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("[{}]", index))
}

/// Impact labels are left-aligned to a fixed width, so only the prefix is matched
pub fn has_impact(impact: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("({}", impact))
}

pub fn has_section(title: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("➤ {}:", title))
}

pub fn no_changes() -> impl Predicate<str> {
    predicates::str::contains("No changes since the last baseline.")
}

pub fn baseline_recorded() -> impl Predicate<str> {
    predicates::str::contains("Baseline recorded.")
}
