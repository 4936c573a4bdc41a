//! Unified color system for change and health visualization.
//!
//! Every place that prints a change type, an impact level or a validation status goes
//! through this module, so the same thing is always the same color.
//!
//! # Color Scheme
//! - **Added**: Green
//! - **Modified**: Yellow
//! - **Removed**: Red
//! - **Impact**: HIGH red bold, MEDIUM yellow, LOW bright black
//! - **Validation**: PASS green, WARNING yellow, FAIL red bold

use crate::core::change::{ChangeType, ImpactLevel};
use crate::core::validation::{OverallStatus, ValidationStatus};
use colored::*;

/// Color closure for a change type
pub fn get_change_color_style(change_type: ChangeType) -> Box<dyn Fn(&str) -> ColoredString> {
    match change_type {
        ChangeType::Added => Box::new(|text: &str| text.green()),
        ChangeType::Modified => Box::new(|text: &str| text.yellow()),
        ChangeType::Removed => Box::new(|text: &str| text.red()),
    }
}

pub fn get_impact_color_style(impact: ImpactLevel) -> Box<dyn Fn(&str) -> ColoredString> {
    match impact {
        ImpactLevel::High => Box::new(|text: &str| text.red().bold()),
        ImpactLevel::Medium => Box::new(|text: &str| text.yellow()),
        ImpactLevel::Low => Box::new(|text: &str| text.bright_black()),
    }
}

/// Get colored file path using the change type color
pub fn get_colored_path(change_type: ChangeType, path: &str) -> ColoredString {
    let color_fn = get_change_color_style(change_type);
    color_fn(path)
}

/// Impact label padded to the widest level so change lines line up
pub fn get_aligned_impact(impact: ImpactLevel) -> ColoredString {
    let color_fn = get_impact_color_style(impact);
    color_fn(&format!("{:<6}", impact.as_str()))
}

/// `✓ PASS`, `⚠ WARNING`, `✗ FAIL`
pub fn get_validation_icon(status: ValidationStatus) -> ColoredString {
    match status {
        ValidationStatus::Pass => status.icon().green(),
        ValidationStatus::Warning => status.icon().yellow(),
        ValidationStatus::Fail => status.icon().red().bold(),
    }
}

pub fn get_overall_status_colored(status: OverallStatus) -> ColoredString {
    match status {
        OverallStatus::SystemOptimal => status.as_str().green(),
        OverallStatus::SystemDegraded => status.as_str().yellow(),
        OverallStatus::SystemFailure => status.as_str().red().bold(),
    }
}

/// Signed byte delta, colored by direction: `+5`, `-3`
pub fn get_colored_size_change(size_change: i64) -> ColoredString {
    let text = format!("{size_change:+}");
    match size_change {
        n if n > 0 => text.green(),
        n if n < 0 => text.red(),
        _ => text.bright_black(),
    }
}
