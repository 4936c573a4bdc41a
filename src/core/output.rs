//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, yellow for warnings, green for success
//! - **Standardized spacing**: Newline before command output blocks

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a non-fatal warning
///
/// # Format
/// ```text
/// ⚠ Warning: <message>
/// ```
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠ Warning:".yellow(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints a neutral informational message
///
/// # Format
/// ```text
///
/// <message>
///
/// ```
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Aligned `label: value` line used in overviews
pub fn print_field(label: &str, value: &str) {
    let label = format!("{:<18}", format!("{label}:"));
    println!("  {} {}", label.bright_black(), value.white());
}
