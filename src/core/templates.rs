//! Template system for consistent output formatting.
//!
//! This module renders the headers, section titles and numbered change lines printed
//! by the CLI. Templates are plain strings with `{placeholder}` slots filled from a
//! [`TemplateContext`] in a single pass, then colored according to the template kind.
//!
//! # Public API
//! - [`Templates`]: Template definitions for all output sections
//! - [`TemplateContext`]: Context data for template rendering
//! - [`TEMPLATES`]: Global template instance
//! - [`render_template`]: Main rendering function with colors
//! - [`render_template_plain`]: Plain text rendering for testing
//! - [`strip_ansi_codes`]: Utility for removing color codes
//!
//! # Template Categories
//! - **Headers**: Workspace root and state hash
//! - **Sections**: Added, modified and removed groups
//! - **Change lines**: Individual change entries with impact and index

use crate::core::change::{ChangeType, ImpactLevel};
use crate::core::colors::{get_aligned_impact, get_colored_path, get_colored_size_change};
use colored::*;
use std::fmt::Write;

/// Template definitions for all output formatting
pub struct Templates {
    pub header_empty_line: &'static str,
    pub header_workspace: &'static str,
    pub header_state: &'static str,

    pub section_added: &'static str,
    pub section_modified: &'static str,
    pub section_removed: &'static str,

    pub change_line: &'static str,
}

/// Global templates instance
pub static TEMPLATES: Templates = Templates {
    header_empty_line: "",
    header_workspace: "Workspace: {root}",
    header_state: "State: {short_hash} ({count} files, {size})",
    section_added: "➤ Added:",
    section_modified: "➤ Modified:",
    section_removed: "➤ Removed:",
    change_line: "   ({impact}) [{n}] {filename}{size_change}",
};

impl Templates {
    pub fn section_for(&self, change_type: ChangeType) -> &'static str {
        match change_type {
            ChangeType::Added => self.section_added,
            ChangeType::Modified => self.section_modified,
            ChangeType::Removed => self.section_removed,
        }
    }
}

/// Context for template rendering
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    pub root: Option<&'a str>,
    pub short_hash: Option<&'a str>,
    pub size: Option<&'a str>,
    pub count: Option<usize>,
    pub filename: Option<&'a str>,
    pub n: Option<usize>,
    pub impact: Option<ImpactLevel>,
    pub change_type: Option<ChangeType>,
    pub size_change: Option<i64>,
}

/// Render a template with context and apply colors
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let estimated_capacity = template.len()
        + context.root.map_or(0, str::len)
        + context.short_hash.map_or(0, str::len)
        + context.size.map_or(0, str::len)
        + context.filename.map_or(0, str::len)
        + 64;

    let mut result = String::with_capacity(estimated_capacity);
    render_template_single_pass(template, context, &mut result);

    apply_colors(&result, template, context)
}

/// Single-pass placeholder substitution
fn render_template_single_pass(template: &str, context: &TemplateContext, output: &mut String) {
    let mut numbers = itoa::Buffer::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            // No closing brace, treat the remainder as literal
            output.push_str(&rest[open..]);
            return;
        };

        let placeholder = &after[..close];
        match placeholder {
            "root" => output.push_str(context.root.unwrap_or_default()),
            "short_hash" => output.push_str(context.short_hash.unwrap_or_default()),
            "size" => output.push_str(context.size.unwrap_or_default()),
            "filename" => output.push_str(context.filename.unwrap_or_default()),
            "count" => {
                if let Some(value) = context.count {
                    output.push_str(numbers.format(value));
                }
            }
            "n" => {
                if let Some(value) = context.n {
                    output.push_str(numbers.format(value));
                }
            }
            "impact" => {
                if let Some(impact) = context.impact {
                    output.push_str(impact.as_str());
                }
            }
            "size_change" => {
                if let Some(delta) = context.size_change {
                    let _ = write!(output, " ({delta:+})");
                }
            }
            _ => {
                // Unknown placeholder, keep as-is
                output.push('{');
                output.push_str(placeholder);
                output.push('}');
            }
        }

        rest = &after[close + 1..];
    }

    output.push_str(rest);
}

fn apply_colors(text: &str, template: &str, context: &TemplateContext) -> String {
    let mut result = String::with_capacity(text.len() + 64);

    match template {
        t if t.starts_with("Workspace:") => match context.root {
            Some(root) => {
                let _ = write!(result, "Workspace: {}", root.blue());
            }
            None => result.push_str(text),
        },

        t if t.starts_with("State:") => match (context.short_hash, context.count, context.size) {
            (Some(hash), Some(count), Some(size)) => {
                let _ = write!(
                    result,
                    "State: {} {}{} files, {}{}",
                    hash.blue(),
                    "(".bright_black(),
                    count.to_string().white(),
                    size.white(),
                    ")".bright_black()
                );
            }
            _ => result.push_str(text),
        },

        t if t == TEMPLATES.section_added => {
            let _ = write!(result, "{} {}", "➤".green(), "Added:".green());
        }
        t if t == TEMPLATES.section_modified => {
            let _ = write!(result, "{} {}", "➤".yellow(), "Modified:".yellow());
        }
        t if t == TEMPLATES.section_removed => {
            let _ = write!(result, "{} {}", "➤".red(), "Removed:".red());
        }

        t if t == TEMPLATES.change_line => {
            result.push_str("   ");

            if let Some(impact) = context.impact {
                let _ = write!(
                    result,
                    "{}{}{}",
                    "(".bright_black(),
                    get_aligned_impact(impact),
                    ")".bright_black()
                );
            }

            result.push(' ');

            if let Some(n) = context.n {
                let _ = write!(
                    result,
                    "{}{}{}",
                    "[".bright_black(),
                    n.to_string().white(),
                    "]".bright_black()
                );
            }

            result.push(' ');

            if let (Some(filename), Some(change_type)) = (context.filename, context.change_type) {
                let _ = write!(result, "{}", get_colored_path(change_type, filename));
            }

            if let Some(delta) = context.size_change {
                let _ = write!(
                    result,
                    " {}{}{}",
                    "(".bright_black(),
                    get_colored_size_change(delta),
                    ")".bright_black()
                );
            }
        }

        _ => result.push_str(text),
    }

    result
}

/// Strip ANSI color codes for testing
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Render template without colors for testing
pub fn render_template_plain(template: &str, context: &TemplateContext) -> String {
    strip_ansi_codes(&render_template(template, context))
}
