use crate::core::{
    change::{format_counts, ChangeEvent, ChangeType},
    command_init::WorkspaceCommandInit,
    error::Result,
    output::print_info,
    templates::{render_template, TemplateContext, TEMPLATES},
};
use std::path::PathBuf;

/// Detect changes since the persisted baseline, print them and advance the baseline
pub fn execute_changes(root: Option<PathBuf>, json: bool) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut manager = context.restore_manager()?;
    let first_run = manager.baseline().is_none();

    let changes = manager.detect_changes()?;
    context.persist(&manager)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    if changes.is_empty() {
        if first_run {
            print_info("Baseline recorded. Future runs will report changes from here.");
        } else {
            print_info("No changes since the last baseline.");
        }
        return Ok(());
    }

    println!();
    print_grouped_changes(&changes);

    let summary = manager.generate_change_summary(&changes);
    println!(
        "\n{} changes {} {}\n",
        summary.total_changes,
        format_counts(&summary.by_type),
        format_counts(&summary.by_impact)
    );

    Ok(())
}

/// Print changes grouped by type, numbered continuously across groups
pub fn print_grouped_changes(changes: &[ChangeEvent]) {
    let mut n = 0;

    for change_type in [ChangeType::Added, ChangeType::Modified, ChangeType::Removed] {
        let group: Vec<&ChangeEvent> = changes
            .iter()
            .filter(|event| event.change_type == change_type)
            .collect();
        if group.is_empty() {
            continue;
        }

        println!(
            "{}",
            render_template(TEMPLATES.section_for(change_type), &TemplateContext::default())
        );
        for event in group {
            n += 1;
            println!("{}", render_change_line(n, event));
        }
        println!();
    }
}

fn render_change_line(n: usize, event: &ChangeEvent) -> String {
    let context = TemplateContext {
        impact: Some(event.impact_level),
        n: Some(n),
        filename: Some(&event.file_path),
        change_type: Some(event.change_type),
        size_change: event.details.size_change,
        ..Default::default()
    };
    render_template(TEMPLATES.change_line, &context)
}
