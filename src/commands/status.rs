use crate::core::{
    command_init::WorkspaceCommandInit,
    error::Result,
    output::print_field,
    templates::{render_template, TemplateContext, TEMPLATES},
};
use std::path::PathBuf;

pub fn execute_status(root: Option<PathBuf>) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut manager = context.restore_manager()?;
    let had_baseline = manager.baseline().is_some();

    let state = manager.get_current_state(false)?;
    let root_text = state.root.display().to_string();
    let size_text = format_size_mb(state.total_size_mb());

    println!(
        "{}",
        render_template(TEMPLATES.header_empty_line, &TemplateContext::default())
    );
    println!(
        "{}",
        render_template(
            TEMPLATES.header_workspace,
            &TemplateContext {
                root: Some(&root_text),
                ..Default::default()
            }
        )
    );
    println!(
        "{}",
        render_template(
            TEMPLATES.header_state,
            &TemplateContext {
                short_hash: Some(state.short_hash()),
                count: Some(state.total_files),
                size: Some(&size_text),
                ..Default::default()
            }
        )
    );
    println!();

    print_field("Directories", &state.directories.len().to_string());
    print_field("Scan warnings", &state.warnings.len().to_string());

    let baseline_text = match manager.baseline() {
        Some(baseline) if had_baseline && baseline.state_hash == state.state_hash => {
            format!("{} (no pending changes)", baseline.short_hash())
        }
        Some(baseline) if had_baseline => {
            format!("{} (changes pending)", baseline.short_hash())
        }
        _ => "none recorded".to_string(),
    };
    print_field("Baseline", &baseline_text);

    let metrics = manager.get_metrics();
    print_field(
        "Cache",
        &format!(
            "{} hit rate, {} lookups, {:.3} MB",
            metrics.hit_rate_percent(),
            metrics.total_lookups(),
            metrics.cache_size_mb
        ),
    );

    for warning in &state.warnings {
        log::info!("Skipped {}: {}", warning.path, warning.message);
    }

    println!();
    Ok(())
}

pub(crate) fn format_size_mb(size_mb: f64) -> String {
    format!("{size_mb:.2} MB")
}
