use crate::commands::changes::print_grouped_changes;
use crate::commands::status::format_size_mb;
use crate::core::{
    change::format_counts,
    command_init::WorkspaceCommandInit,
    error::Result,
    output::{print_field, print_section_header},
};
use std::path::PathBuf;

/// Print the workspace report. The persisted baseline is left untouched.
pub fn execute_report(root: Option<PathBuf>, json: bool) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut engine = context.restore_engine()?;
    let report = engine.generate_workspace_report()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let overview = &report.workspace_overview;
    print_section_header("Workspace Overview");
    print_field("Files", &overview.total_files.to_string());
    print_field("Size", &format_size_mb(overview.total_size_mb));
    print_field("Directories", &overview.directories.to_string());
    print_field("State hash", &overview.state_hash);

    let analysis = &report.change_analysis;
    print_section_header("Change Analysis");
    print_field("Pending changes", &analysis.total_changes.to_string());
    if !analysis.is_empty() {
        let types: Vec<&str> = analysis.affected_types.iter().map(|t| t.as_str()).collect();
        print_field("Affected types", &types.join(", "));
        print_field("By impact", &format_counts(&analysis.by_impact));
        print_field("By type", &format_counts(&analysis.by_type));
        println!();
        print_grouped_changes(&report.changes);
    }

    let metrics = &report.performance_metrics;
    let health = &report.system_health;
    print_section_header("System Health");
    print_field("Cache hit rate", &metrics.hit_rate_percent());
    print_field("Cache size", &format!("{:.3} MB", health.memory_usage_mb));
    print_field("Response time", &format!("{:.1} ms", health.response_time_ms));
    print_field("Scan warnings", &health.scan_warnings.to_string());
    println!();

    Ok(())
}
