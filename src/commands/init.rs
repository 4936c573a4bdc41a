use crate::core::{
    command_init::WorkspaceCommandInit,
    config::{TrackerConfig, WORKSPACE_CONFIG_FILE},
    error::Result,
    output::{print_info, print_success},
};
use std::path::PathBuf;

/// Write a default workspace config and record the initial baseline
pub fn execute_init(root: Option<PathBuf>, force: bool) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let config_path = context.root.join(WORKSPACE_CONFIG_FILE);

    if config_path.exists() && !force {
        print_info(&format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        ));
    } else {
        let written = TrackerConfig::default().save_to_workspace(&context.root)?;
        print_success(&format!("Wrote {}", written.display()));
    }

    // Reload so the baseline honors the config on disk
    let context = WorkspaceCommandInit::initialize(Some(context.root))?;
    let mut manager = context.restore_manager()?;
    let state = manager.reset_baseline()?;
    context.persist(&manager)?;

    print_success(&format!(
        "Baseline {} recorded ({} files)",
        state.short_hash(),
        state.total_files
    ));
    println!();
    Ok(())
}
