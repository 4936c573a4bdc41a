use crate::core::{
    command_init::WorkspaceCommandInit,
    error::Result,
    output::{print_info, print_success},
};
use std::path::PathBuf;

/// Forget the persisted baseline; the next `changes` starts over
pub fn execute_reset(root: Option<PathBuf>) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;

    if context.clear_baseline()? {
        print_success(&format!("Baseline cleared for {}", context.root.display()));
        println!();
    } else {
        print_info("No baseline recorded for this workspace.");
    }

    Ok(())
}
