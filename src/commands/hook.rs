use crate::core::{
    command_init::WorkspaceCommandInit,
    error::Result,
    hooks::ChangelogHooks,
    output::{print_success, print_warning},
};
use std::path::PathBuf;

/// Rebaseline before a unit of work
pub fn execute_hook_pre(root: Option<PathBuf>) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut engine = context.restore_engine()?;

    let state = ChangelogHooks::new(&mut engine, context.config.max_sync_changes).pre_response()?;
    context.persist(engine.manager())?;

    print_success(&format!(
        "Baseline {} recorded ({} files)",
        state.short_hash(),
        state.total_files
    ));
    println!();
    Ok(())
}

/// Record everything changed since `hook pre` as a changelog entry
pub fn execute_hook_post(root: Option<PathBuf>, summary: &str) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut engine = context.restore_engine()?;

    let outcome =
        ChangelogHooks::new(&mut engine, context.config.max_sync_changes).post_response(summary)?;
    context.persist(engine.manager())?;

    print_success(&format!(
        "Recorded answer #{:03} in {}",
        engine.answer_counter(),
        engine.changelog_path().display()
    ));
    if !outcome.sync_ok {
        print_warning("Workspace did not settle after the changelog update");
    }
    println!();
    Ok(())
}

/// Integrity check with recovery, for the start of a session
pub fn execute_hook_session(root: Option<PathBuf>) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut engine = context.restore_engine()?;

    let info = ChangelogHooks::new(&mut engine, context.config.max_sync_changes)
        .initialize_session()?;
    context.persist(engine.manager())?;

    if info.recovered {
        print_warning("Integrity check failed; workspace state was rebuilt");
    }
    print_success(&format!("Workspace state: {} files tracked", info.total_files));
    print_success(&format!("Changelog: answer #{:03} ready", info.next_answer));
    println!();
    Ok(())
}
