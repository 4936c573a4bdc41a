use crate::core::{
    command_init::WorkspaceCommandInit, error::Result, output::print_success,
};
use std::path::PathBuf;

pub fn execute_log(
    root: Option<PathBuf>,
    summary: &str,
    previous: Option<&str>,
    current: Option<&str>,
) -> Result<()> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut engine = context.restore_engine()?;

    let entry = engine.update_changelog(
        summary,
        previous.unwrap_or_default(),
        current.unwrap_or_default(),
    )?;
    context.persist(engine.manager())?;

    print_success(&format!(
        "Recorded answer #{:03} in {}",
        engine.answer_counter(),
        engine.changelog_path().display()
    ));
    println!();
    log::debug!("Entry:\n{entry}");

    Ok(())
}
