use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::*, workspace::*};

#[cfg(test)]
mod status_command_tests {
    use super::*;

    #[test]
    fn test_status_shows_workspace_header() -> anyhow::Result<()> {
        let ws = create_basic_workspace()?;

        ws.command()?
            .arg("status")
            .assert()
            .success()
            .stdout(assertions::has_workspace_header())
            .stdout(predicate::str::contains("(2 files,"))
            .stdout(predicate::str::contains("Baseline"))
            .stdout(predicate::str::contains("none recorded"));

        Ok(())
    }

    #[test]
    fn test_status_skips_ignored_directories() -> anyhow::Result<()> {
        let ws = create_nested_workspace()?;

        ws.command()?
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("(4 files,"));

        Ok(())
    }

    #[test]
    fn test_status_empty_workspace() -> anyhow::Result<()> {
        let ws = setup_workspace()?;

        ws.command()?
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("(0 files, 0.00 MB)"));

        Ok(())
    }

    #[test]
    fn test_status_reports_pending_changes() -> anyhow::Result<()> {
        let ws = create_basic_workspace()?;

        ws.command()?.arg("changes").assert().success();
        ws.command()?
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("no pending changes"));

        create_file(&ws.path, "c.txt", "new\n")?;
        ws.command()?
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("changes pending"));

        Ok(())
    }

    #[test]
    fn test_status_with_explicit_root() -> anyhow::Result<()> {
        let ws = create_basic_workspace()?;
        let elsewhere = setup_workspace()?;

        let mut cmd = elsewhere.command()?;
        cmd.arg("--root")
            .arg(ws.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("(2 files,"));

        Ok(())
    }

    #[test]
    fn test_status_missing_root_fails() -> anyhow::Result<()> {
        let ws = setup_workspace()?;

        ws.command()?
            .arg("--root")
            .arg(ws.path().join("does-not-exist"))
            .arg("status")
            .assert()
            .failure()
            .stdout(assertions::bad_root());

        Ok(())
    }

    #[test]
    fn test_status_root_is_a_file_fails() -> anyhow::Result<()> {
        let ws = create_basic_workspace()?;

        ws.command()?
            .arg("--root")
            .arg(ws.path().join("a.py"))
            .arg("status")
            .assert()
            .failure()
            .stdout(assertions::bad_root());

        Ok(())
    }
}
