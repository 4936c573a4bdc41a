//! Temporary workspace management for integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use changetrail::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace plus isolated XDG homes.
/// The TempDirs must be kept alive for the duration of the test.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub cache_home: TempDir,
    pub config_home: TempDir,
}

impl TestWorkspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A `changetrail` command running inside this workspace
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("changetrail")?;
        cmd.current_dir(&self.path)
            .env("XDG_CACHE_HOME", self.cache_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}

/// Sets up an empty workspace
pub fn setup_workspace() -> Result<TestWorkspace> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();

    Ok(TestWorkspace {
        temp_dir,
        path,
        cache_home: TempDir::new()?,
        config_home: TempDir::new()?,
    })
}

/// Creates a file (and its parent directories) with the given content
pub fn create_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn remove_file(root: &Path, relative: &str) -> Result<()> {
    fs::remove_file(root.join(relative))?;
    Ok(())
}

/// Appends to a file, so its size always changes
pub fn append_to_file(root: &Path, relative: &str, extra: &str) -> Result<()> {
    let path = root.join(relative);
    let mut content = fs::read_to_string(&path)?;
    content.push_str(extra);
    fs::write(path, content)?;
    Ok(())
}

/// Creates multiple files with sequential content
pub fn create_test_files(root: &Path, relatives: &[&str]) -> Result<()> {
    for (i, relative) in relatives.iter().enumerate() {
        create_file(root, relative, &format!("content{}\nline 2\n", i + 1))?;
    }
    Ok(())
}
