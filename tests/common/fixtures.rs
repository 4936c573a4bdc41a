//! Predefined workspace scenarios

#![allow(dead_code)]

use super::workspace::*;
use changetrail::core::error::Result;

/// Scenario: a small project with a source file and a readme
pub fn create_basic_workspace() -> Result<TestWorkspace> {
    let ws = setup_workspace()?;
    create_file(&ws.path, "a.py", "print('a')\n")?;
    create_file(&ws.path, "b.md", "# B\n")?;
    Ok(ws)
}

/// Scenario: nested directories plus content that must never be scanned
pub fn create_nested_workspace() -> Result<TestWorkspace> {
    let ws = setup_workspace()?;
    create_test_files(&ws.path, &["src/main.rs", "src/lib.rs", "docs/guide.md"])?;
    create_file(&ws.path, "settings.json", "{\"debug\": false}\n")?;
    create_file(&ws.path, ".git/HEAD", "ref: refs/heads/main\n")?;
    create_file(&ws.path, "node_modules/pkg/index.js", "module.exports = 1;\n")?;
    create_file(&ws.path, "__pycache__/a.cpython-311.pyc", "junk")?;
    Ok(ws)
}
