//! Workspace snapshot data structures.
//!
//! This module defines the immutable snapshot produced by a workspace scan and the
//! canonical hashing that makes two snapshots of the same tree compare equal.
//!
//! # Public API
//! - [`FileRecord`]: One regular file with its content hash and metadata
//! - [`ScanWarning`]: A non-fatal per-entry problem recorded during a scan
//! - [`WorkspaceState`]: Complete snapshot of a directory tree
//!
//! # Hashing Strategy
//! - **Content authority**: `content_hash` is an MD5 over the full file bytes
//! - **Canonical order**: `state_hash` is computed over sorted directories and sorted
//!   `(path, content_hash, size)` triples, so filesystem iteration order never matters
//! - **Metadata excluded**: modification times and warnings never reach `state_hash`

use crate::core::file_type::FileType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::PathBuf;

/// Relative path used for the workspace root in `directories`
pub const ROOT_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    pub content_hash: String,
    pub modified_time: DateTime<Utc>,
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub root: PathBuf,
    pub files: BTreeMap<String, FileRecord>,
    pub directories: BTreeSet<String>,
    pub total_files: usize,
    pub total_size: u64,
    pub state_hash: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub warnings: Vec<ScanWarning>,
}

impl WorkspaceState {
    /// Build a snapshot, deriving totals and `state_hash` from the file and directory sets
    pub fn new(
        root: PathBuf,
        files: BTreeMap<String, FileRecord>,
        directories: BTreeSet<String>,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        let total_files = files.len();
        let total_size = files.values().map(|record| record.size).sum();
        let state_hash = compute_state_hash(&files, &directories);

        Self {
            root,
            files,
            directories,
            total_files,
            total_size,
            state_hash,
            captured_at: Utc::now(),
            warnings,
        }
    }

    /// Snapshot of a tree containing nothing but its root directory
    pub fn empty(root: PathBuf) -> Self {
        let mut directories = BTreeSet::new();
        directories.insert(ROOT_DIR.to_string());
        Self::new(root, BTreeMap::new(), directories, Vec::new())
    }

    /// Check that derived fields still match the file and directory sets.
    ///
    /// Returns a description of the first inconsistency found.
    pub fn verify(&self) -> std::result::Result<(), String> {
        if self.total_files != self.files.len() {
            return Err(format!(
                "total_files is {} but {} files are recorded",
                self.total_files,
                self.files.len()
            ));
        }

        let size: u64 = self.files.values().map(|record| record.size).sum();
        if self.total_size != size {
            return Err(format!(
                "total_size is {} but files add up to {}",
                self.total_size, size
            ));
        }

        if let Some((key, record)) = self.files.iter().find(|(key, record)| **key != record.path) {
            return Err(format!("file key '{key}' does not match record path '{}'", record.path));
        }

        let expected = compute_state_hash(&self.files, &self.directories);
        if self.state_hash != expected {
            return Err(format!(
                "state_hash {} does not match recomputed {}",
                self.state_hash, expected
            ));
        }

        Ok(())
    }

    pub fn total_size_mb(&self) -> f64 {
        self.total_size as f64 / (1024.0 * 1024.0)
    }

    /// Short prefix of the state hash for display
    pub fn short_hash(&self) -> &str {
        let end = self.state_hash.len().min(12);
        &self.state_hash[..end]
    }
}

/// Canonical, order-independent hash over a snapshot's contents
pub fn compute_state_hash(
    files: &BTreeMap<String, FileRecord>,
    directories: &BTreeSet<String>,
) -> String {
    // BTree iteration is sorted, which gives the canonical order
    let mut canonical = String::with_capacity(directories.len() * 16 + files.len() * 64);

    for dir in directories {
        let _ = writeln!(canonical, "D\t{dir}");
    }
    for (path, record) in files {
        let _ = writeln!(canonical, "F\t{path}\t{}\t{}", record.content_hash, record.size);
    }

    format!("{:x}", md5::compute(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, content: &[u8]) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size: content.len() as u64,
            content_hash: format!("{:x}", md5::compute(content)),
            modified_time: Utc::now(),
            file_type: FileType::from_path(path),
        }
    }

    fn state_from(entries: &[(&str, &str)]) -> WorkspaceState {
        let files = entries
            .iter()
            .map(|(path, content)| (path.to_string(), record(path, content.as_bytes())))
            .collect();
        let mut directories = BTreeSet::new();
        directories.insert(ROOT_DIR.to_string());
        WorkspaceState::new(PathBuf::from("/work"), files, directories, Vec::new())
    }

    #[test]
    fn test_empty_state_has_hash() {
        let state = WorkspaceState::empty(PathBuf::from("/work"));
        assert_eq!(state.total_files, 0);
        assert_eq!(state.total_size, 0);
        assert!(state.directories.contains(ROOT_DIR));
        assert_eq!(state.state_hash.len(), 32);
        assert!(state.verify().is_ok());
    }

    #[test]
    fn test_totals_derived_from_files() {
        let state = state_from(&[("a.py", "0123456789"), ("b.md", "hello")]);
        assert_eq!(state.total_files, 2);
        assert_eq!(state.total_size, 15);
    }

    #[test]
    fn test_hash_independent_of_insertion_order() {
        let forward = state_from(&[("a.py", "a"), ("z/b.md", "b"), ("m.rs", "m")]);
        let backward = state_from(&[("m.rs", "m"), ("z/b.md", "b"), ("a.py", "a")]);
        assert_eq!(forward.state_hash, backward.state_hash);
    }

    #[test]
    fn test_hash_ignores_modified_time() {
        let mut first = state_from(&[("a.py", "same")]);
        let second = state_from(&[("a.py", "same")]);
        first
            .files
            .get_mut("a.py")
            .unwrap()
            .modified_time = DateTime::<Utc>::from(std::time::UNIX_EPOCH);
        assert_eq!(
            compute_state_hash(&first.files, &first.directories),
            second.state_hash
        );
    }

    #[test]
    fn test_hash_changes_with_content_and_directories() {
        let base = state_from(&[("a.py", "one")]);
        let edited = state_from(&[("a.py", "two")]);
        assert_ne!(base.state_hash, edited.state_hash);

        let mut dirs = base.directories.clone();
        dirs.insert("src".to_string());
        assert_ne!(compute_state_hash(&base.files, &dirs), base.state_hash);
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut state = state_from(&[("a.py", "content")]);
        state.files.get_mut("a.py").unwrap().content_hash = "0".repeat(32);
        assert!(state.verify().unwrap_err().contains("state_hash"));

        let mut state = state_from(&[("a.py", "content")]);
        state.total_files = 5;
        assert!(state.verify().is_err());
    }

    #[test]
    fn test_short_hash() {
        let state = state_from(&[]);
        assert_eq!(state.short_hash().len(), 12);
        assert!(state.state_hash.starts_with(state.short_hash()));
    }

    #[test]
    fn test_serde_round_trip_preserves_hash() {
        let state = state_from(&[("src/main.rs", "fn main() {}")]);
        let json = serde_json::to_string(&state).unwrap();
        let restored: WorkspaceState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert!(restored.verify().is_ok());
    }
}
