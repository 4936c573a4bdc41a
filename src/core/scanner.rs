//! Workspace scanning and snapshot construction.
//!
//! [`WorkspaceScanner`] walks a directory tree with `walkdir`, hashes the full content of
//! every regular file and produces an immutable [`WorkspaceState`]. It also computes a
//! cheap metadata-only fingerprint used by the state cache to skip rescans.
//!
//! # Failure Model
//! - **Root-level failures** (missing root, root is a file, unreadable root) are fatal
//!   and returned as [`ChangetrailError`]
//! - **Per-entry failures** (permission denied, file vanished mid-scan) are logged,
//!   recorded as [`ScanWarning`]s and skipped; the scan always completes
//!
//! Symbolic links are neither followed nor recorded.

use crate::core::config::TrackerConfig;
use crate::core::error::{ChangetrailError, Result};
use crate::core::file_type::FileType;
use crate::core::state::{FileRecord, ScanWarning, WorkspaceState, ROOT_DIR};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Default)]
pub struct WorkspaceScanner {
    ignored_dirs: BTreeSet<String>,
    ignored_files: BTreeSet<String>,
    ignored_paths: BTreeSet<String>,
}

impl WorkspaceScanner {
    pub fn new<D, F>(ignored_dirs: D, ignored_files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            ignored_dirs: ignored_dirs.into_iter().map(Into::into).collect(),
            ignored_files: ignored_files.into_iter().map(Into::into).collect(),
            ignored_paths: BTreeSet::new(),
        }
    }

    /// Build a scanner from configuration. The configured changelog is excluded when it
    /// lives inside `root`, so writing it never shows up as a workspace change.
    pub fn from_config(config: &TrackerConfig, root: &Path) -> Self {
        let mut scanner = Self::new(config.ignored_dirs.clone(), config.ignored_files.clone());

        let changelog = config.resolve_changelog_path(root);
        if let Ok(relative) = changelog.strip_prefix(root) {
            scanner = scanner.with_ignored_path(relative_key(relative));
        }

        scanner
    }

    /// Exclude one exact relative path (`/`-separated)
    pub fn with_ignored_path(mut self, path: impl Into<String>) -> Self {
        self.ignored_paths.insert(path.into());
        self
    }

    /// Validate the root and return its canonical form
    pub fn check_root(root: &Path) -> Result<PathBuf> {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ChangetrailError::root_not_found(root));
            }
            Err(e) => return Err(ChangetrailError::scan_io(root, e)),
        };

        if !metadata.is_dir() {
            return Err(ChangetrailError::root_not_directory(root));
        }

        root.canonicalize()
            .map_err(|e| ChangetrailError::scan_io(root, e))
    }

    /// Walk `root` and build a full snapshot
    pub fn scan(&self, root: &Path) -> Result<WorkspaceState> {
        let root = Self::check_root(root)?;
        log::debug!("Scanning workspace: {}", root.display());

        let mut files = BTreeMap::new();
        let mut directories = BTreeSet::new();
        let mut warnings = Vec::new();

        for result in self.walk(&root) {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                        return Err(ChangetrailError::scan_io(path, err.into()));
                    }
                    let path = err
                        .path()
                        .map(|p| display_relative(&root, p))
                        .unwrap_or_default();
                    log::warn!("Skipping unreadable entry {path}: {err}");
                    warnings.push(ScanWarning {
                        path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let rel_path = display_relative(&root, entry.path());
            let file_type = entry.file_type();

            if file_type.is_dir() {
                directories.insert(rel_path);
                continue;
            }

            if !file_type.is_file() {
                log::debug!("Skipping non-regular entry: {rel_path}");
                continue;
            }

            match read_record(&entry, &rel_path) {
                Ok(record) => {
                    files.insert(rel_path, record);
                }
                Err(e) => {
                    log::warn!("Skipping file {rel_path}: {e}");
                    warnings.push(ScanWarning {
                        path: rel_path,
                        message: e.to_string(),
                    });
                }
            }
        }

        let state = WorkspaceState::new(root, files, directories, warnings);
        log::debug!(
            "Scan complete: {} files, {} directories, {} warnings, hash {}",
            state.total_files,
            state.directories.len(),
            state.warnings.len(),
            state.short_hash()
        );

        Ok(state)
    }

    /// Cheap metadata-only signal over the same tree `scan` would visit.
    ///
    /// Covers relative paths, sizes, modification times (nanoseconds) and, on unix,
    /// inode and ctime; file contents are never read.
    pub fn fingerprint(&self, root: &Path) -> Result<String> {
        let root = Self::check_root(root)?;
        let mut lines = Vec::new();

        for result in self.walk(&root) {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(ChangetrailError::scan_io(&root, err.into()));
                    }
                    log::debug!("Fingerprint skipping entry: {err}");
                    continue;
                }
            };

            let rel_path = display_relative(&root, entry.path());
            let Ok(metadata) = entry.metadata() else {
                lines.push(format!("?\t{rel_path}"));
                continue;
            };
            let mtime = metadata.modified().map(nanos_since_epoch).unwrap_or(0);
            let stamp = change_stamp(&metadata);

            if metadata.is_dir() {
                lines.push(format!("d\t{rel_path}\t{mtime}\t{stamp}"));
            } else if metadata.is_file() {
                lines.push(format!("f\t{rel_path}\t{}\t{mtime}\t{stamp}", metadata.len()));
            }
        }

        lines.sort_unstable();
        Ok(format!("{:x}", md5::compute(lines.join("\n").as_bytes())))
    }

    fn walk(&self, root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> + '_ {
        let root_owned = root.to_path_buf();
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !self.is_ignored(&root_owned, entry))
    }

    fn is_ignored(&self, root: &Path, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            if self.ignored_dirs.contains(name.as_ref()) {
                return true;
            }
        } else if self.ignored_files.contains(name.as_ref()) {
            return true;
        }

        !self.ignored_paths.is_empty()
            && self
                .ignored_paths
                .contains(&display_relative(root, entry.path()))
    }
}

fn read_record(entry: &DirEntry, rel_path: &str) -> std::io::Result<FileRecord> {
    let metadata = entry.metadata().map_err(std::io::Error::from)?;
    let content = fs::read(entry.path())?;

    let modified_time = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| DateTime::<Utc>::from(UNIX_EPOCH));

    Ok(FileRecord {
        path: rel_path.to_string(),
        size: content.len() as u64,
        content_hash: format!("{:x}", md5::compute(&content)),
        modified_time,
        file_type: FileType::from_path(rel_path),
    })
}

/// Inode and status-change time. Any write bumps ctime, and ctime cannot be set
/// back from user space the way mtime can.
#[cfg(unix)]
fn change_stamp(metadata: &fs::Metadata) -> String {
    use std::os::unix::fs::MetadataExt;
    format!("{}:{}.{}", metadata.ino(), metadata.ctime(), metadata.ctime_nsec())
}

#[cfg(not(unix))]
fn change_stamp(_metadata: &fs::Metadata) -> String {
    String::new()
}

fn nanos_since_epoch(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

/// Relative `/`-separated key for a path under `root`; the root itself is `"."`
fn display_relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative_key(relative),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

fn relative_key(relative: &Path) -> String {
    if relative.as_os_str().is_empty() {
        ROOT_DIR.to_string()
    } else {
        relative.to_string_lossy().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scanner() -> WorkspaceScanner {
        WorkspaceScanner::from_config(&TrackerConfig::default(), Path::new("/nonexistent"))
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_tree() {
        let dir = TempDir::new().unwrap();
        let state = scanner().scan(dir.path()).unwrap();

        assert!(state.files.is_empty());
        assert_eq!(state.directories.len(), 1);
        assert!(state.directories.contains(ROOT_DIR));
        assert_eq!(state.total_files, 0);
        assert_eq!(state.total_size, 0);
        assert!(!state.state_hash.is_empty());
        assert_eq!(
            state.state_hash,
            WorkspaceState::empty(dir.path().to_path_buf()).state_hash
        );
    }

    #[test]
    fn test_scan_records_files_and_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "0123456789");
        write(dir.path(), "docs/b.md", "hello");

        let state = scanner().scan(dir.path()).unwrap();
        assert_eq!(state.total_files, 2);
        assert_eq!(state.total_size, 15);
        assert!(state.directories.contains("docs"));

        let record = &state.files["docs/b.md"];
        assert_eq!(record.size, 5);
        assert_eq!(record.file_type, FileType::Markdown);
        assert_eq!(record.content_hash, format!("{:x}", md5::compute(b"hello")));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = TempDir::new().unwrap();
        for name in ["z.rs", "a.rs", "m/n.rs", "m/a.txt"] {
            write(dir.path(), name, name);
        }

        let first = scanner().scan(dir.path()).unwrap();
        let second = scanner().scan(dir.path()).unwrap();
        assert_eq!(first.state_hash, second.state_hash);
    }

    #[test]
    fn test_ignored_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/main.rs", "fn main() {}");
        write(dir.path(), ".git/HEAD", "ref: refs/heads/main");
        write(dir.path(), "pkg/__pycache__/mod.pyc", "bytecode");
        write(dir.path(), "Changelog.md", "# CHANGELOG.md");

        let state = scanner().scan(dir.path()).unwrap();
        assert_eq!(state.files.keys().collect::<Vec<_>>(), vec!["src/main.rs"]);
        assert!(!state.directories.contains(".git"));
        assert!(!state.directories.contains("pkg/__pycache__"));
        assert!(state.directories.contains("pkg"));
    }

    #[test]
    fn test_custom_ignore_sets() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "build/out.js", "x");
        write(dir.path(), "notes.tmp", "x");
        write(dir.path(), "keep.py", "x");

        let scanner = WorkspaceScanner::new(["build"], ["notes.tmp"]);
        let state = scanner.scan(dir.path()).unwrap();
        assert_eq!(state.files.keys().collect::<Vec<_>>(), vec!["keep.py"]);
    }

    #[test]
    fn test_ignored_path_from_config() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/CHANGES.md", "log");
        write(dir.path(), "docs/guide.md", "guide");

        let root = dir.path().canonicalize().unwrap();
        let config = TrackerConfig {
            changelog_path: PathBuf::from("docs/CHANGES.md"),
            ..Default::default()
        };
        let state = WorkspaceScanner::from_config(&config, &root)
            .scan(&root)
            .unwrap();
        assert!(state.files.contains_key("docs/guide.md"));
        assert!(!state.files.contains_key("docs/CHANGES.md"));
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let err = scanner().scan(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ChangetrailError::RootNotFound { .. }));
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "file.txt", "x");
        let err = scanner().scan(&dir.path().join("file.txt")).unwrap_err();
        assert!(matches!(err, ChangetrailError::RootNotDirectory { .. }));
        assert!(err.is_bad_root());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "ok.py", "fine");
        write(dir.path(), "secret.py", "hidden");
        let secret = dir.path().join("secret.py");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permission bits, so only assert when the read fails
        if fs::read(&secret).is_err() {
            let state = scanner().scan(dir.path()).unwrap();
            assert!(state.files.contains_key("ok.py"));
            assert!(!state.files.contains_key("secret.py"));
            assert_eq!(state.warnings.len(), 1);
            assert_eq!(state.warnings[0].path, "secret.py");
        }

        fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn test_fingerprint_tracks_metadata() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "one");

        let scanner = scanner();
        let first = scanner.fingerprint(dir.path()).unwrap();
        assert_eq!(first, scanner.fingerprint(dir.path()).unwrap());

        write(dir.path(), "b.py", "two");
        assert_ne!(first, scanner.fingerprint(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_fingerprint_sees_same_size_edit_with_restored_mtime() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "aaaa");
        let path = dir.path().join("a.py");
        let mtime = filetime::FileTime::from_last_modification_time(&fs::metadata(&path).unwrap());

        let scanner = scanner();
        let first = scanner.fingerprint(dir.path()).unwrap();

        // Let the clock move past the first write's ctime even on coarse filesystems
        std::thread::sleep(std::time::Duration::from_millis(1100));
        write(dir.path(), "a.py", "bbbb");
        filetime::set_file_mtime(&path, mtime).unwrap();

        assert_ne!(first, scanner.fingerprint(dir.path()).unwrap());
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/work");
        assert_eq!(display_relative(root, Path::new("/work")), ".");
        assert_eq!(display_relative(root, Path::new("/work/src/lib.rs")), "src/lib.rs");
    }
}
