//! Type-safe file classification.
//!
//! This module defines [`FileType`], the coarse technology category attached to every
//! scanned file and every change event. Classification is a pure function of the file
//! path and uses two lookup tables with a fixed precedence:
//!
//! 1. the exact (lowercased) file name, for well-known files such as `Cargo.toml`
//! 2. the (lowercased) final extension
//!
//! Anything not found in either table is [`FileType::Unknown`]. Every key maps to a
//! single type, so no two categories ever compete for the same path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Web,
    Shell,
    Markdown,
    Text,
    Config,
    Generated,
    Unknown,
}

/// Well-known file names, matched before extensions
const NAME_TABLE: &[(&str, FileType)] = &[
    ("cargo.toml", FileType::Config),
    ("package.json", FileType::Config),
    ("pyproject.toml", FileType::Config),
    ("setup.cfg", FileType::Config),
    ("tsconfig.json", FileType::Config),
    ("dockerfile", FileType::Config),
    ("makefile", FileType::Config),
    (".env", FileType::Config),
    (".gitignore", FileType::Config),
    ("requirements.txt", FileType::Config),
    ("cargo.lock", FileType::Generated),
    ("package-lock.json", FileType::Generated),
    ("yarn.lock", FileType::Generated),
    ("poetry.lock", FileType::Generated),
];

const EXTENSION_TABLE: &[(&str, FileType)] = &[
    ("py", FileType::Python),
    ("pyi", FileType::Python),
    ("rs", FileType::Rust),
    ("js", FileType::JavaScript),
    ("jsx", FileType::JavaScript),
    ("mjs", FileType::JavaScript),
    ("cjs", FileType::JavaScript),
    ("ts", FileType::TypeScript),
    ("tsx", FileType::TypeScript),
    ("html", FileType::Web),
    ("htm", FileType::Web),
    ("css", FileType::Web),
    ("scss", FileType::Web),
    ("sh", FileType::Shell),
    ("bash", FileType::Shell),
    ("zsh", FileType::Shell),
    ("md", FileType::Markdown),
    ("markdown", FileType::Markdown),
    ("txt", FileType::Text),
    ("rst", FileType::Text),
    ("json", FileType::Config),
    ("yaml", FileType::Config),
    ("yml", FileType::Config),
    ("toml", FileType::Config),
    ("ini", FileType::Config),
    ("cfg", FileType::Config),
    ("conf", FileType::Config),
    ("env", FileType::Config),
    ("lock", FileType::Generated),
    ("log", FileType::Generated),
    ("tmp", FileType::Generated),
    ("pyc", FileType::Generated),
    ("pyo", FileType::Generated),
    ("map", FileType::Generated),
    ("cache", FileType::Generated),
];

impl FileType {
    /// Classify a relative or absolute path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            let name = name.to_ascii_lowercase();
            if let Some((_, file_type)) = NAME_TABLE.iter().find(|(key, _)| *key == name) {
                return *file_type;
            }
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| {
                EXTENSION_TABLE
                    .iter()
                    .find(|(key, _)| *key == ext)
                    .map(|(_, file_type)| *file_type)
            })
            .unwrap_or(FileType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Python => "python",
            FileType::Rust => "rust",
            FileType::JavaScript => "javascript",
            FileType::TypeScript => "typescript",
            FileType::Web => "web",
            FileType::Shell => "shell",
            FileType::Markdown => "markdown",
            FileType::Text => "text",
            FileType::Config => "config",
            FileType::Generated => "generated",
            FileType::Unknown => "unknown",
        }
    }

    /// Recognized types carry at least MEDIUM impact when they change
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FileType::Unknown | FileType::Generated)
    }

    /// Source code in a programming language
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            FileType::Python
                | FileType::Rust
                | FileType::JavaScript
                | FileType::TypeScript
                | FileType::Shell
        )
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for FileType {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "python" => FileType::Python,
            "rust" => FileType::Rust,
            "javascript" => FileType::JavaScript,
            "typescript" => FileType::TypeScript,
            "web" => FileType::Web,
            "shell" => FileType::Shell,
            "markdown" => FileType::Markdown,
            "text" => FileType::Text,
            "config" => FileType::Config,
            "generated" => FileType::Generated,
            _ => FileType::Unknown,
        }
    }
}
