use crate::core::error::{ChangetrailError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "changetrail";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| ChangetrailError::directory_not_found("config"))
}

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| ChangetrailError::directory_not_found("cache"))
}
