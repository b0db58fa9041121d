//! Runtime configuration for the socks activity.
//!
//! Every tunable has a compile-time default and can be overridden through a
//! dedicated environment variable. Command-line flags take precedence over
//! both; that merge happens in `main`.

use std::path::PathBuf;

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix of the daily log file name.
pub const LOG_FILE_PREFIX: &str = "socks";

/// Get the directory log files are written to.
///
/// Priority:
/// 1. `SOCKS_LOG_DIR` env variable if set
/// 2. `./logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SOCKS_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the path of a custom JSON catalog, if one is configured.
///
/// Returns `SOCKS_CATALOG_PATH` when set. When unset the built-in sock
/// catalog is used.
pub fn get_catalog_path() -> Option<PathBuf> {
    std::env::var("SOCKS_CATALOG_PATH").ok().map(PathBuf::from)
}

/// Get the difficulty level to start with.
///
/// Returns `SOCKS_LEVEL` when set. When unset the catalog's first level is used.
pub fn get_level() -> Option<String> {
    std::env::var("SOCKS_LEVEL").ok().filter(|l| !l.is_empty())
}
