//! Filesystem adapters for StudyMate.
//!
//! Resolves the data directory and provides the file-backed
//! [`ImportSource`](studymate_core::import::ImportSource).

pub mod file_source;

use std::path::PathBuf;

pub use file_source::FileSource;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STUDYMATE_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `STUDYMATE_DATA_DIR` environment variable
/// 2. `~/.studymate`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".studymate");
    }

    // Last resort: current directory
    PathBuf::from(".studymate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is the only one touching the variable and
        // restores it immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-studymate");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-studymate"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
