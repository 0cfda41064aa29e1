//! Home directory resolution for `~` in configured paths.
//!
//! `WISE_TEST_HOME` overrides `dirs::home_dir()` so integration tests can point
//! key lookups at a temporary directory.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory.
pub const WISE_TEST_HOME_VAR: &str = "WISE_TEST_HOME";

/// Home directory used for `~` expansion.
pub fn wise_home_dir() -> Option<PathBuf> {
    std::env::var(WISE_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Expand a leading `~` or `~/`; other paths are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, wise_home_dir())
}

fn expand_home_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        Path::new(path).to_path_buf()
    }
}
