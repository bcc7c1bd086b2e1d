use std::path::{Path, PathBuf};

/// Resolve the directory logs are read from and the table is written to.
///
/// Priority:
/// 1. `--dir` flag / `SENSATION_PROFILE_DIR` env var (passed in as `explicit`)
/// 2. The current directory
pub fn resolve_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
