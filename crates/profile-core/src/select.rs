use crate::error::{ProfileError, Result};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// LogKind
// ---------------------------------------------------------------------------

/// Which side of the pipeline wrote a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Client,
    Server,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Client => "client",
            LogKind::Server => "server",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Selection strategies
// ---------------------------------------------------------------------------

/// Chooses one log when a pattern matches several files.
pub trait LogSelector {
    fn select(&self, kind: LogKind, candidates: &[PathBuf]) -> Result<PathBuf>;
}

/// Picks the first candidate in name order.
pub struct FirstSelector;

impl LogSelector for FirstSelector {
    fn select(&self, _kind: LogKind, candidates: &[PathBuf]) -> Result<PathBuf> {
        candidates
            .first()
            .cloned()
            .ok_or_else(|| ProfileError::InvalidSelection {
                input: "first".to_string(),
                max: 0,
            })
    }
}

/// Picks the last candidate in name order, i.e. the most recent
/// timestamped profile.
pub struct LatestSelector;

impl LogSelector for LatestSelector {
    fn select(&self, _kind: LogKind, candidates: &[PathBuf]) -> Result<PathBuf> {
        candidates
            .last()
            .cloned()
            .ok_or_else(|| ProfileError::InvalidSelection {
                input: "latest".to_string(),
                max: 0,
            })
    }
}

/// Resolve a typed index against a candidate list.
pub fn pick_index(input: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
    let invalid = || ProfileError::InvalidSelection {
        input: input.trim().to_string(),
        max: candidates.len().saturating_sub(1),
    };
    let index: usize = input.trim().parse().map_err(|_| invalid())?;
    candidates.get(index).cloned().ok_or_else(invalid)
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Compile a shell-style file name pattern (`*`, `?`) into an anchored regex.
pub fn glob_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| ProfileError::InvalidConfig(format!("pattern '{pattern}': {e}")))
}

/// Files directly inside `dir` whose name matches `pattern`, sorted by name.
pub fn find_candidates(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let re = glob_regex(pattern)?;
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if re.is_match(&name.to_string_lossy()) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

/// Find the log of `kind` in `dir`, asking `selector` only when the pattern
/// is ambiguous.
pub fn select_log(
    dir: &Path,
    kind: LogKind,
    pattern: &str,
    selector: &dyn LogSelector,
) -> Result<PathBuf> {
    let candidates = find_candidates(dir, pattern)?;
    match candidates.len() {
        0 => Err(ProfileError::NoMatchingFiles {
            kind: kind.to_string(),
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates[0].clone()),
        n => {
            tracing::debug!(%kind, candidates = n, "pattern is ambiguous, asking selector");
            selector.select(kind, &candidates)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
