use profile_core::select::{pick_index, LogKind, LogSelector};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Asks on the terminal which of several matching logs to use.
///
/// The list and the question are written to stderr, leaving stdout to the
/// run output.
pub struct PromptSelector;

impl LogSelector for PromptSelector {
    fn select(&self, kind: LogKind, candidates: &[PathBuf]) -> profile_core::Result<PathBuf> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stderr();
        prompt(kind, candidates, &mut input, &mut out)
    }
}

pub fn prompt<R: BufRead, W: Write>(
    kind: LogKind,
    candidates: &[PathBuf],
    input: &mut R,
    out: &mut W,
) -> profile_core::Result<PathBuf> {
    writeln!(out, "\n{} logs:", capitalize(kind.as_str()))?;
    for (index, path) in candidates.iter().enumerate() {
        writeln!(out, "{index}\t{}", basename(path))?;
    }
    write!(out, "\nSelect {kind} log: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    pick_index(&line, candidates)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
