use crate::coherence::CoherenceSplitter;
use crate::config::{ProfileConfig, WarnLevel};
use crate::error::{ProfileError, Result};
use crate::grouper::group_records;
use crate::merger::{merge_run, IntegrityWarning};
use crate::parser::LineParser;
use crate::record::{MergedRecord, RawRecord};
use crate::sequence::validate_runs;
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Records parsed from all logs.
    pub read: usize,
    /// Candidate sequences after grouping and splitting.
    pub sequences: usize,
    /// Sequences discarded for not matching the stage order.
    pub rejected: usize,
    pub integrity_warnings: Vec<IntegrityWarning>,
    pub records: Vec<MergedRecord>,
}

impl Report {
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    /// Mean probe-to-set_pwm latency over all merged records.
    pub fn mean_latency_ms(&self) -> Option<f64> {
        let latencies: Vec<u64> = self.records.iter().filter_map(|r| r.latency_ms()).collect();
        if latencies.is_empty() {
            return None;
        }
        Some(latencies.iter().sum::<u64>() as f64 / latencies.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    parser: LineParser,
    splitter: CoherenceSplitter,
}

impl Pipeline {
    /// Build a pipeline, refusing configs with validation errors.
    pub fn new(config: &ProfileConfig) -> Result<Self> {
        let errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if !errors.is_empty() {
            return Err(ProfileError::InvalidConfig(errors.join("; ")));
        }
        Ok(Self::from_parts(
            LineParser::new(config.motor),
            CoherenceSplitter::from(config.coherence),
        ))
    }

    pub fn from_parts(parser: LineParser, splitter: CoherenceSplitter) -> Self {
        Self { parser, splitter }
    }

    /// Read a whole log file and parse every line of it.
    pub fn read_log(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let text = crate::io::read_text(path)?;
        self.parser.parse_log(path, &text)
    }

    /// Group, split, validate and merge parsed records.
    pub fn reconcile(&self, records: Vec<RawRecord>) -> Report {
        let read = records.len();
        tracing::info!(records = read, "read commands");

        let runs: Vec<Vec<RawRecord>> = group_records(records)
            .into_iter()
            .flat_map(|group| self.splitter.split(group.records))
            .collect();
        let sequences = runs.len();
        tracing::info!(sequences, "grouped into sequences");

        let (accepted, rejected) = validate_runs(runs);
        tracing::info!(
            rejected,
            remaining = accepted.len(),
            "rejected malformed sequences"
        );

        let mut report = Report {
            read,
            sequences,
            rejected,
            ..Report::default()
        };
        for run in &accepted {
            let merged = merge_run(run);
            if let Some(warning) = merged.warning {
                report.integrity_warnings.push(warning);
            }
            report.records.push(merged.record);
        }
        report
    }

    /// Parse and reconcile logs given as (source, text) pairs.
    pub fn run_texts<'a, I>(&self, logs: I) -> Result<Report>
    where
        I: IntoIterator<Item = (&'a Path, &'a str)>,
    {
        let mut records = Vec::new();
        for (path, text) in logs {
            records.extend(self.parser.parse_log(path, text)?);
        }
        Ok(self.reconcile(records))
    }

    /// Read, parse and reconcile the given log files.
    pub fn run_files(&self, paths: &[&Path]) -> Result<Report> {
        let mut records = Vec::new();
        for path in paths {
            records.extend(self.read_log(path)?);
        }
        Ok(self.reconcile(records))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
