use crate::record::RawRecord;
use serde::{Deserialize, Serialize};

/// Largest gap between consecutive records of one run when splitting is on.
pub const DEFAULT_MAX_GAP_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherenceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_max_gap_ms")]
    pub max_gap_ms: u64,
}

fn default_max_gap_ms() -> u64 {
    DEFAULT_MAX_GAP_MS
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_gap_ms: default_max_gap_ms(),
        }
    }
}

/// Splits an (actor, intensity) group into temporally coherent runs.
///
/// Disabled by default: the whole group is handed on as one run. With a gap
/// threshold every jump larger than the threshold starts a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoherenceSplitter {
    #[default]
    Passthrough,
    MaxGap(u64),
}

impl From<CoherenceConfig> for CoherenceSplitter {
    fn from(config: CoherenceConfig) -> Self {
        if config.enabled {
            CoherenceSplitter::MaxGap(config.max_gap_ms)
        } else {
            CoherenceSplitter::Passthrough
        }
    }
}

impl CoherenceSplitter {
    pub fn split(&self, records: Vec<RawRecord>) -> Vec<Vec<RawRecord>> {
        match *self {
            CoherenceSplitter::Passthrough => vec![records],
            CoherenceSplitter::MaxGap(max_gap_ms) => split_by_gap(records, max_gap_ms),
        }
    }
}

fn split_by_gap(records: Vec<RawRecord>, max_gap_ms: u64) -> Vec<Vec<RawRecord>> {
    let mut runs: Vec<Vec<RawRecord>> = Vec::new();
    let mut last_time: Option<u64> = None;
    for record in records {
        let starts_run = match last_time {
            Some(last) => record.time.abs_diff(last) > max_gap_ms,
            None => true,
        };
        last_time = Some(record.time);
        if starts_run {
            runs.push(Vec::new());
        }
        if let Some(run) = runs.last_mut() {
            run.push(record);
        }
    }
    runs
}
