use crate::record::{MergedRecord, RawRecord};
use serde::Serialize;
use std::fmt;

/// Raised when the records of one run disagree on a grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityWarning {
    pub actors: Vec<u32>,
    pub intensities: Vec<f64>,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sequence records disagree on grouping key: actors {:?}, intensities {:?}",
            self.actors, self.intensities
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub record: MergedRecord,
    pub warning: Option<IntegrityWarning>,
}

/// Fold a validated run into one record.
///
/// Every stage contributes its time under its own name. The remaining
/// fields are merged left to right, so a later stage overwrites an earlier
/// one; stages that do not log a field leave it untouched.
pub fn merge_run(run: &[RawRecord]) -> Merged {
    let (actor, intensity) = run
        .first()
        .map(|r| (r.actor, r.intensity))
        .unwrap_or_default();
    let mut record = MergedRecord::empty(actor, intensity);

    for r in run {
        record.set_stage_time(r.action, r.time);
        record.actor = r.actor;
        record.intensity = r.intensity;
        if r.target_intensity.is_some() {
            record.target_intensity = r.target_intensity;
        }
        if r.mode.is_some() {
            record.mode = r.mode;
        }
        if r.delay.is_some() {
            record.delay = r.delay;
        }
        if r.mapped_intensity.is_some() {
            record.mapped_intensity = r.mapped_intensity;
        }
    }

    let warning = divergence(run);
    if let Some(w) = &warning {
        tracing::warn!(actor = record.actor, "{w}");
    }
    Merged { record, warning }
}

fn divergence(run: &[RawRecord]) -> Option<IntegrityWarning> {
    let mut actors: Vec<u32> = Vec::new();
    let mut intensities: Vec<f64> = Vec::new();
    for r in run {
        if !actors.contains(&r.actor) {
            actors.push(r.actor);
        }
        if !intensities.contains(&r.intensity) {
            intensities.push(r.intensity);
        }
    }
    if actors.len() > 1 || intensities.len() > 1 {
        Some(IntegrityWarning {
            actors,
            intensities,
        })
    } else {
        None
    }
}
