use crate::action::Action;
use crate::record::RawRecord;

/// True iff the run's stages are exactly probe, send, parse, process,
/// set_intensity, set_pwm in that order.
pub fn is_complete(run: &[RawRecord]) -> bool {
    run.len() == Action::CANONICAL.len()
        && run
            .iter()
            .zip(Action::CANONICAL.iter())
            .all(|(record, expected)| record.action == *expected)
}

pub fn actions(run: &[RawRecord]) -> Vec<Action> {
    run.iter().map(|r| r.action).collect()
}

/// Keep complete runs, discarding the rest. Returns the kept runs in input
/// order and the number discarded.
pub fn validate_runs(runs: Vec<Vec<RawRecord>>) -> (Vec<Vec<RawRecord>>, usize) {
    let mut accepted = Vec::with_capacity(runs.len());
    let mut rejected = 0;
    for run in runs {
        if is_complete(&run) {
            accepted.push(run);
        } else {
            tracing::debug!(actions = ?actions(&run), "rejected malformed sequence");
            rejected += 1;
        }
    }
    (accepted, rejected)
}
