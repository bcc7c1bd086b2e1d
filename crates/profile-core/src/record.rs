use crate::action::{Action, Mode};
use serde::{Deserialize, Serialize};

/// One parsed log line.
///
/// `intensity` is always in logical units and rounded, so records of the
/// same command compare equal across stages. The optional fields are only
/// populated by the stage that logs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub action: Action,
    /// Epoch milliseconds as logged.
    pub time: u64,
    pub actor: u32,
    pub intensity: f64,
    /// Raw PWM value of a `set_pwm` record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Seconds; only meaningful when `mode` is `delayed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
}

impl RawRecord {
    pub fn new(action: Action, time: u64, actor: u32, intensity: f64) -> Self {
        Self {
            action,
            time,
            actor,
            intensity,
            mapped_intensity: None,
            target_intensity: None,
            mode: None,
            delay: None,
        }
    }

    /// Ordering key inside an (actor, intensity) group.
    pub fn sort_key(&self) -> (u64, usize) {
        (self.time, self.action.precedence())
    }
}

/// A sequence folded into one row: a timestamp per stage plus the fields
/// carried by individual stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub actor: u32,
    pub intensity: f64,
    pub probe: Option<u64>,
    pub send: Option<u64>,
    pub parse: Option<u64>,
    pub process: Option<u64>,
    pub set_intensity: Option<u64>,
    pub set_pwm: Option<u64>,
    pub target_intensity: Option<f64>,
    pub mode: Option<Mode>,
    pub delay: Option<f64>,
    pub mapped_intensity: Option<f64>,
}

impl MergedRecord {
    pub fn empty(actor: u32, intensity: f64) -> Self {
        Self {
            actor,
            intensity,
            probe: None,
            send: None,
            parse: None,
            process: None,
            set_intensity: None,
            set_pwm: None,
            target_intensity: None,
            mode: None,
            delay: None,
            mapped_intensity: None,
        }
    }

    pub fn stage_time(&self, action: Action) -> Option<u64> {
        match action {
            Action::Probe => self.probe,
            Action::Send => self.send,
            Action::Parse => self.parse,
            Action::Process => self.process,
            Action::SetIntensity => self.set_intensity,
            Action::SetPwm => self.set_pwm,
        }
    }

    pub fn set_stage_time(&mut self, action: Action, time: u64) {
        let slot = match action {
            Action::Probe => &mut self.probe,
            Action::Send => &mut self.send,
            Action::Parse => &mut self.parse,
            Action::Process => &mut self.process,
            Action::SetIntensity => &mut self.set_intensity,
            Action::SetPwm => &mut self.set_pwm,
        };
        *slot = Some(time);
    }

    /// Milliseconds from probe to set_pwm, when both stages are present.
    pub fn latency_ms(&self) -> Option<u64> {
        Some(self.set_pwm?.saturating_sub(self.probe?))
    }
}
