use crate::action::{Action, Mode};
use crate::error::{ProfileError, Result};
use crate::intensity::{round_intensity, MotorCurve};
use crate::record::RawRecord;
use regex::{Captures, Regex};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Logged delays are divided by this before being stored as seconds.
pub const DELAY_DIVISOR: f64 = 10000.0;

// ---------------------------------------------------------------------------
// Line patterns
// ---------------------------------------------------------------------------

struct Patterns {
    // probe;1416835751492;3;0
    // set_pwm;1416835753981;11;0.5
    plain: Regex,
    // send;1416835751495;{ Message: ... ActorIndex = 3; Intensity = 0; Priority = 0; }; ...
    send: Regex,
    // parse;1416835753996;type: VIBRATION;vibration {;  actor_index: 3;  intensity: 0.901;  ...
    // process;1416835753981;target_region: BACK;actor_index: 11;intensity: 0.0079;priority: 0;
    sensation: Regex,
    // set_intensity;1416835753981;11;0.0079;0;0.3004;delayed;0.2
    set_intensity: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        plain: Regex::new(r"(?P<time>[0-9]{13});(?P<actor>[0-9]+);(?P<intensity>[0-9.]+)").unwrap(),
        send: Regex::new(
            r"(?P<time>[0-9]{13}).+ActorIndex = (?P<actor>[0-9]+); Intensity = (?P<intensity>[0-9.]+)",
        )
        .unwrap(),
        sensation: Regex::new(
            r"(?P<time>[0-9]{13}).+actor_index: (?P<actor>[0-9]+);\s*intensity: (?P<intensity>[0-9.]+)",
        )
        .unwrap(),
        set_intensity: Regex::new(
            r"(?P<time>[0-9]{13});(?P<actor>[0-9]+);(?P<intensity>[-0-9.e]+);(?P<priority>[0-9.]+);(?P<target_intensity>[0-9.]+);(?P<mode>[a-z]+)(;(?P<delay>[0-9.]+))?",
        )
        .unwrap(),
    })
}

fn pattern_for(action: Action) -> &'static Regex {
    let p = patterns();
    match action {
        Action::Probe | Action::SetPwm => &p.plain,
        Action::Send => &p.send,
        Action::Parse | Action::Process => &p.sensation,
        Action::SetIntensity => &p.set_intensity,
    }
}

// ---------------------------------------------------------------------------
// LineParser
// ---------------------------------------------------------------------------

/// Turns single log lines into [`RawRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    curve: MotorCurve,
}

impl LineParser {
    pub fn new(curve: MotorCurve) -> Self {
        Self { curve }
    }

    /// Parse a line whose action is inferred from its first lowercase token.
    pub fn parse(&self, line: &str) -> Result<RawRecord> {
        let action = Action::detect(line)?;
        self.parse_as(action, line)
    }

    /// Parse a line with the pattern registered for `action`.
    pub fn parse_as(&self, action: Action, line: &str) -> Result<RawRecord> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let malformed = || ProfileError::MalformedLine {
            action,
            line: line.to_string(),
        };
        let caps = pattern_for(action).captures(line).ok_or_else(malformed)?;

        let time: u64 = field(&caps, "time").ok_or_else(malformed)?;
        let actor: u32 = field(&caps, "actor").ok_or_else(malformed)?;
        let intensity: f64 = field(&caps, "intensity").ok_or_else(malformed)?;
        let mut record = RawRecord::new(action, time, actor, intensity);

        match action {
            Action::SetIntensity => {
                record.target_intensity =
                    Some(field(&caps, "target_intensity").ok_or_else(malformed)?);
                let mode: Mode = caps["mode"].parse().map_err(|_| malformed())?;
                record.mode = Some(mode);
                let delay = match caps.name("delay") {
                    Some(_) => field::<f64>(&caps, "delay").ok_or_else(malformed)?,
                    None => 0.0,
                };
                record.delay = Some(delay / DELAY_DIVISOR);
                record.intensity = round_intensity(record.intensity);
            }
            Action::SetPwm => {
                record.mapped_intensity = Some(intensity);
                record.intensity = self.curve.logical_from_pwm(intensity)?;
            }
            _ => record.intensity = round_intensity(record.intensity),
        }

        Ok(record)
    }

    /// Parse every non-blank line of a log, stopping at the first bad one.
    pub fn parse_log(&self, path: &Path, text: &str) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = self.parse(line).map_err(|e| ProfileError::InFile {
                path: path.to_path_buf(),
                line: index + 1,
                error: Box::new(e),
            })?;
            records.push(record);
        }
        tracing::debug!(path = %path.display(), records = records.len(), "parsed log");
        Ok(records)
    }
}

fn field<T: FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
