use crate::error::ProfileError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One stage a command passes through between the client and the motor.
///
/// Declaration order is stage precedence: when two records share a
/// millisecond, the earlier stage sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Probe,
    Send,
    Parse,
    Process,
    SetIntensity,
    SetPwm,
}

impl Action {
    /// The only stage order accepted as a complete sequence.
    pub const CANONICAL: [Action; 6] = [
        Action::Probe,
        Action::Send,
        Action::Parse,
        Action::Process,
        Action::SetIntensity,
        Action::SetPwm,
    ];

    pub fn all() -> &'static [Action] {
        &Self::CANONICAL
    }

    pub fn precedence(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Probe => "probe",
            Action::Send => "send",
            Action::Parse => "parse",
            Action::Process => "process",
            Action::SetIntensity => "set_intensity",
            Action::SetPwm => "set_pwm",
        }
    }

    /// Header label used by the output table (`Set_intensity`, `Probe`, ...).
    pub fn column(self) -> &'static str {
        match self {
            Action::Probe => "Probe",
            Action::Send => "Send",
            Action::Parse => "Parse",
            Action::Process => "Process",
            Action::SetIntensity => "Set_intensity",
            Action::SetPwm => "Set_pwm",
        }
    }

    /// Resolve the action of a raw log line from its first lowercase token.
    pub fn detect(line: &str) -> Result<Action, ProfileError> {
        let token = token_re()
            .find(line)
            .map(|m| m.as_str())
            .unwrap_or_default();
        token.parse()
    }
}

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"[a-z_]+").unwrap())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "probe" => Ok(Action::Probe),
            "send" => Ok(Action::Send),
            "parse" => Ok(Action::Parse),
            "process" => Ok(Action::Process),
            "set_intensity" => Ok(Action::SetIntensity),
            "set_pwm" => Ok(Action::SetPwm),
            _ => Err(ProfileError::UnknownAction(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How the server applied a new intensity to the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Direct,
    Delayed,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Direct => "direct",
            Mode::Delayed => "delayed",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Mode::Direct),
            "delayed" => Ok(Mode::Delayed),
            _ => Err(ProfileError::InvalidMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
