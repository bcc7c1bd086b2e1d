use crate::action::Action;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no {kind} logs found with pattern '{pattern}' in {}", dir.display())]
    NoMatchingFiles {
        kind: String,
        pattern: String,
        dir: PathBuf,
    },

    #[error("pattern for '{action}' not matching \"{line}\"")]
    MalformedLine { action: Action, line: String },

    #[error(
        "set_pwm value {pwm} cannot be produced by the motor curve \
         (min_intensity {min_intensity}, curve_degree {curve_degree})"
    )]
    UnmappablePwm {
        pwm: f64,
        min_intensity: f64,
        curve_degree: f64,
    },

    #[error("no pattern registered for action '{0}'")]
    UnknownAction(String),

    #[error("invalid mode '{0}': expected direct or delayed")]
    InvalidMode(String),

    #[error("invalid selection '{input}': expected an index between 0 and {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{}:{line}: {error}", path.display())]
    InFile {
        path: PathBuf,
        line: usize,
        error: Box<ProfileError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
