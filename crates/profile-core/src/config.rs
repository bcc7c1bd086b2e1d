use crate::coherence::CoherenceConfig;
use crate::error::Result;
use crate::intensity::MotorCurve;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "profile.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// LogsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_client_pattern")]
    pub client_pattern: String,
    #[serde(default = "default_server_pattern")]
    pub server_pattern: String,
}

fn default_client_pattern() -> String {
    "sensation_profile*".to_string()
}

fn default_server_pattern() -> String {
    "sensation_server_profile*".to_string()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            client_pattern: default_client_pattern(),
            server_pattern: default_server_pattern(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "profile_".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileConfig (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub motor: MotorCurve,
    #[serde(default)]
    pub coherence: CoherenceConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ProfileConfig {
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load `profile.yaml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: ProfileConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let error = |message: String| ConfigWarning {
            level: WarnLevel::Error,
            message,
        };

        let degree = self.motor.curve_degree;
        if !degree.is_finite() || degree <= 0.0 {
            warnings.push(error(format!(
                "motor.curve_degree must be a positive number, got {degree}"
            )));
        }

        let min = self.motor.min_intensity;
        if !(0.0..1.0).contains(&min) {
            warnings.push(error(format!(
                "motor.min_intensity must be in [0, 1), got {min}"
            )));
        }

        if self.logs.client_pattern.trim().is_empty() {
            warnings.push(error("logs.client_pattern is empty".to_string()));
        }
        if self.logs.server_pattern.trim().is_empty() {
            warnings.push(error("logs.server_pattern is empty".to_string()));
        }

        if self.coherence.enabled && self.coherence.max_gap_ms == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "coherence.max_gap_ms is 0: every change of timestamp starts a new run"
                    .to_string(),
            });
        }

        warnings
    }

    pub fn has_errors(&self) -> bool {
        self.validate().iter().any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = ProfileConfig::load(dir.path()).unwrap();
        assert_eq!(cfg, ProfileConfig::default());
        assert_eq!(cfg.motor.min_intensity, 0.3);
        assert_eq!(cfg.motor.curve_degree, 1.5);
        assert!(!cfg.coherence.enabled);
        assert_eq!(cfg.coherence.max_gap_ms, 250);
        assert_eq!(cfg.logs.client_pattern, "sensation_profile*");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            ProfileConfig::path(dir.path()),
            "motor:\n  curve_degree: 2.0\ncoherence:\n  enabled: true\n",
        )
        .unwrap();
        let cfg = ProfileConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.motor.curve_degree, 2.0);
        assert_eq!(cfg.motor.min_intensity, 0.3);
        assert!(cfg.coherence.enabled);
        assert_eq!(cfg.coherence.max_gap_ms, 250);
        assert_eq!(cfg.output.prefix, "profile_");
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = ProfileConfig::default();
        let back: ProfileConfig = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(ProfileConfig::path(dir.path()), "motor: [1, 2").unwrap();
        assert!(ProfileConfig::load(dir.path()).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ProfileConfig::default().validate().is_empty());
    }

    #[test]
    fn rejects_degenerate_curve() {
        let mut cfg = ProfileConfig::default();
        cfg.motor.curve_degree = 0.0;
        cfg.motor.min_intensity = 1.0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(cfg.has_errors());
    }

    #[test]
    fn zero_gap_is_only_a_warning() {
        let mut cfg = ProfileConfig::default();
        cfg.coherence.enabled = true;
        cfg.coherence.max_gap_ms = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(!cfg.has_errors());
    }
}
