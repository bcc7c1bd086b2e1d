pub mod config;
pub mod map;
pub mod run;

use anyhow::Context;
use clap::Args;
use profile_core::config::ProfileConfig;
use std::path::{Path, PathBuf};

/// Flags that override `profile.yaml`.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Config file (default: <dir>/profile.yaml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum effective motor drive used by the mapping curve
    #[arg(long, value_name = "X")]
    pub min_intensity: Option<f64>,

    /// Degree of the motor mapping curve
    #[arg(long, value_name = "Y")]
    pub curve_degree: Option<f64>,

    /// Split same-intensity groups on gaps larger than N milliseconds
    #[arg(long, value_name = "N")]
    pub split_gap_ms: Option<u64>,
}

impl ConfigArgs {
    /// Load the config file and apply command-line overrides.
    pub fn resolve(&self, dir: &Path) -> anyhow::Result<ProfileConfig> {
        let mut config = match &self.config {
            Some(path) => ProfileConfig::load_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ProfileConfig::load(dir).context("failed to load config")?,
        };
        if let Some(min) = self.min_intensity {
            config.motor.min_intensity = min;
        }
        if let Some(degree) = self.curve_degree {
            config.motor.curve_degree = degree;
        }
        if let Some(gap) = self.split_gap_ms {
            config.coherence.enabled = true;
            config.coherence.max_gap_ms = gap;
        }
        Ok(config)
    }
}
