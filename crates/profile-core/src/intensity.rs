use crate::error::{ProfileError, Result};
use serde::{Deserialize, Serialize};

/// PWM values at or below this are treated as "motor off" and never mapped.
pub const MAPPING_EPSILON: f64 = 0.0000001;

/// Number of decimal digits every intensity is rounded to before grouping.
pub const INTENSITY_DIGITS: i32 = 7;

/// Response curve of a vibration motor.
///
/// The server drives the motor with
/// `pwm = min_intensity + (1 - min_intensity) * logical ^ curve_degree`;
/// [`MotorCurve::inverse_map`] undoes that so `set_pwm` records can be
/// compared with the logical intensities logged by earlier stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorCurve {
    #[serde(default = "default_min_intensity")]
    pub min_intensity: f64,
    #[serde(default = "default_curve_degree")]
    pub curve_degree: f64,
}

fn default_min_intensity() -> f64 {
    0.3
}

fn default_curve_degree() -> f64 {
    1.5
}

impl Default for MotorCurve {
    fn default() -> Self {
        Self {
            min_intensity: default_min_intensity(),
            curve_degree: default_curve_degree(),
        }
    }
}

impl MotorCurve {
    pub fn new(min_intensity: f64, curve_degree: f64) -> Self {
        Self {
            min_intensity,
            curve_degree,
        }
    }

    pub fn map(&self, logical: f64) -> f64 {
        self.min_intensity + (1.0 - self.min_intensity) * logical.powf(self.curve_degree)
    }

    pub fn inverse_map(&self, pwm: f64) -> f64 {
        ((pwm - self.min_intensity) / (1.0 - self.min_intensity)).powf(1.0 / self.curve_degree)
    }

    /// Logical intensity for a logged PWM value: mapped unless it is below
    /// [`MAPPING_EPSILON`], then rounded.
    ///
    /// A PWM value the curve cannot produce (below `min_intensity`) is an
    /// error; it means the motor runs on different constants.
    pub fn logical_from_pwm(&self, pwm: f64) -> Result<f64> {
        if pwm <= MAPPING_EPSILON {
            return Ok(round_intensity(pwm));
        }
        let logical = self.inverse_map(pwm);
        if !logical.is_finite() {
            return Err(ProfileError::UnmappablePwm {
                pwm,
                min_intensity: self.min_intensity,
                curve_degree: self.curve_degree,
            });
        }
        Ok(round_intensity(logical))
    }
}

/// Round to [`INTENSITY_DIGITS`] decimals, half away from zero on the
/// decimal value as logged.
///
/// `value * scale` can land just below a half-way point (`0.10000005` scales
/// to `1000000.4999...`), so the scaled result is bumped when the half-way
/// point above it still does not exceed `value`. `-0.0` is normalized to
/// `0.0` so both land in the same intensity group.
pub fn round_intensity(value: f64) -> f64 {
    let scale = 10f64.powi(INTENSITY_DIGITS);
    let mut scaled = (value * scale).round();
    if value > 0.0 && (scaled + 0.5) / scale <= value {
        scaled += 1.0;
    } else if value < 0.0 && (scaled - 0.5) / scale >= value {
        scaled -= 1.0;
    }
    scaled / scale + 0.0
}
