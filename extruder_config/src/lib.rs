#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and validation for the extruder kinematics.
//!
//! The `[pressure_advance]` table is deserialized from TOML and validated
//! before the runtime layer converts it into solver parameters. Validation
//! happens here, at the host boundary, so the solver itself never has to
//! reject values mid-print.

use serde::Deserialize;

/// Pressure advance response curve selector.
///
/// `linear` multiplies the smoothed velocity by `pressure_advance`; the
/// other methods saturate at `offset` for large velocities.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MethodName {
    #[default]
    Linear,
    Tanh,
    Exp,
    Recip,
    Sigmoid,
}

/// `[pressure_advance]` table.
///
/// Example:
/// ```toml
/// [pressure_advance]
/// method = "tanh"
/// pressure_advance = 0.045
/// smooth_time = 0.040
/// offset = 0.12
/// linv = 40.0
/// ```
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PressureAdvanceCfg {
    pub method: MethodName,
    /// Linear coefficient in mm per (mm/s). Only used by `method = "linear"`.
    pub pressure_advance: f64,
    /// Full smoothing window in seconds; 0 disables compensation.
    pub smooth_time: f64,
    /// Saturation magnitude in mm for the nonlinear methods.
    pub offset: f64,
    /// Inverse velocity normalization in mm/s; 0 is treated as 1.0 downstream.
    pub linv: f64,
}

impl Default for PressureAdvanceCfg {
    fn default() -> Self {
        Self {
            method: MethodName::Linear,
            pressure_advance: 0.0,
            smooth_time: 0.040,
            offset: 0.0,
            linv: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pressure_advance: PressureAdvanceCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        let pa = &self.pressure_advance;
        if !pa.pressure_advance.is_finite() {
            eyre::bail!("pressure_advance.pressure_advance must be finite");
        }
        if pa.pressure_advance < 0.0 {
            eyre::bail!("pressure_advance.pressure_advance must be >= 0");
        }
        if !pa.smooth_time.is_finite() || pa.smooth_time < 0.0 {
            eyre::bail!("pressure_advance.smooth_time must be >= 0");
        }
        if pa.smooth_time > 0.200 {
            eyre::bail!("pressure_advance.smooth_time is unreasonably large (>200ms)");
        }
        if !pa.offset.is_finite() {
            eyre::bail!("pressure_advance.offset must be finite");
        }
        if pa.offset < 0.0 {
            eyre::bail!("pressure_advance.offset must be >= 0");
        }
        if !pa.linv.is_finite() {
            eyre::bail!("pressure_advance.linv must be finite");
        }
        if pa.linv < 0.0 {
            eyre::bail!("pressure_advance.linv must be >= 0");
        }
        Ok(())
    }
}
