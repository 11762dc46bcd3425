//! Runtime pressure advance parameters.
//!
//! `PaCfg` is the validated, in-memory form the solver consumes; the
//! TOML-facing structs live in `extruder_config`. Keeping the two apart
//! means the solver never depends on serde types.

use extruder_config::MethodName;
use eyre::WrapErr;

use crate::error::{PaError, Result};
use crate::timeline::PaMethod;

/// One complete set of pressure advance parameters to apply at a print time.
#[derive(Debug, Clone, Copy)]
pub struct PaCfg {
    pub method: PaMethod,
    /// Linear coefficient; used only by `PaMethod::Linear`.
    pub pressure_advance: f64,
    /// Full smoothing window in seconds; 0 disables compensation.
    pub smooth_time: f64,
    /// Saturation magnitude for the nonlinear methods.
    pub offset: f64,
    /// Inverse velocity normalization; 0 is normalized to 1.0 on append.
    pub linv: f64,
}

impl Default for PaCfg {
    fn default() -> Self {
        Self {
            method: PaMethod::Linear,
            pressure_advance: 0.0,
            smooth_time: 0.040,
            offset: 0.0,
            linv: 1.0,
        }
    }
}

impl PaCfg {
    /// Reject parameters that could corrupt the timeline or the cached
    /// window values. Finite-but-extreme values are left to the response
    /// guards; only structurally unusable inputs fail here.
    pub fn validate(&self) -> core::result::Result<(), PaError> {
        if !self.pressure_advance.is_finite() {
            return Err(PaError::InvalidConfig("pressure_advance must be finite"));
        }
        if !self.smooth_time.is_finite() || self.smooth_time < 0.0 {
            return Err(PaError::InvalidConfig("smooth_time must be >= 0"));
        }
        if !self.offset.is_finite() {
            return Err(PaError::InvalidConfig("offset must be finite"));
        }
        if !self.linv.is_finite() {
            return Err(PaError::InvalidConfig("linv must be finite"));
        }
        Ok(())
    }

    /// Build from a parsed host config, running both validation layers.
    pub fn from_config(cfg: &extruder_config::Config) -> Result<Self> {
        cfg.validate()
            .wrap_err("invalid [pressure_advance] table")?;
        let pa = &cfg.pressure_advance;
        let out = Self {
            method: pa.method.into(),
            pressure_advance: pa.pressure_advance,
            smooth_time: pa.smooth_time,
            offset: pa.offset,
            linv: pa.linv,
        };
        out.validate()?;
        Ok(out)
    }
}

impl From<MethodName> for PaMethod {
    fn from(name: MethodName) -> Self {
        match name {
            MethodName::Linear => PaMethod::Linear,
            MethodName::Tanh => PaMethod::Tanh,
            MethodName::Exp => PaMethod::Exp,
            MethodName::Recip => PaMethod::Recip,
            MethodName::Sigmoid => PaMethod::Sigmoid,
        }
    }
}
