//! The extruder position solver.
//!
//! `ExtruderStepper` owns the pressure advance timeline and the cached
//! smoothing window, and implements `Kinematics` so the step generation
//! layer can query it like any other axis.

use extruder_traits::{Kinematics, MoveCursor};

use crate::config::PaCfg;
use crate::error::Result;
use crate::response::nonlinear_response;
use crate::smoothing::windowed_velocity_integral;
use crate::timeline::{PaMethod, PaTimeline};

/// Pressure advance state for one extruder stepper.
///
/// Created once per print session. `calc_position` takes `&self` and must
/// be externally serialized against `set_pressure_advance`; the timeline
/// is an unsynchronized owned structure.
#[derive(Debug)]
pub struct ExtruderStepper {
    timeline: PaTimeline,
    /// Half of the smoothing window; 0 disables compensation entirely.
    half_smooth_time: f64,
    /// Cached `1 / half_smooth_time^2`, the kernel normalization. Only
    /// valid while `half_smooth_time != 0`.
    inv_half_smooth_time2: f64,
    /// Horizon up to which the scheduler has finalized steps; records only
    /// needed before it can be pruned on the next reconfiguration.
    last_flush_time: f64,
}

impl Default for ExtruderStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtruderStepper {
    /// Solver with compensation disabled and a zero-effect seed record.
    pub fn new() -> Self {
        Self {
            timeline: PaTimeline::new(),
            half_smooth_time: 0.0,
            inv_half_smooth_time2: 0.0,
            last_flush_time: 0.0,
        }
    }

    /// Reconfigure pressure advance from `print_time` onward.
    ///
    /// Always updates the smoothing window. With a zero window the
    /// timeline is left untouched: disabling never contributes a record.
    /// Otherwise a record is appended unless the tail already carries the
    /// same parameters.
    pub fn set_pressure_advance(
        &mut self,
        print_time: f64,
        pressure_advance: f64,
        smooth_time: f64,
        method: PaMethod,
        offset: f64,
        linv: f64,
    ) {
        let hst = 0.5 * smooth_time;
        let old_hst = self.half_smooth_time;
        self.half_smooth_time = hst;

        // Records superseded before the flushed horizon can no longer be
        // looked up; the wider of the old and new windows bounds how far
        // back a pending query may still reach.
        if self.last_flush_time > 0.0 {
            let horizon = self.last_flush_time - old_hst.max(hst);
            self.timeline.prune(horizon);
            tracing::trace!(horizon, records = self.timeline.record_count(), "pruned pa timeline");
        }

        if hst == 0.0 {
            tracing::debug!(print_time, "pressure advance disabled");
            return;
        }
        self.inv_half_smooth_time2 = 1.0 / (hst * hst);

        if self.timeline.append(print_time, pressure_advance, method, offset, linv) {
            tracing::debug!(
                print_time,
                pressure_advance,
                ?method,
                offset,
                linv,
                smooth_time,
                "pressure advance updated"
            );
        } else {
            tracing::trace!(print_time, "pressure advance unchanged");
        }
    }

    /// Apply a validated host configuration at `print_time`.
    pub fn apply_config(&mut self, print_time: f64, cfg: &PaCfg) -> Result<()> {
        cfg.validate()?;
        self.set_pressure_advance(
            print_time,
            cfg.pressure_advance,
            cfg.smooth_time,
            cfg.method,
            cfg.offset,
            cfg.linv,
        );
        Ok(())
    }

    /// Record how far the scheduler has finalized steps. Gates timeline
    /// pruning on later reconfigurations.
    pub fn note_flush_time(&mut self, flush_time: f64) {
        self.last_flush_time = flush_time;
    }

    /// Half of the active smoothing window, in seconds.
    pub fn half_smooth_time(&self) -> f64 {
        self.half_smooth_time
    }

    /// Number of retained timeline records (diagnostics and tests).
    pub fn record_count(&self) -> usize {
        self.timeline.record_count()
    }
}

impl Kinematics for ExtruderStepper {
    fn calc_position(&self, mv: MoveCursor<'_>, move_time: f64) -> f64 {
        let m = mv.get();
        let base_pos = m.start_pos + m.distance_at(move_time);

        let hst = self.half_smooth_time;
        if hst == 0.0 {
            // Pressure advance not enabled
            return base_pos;
        }

        let pa = self.timeline.lookup(m.print_time + move_time);
        if pa.pressure_advance == 0.0 && pa.offset == 0.0 {
            return base_pos;
        }

        let mut velocity = 0.0;
        if m.extrudes {
            velocity = windowed_velocity_integral(mv, move_time, hst) * self.inv_half_smooth_time2;
        }

        let adjust = match pa.method {
            PaMethod::Linear => pa.pressure_advance * velocity,
            _ => nonlinear_response(velocity, pa),
        };
        base_pos + adjust
    }

    fn pre_active(&self) -> f64 {
        self.half_smooth_time
    }

    fn post_active(&self) -> f64 {
        self.half_smooth_time
    }
}
