pub mod motion;

pub use motion::{Move, MoveCursor, MoveQueue};

/// Per-axis stepper kinematics: the "position at time" capability the step
/// generation layer dispatches through. One implementation exists per axis
/// type (cartesian, extruder, ...), selected at construction time.
pub trait Kinematics {
    /// Stepper position at `move_time` seconds into the move under the cursor.
    ///
    /// Must be pure: repeated calls with the same arguments return the same
    /// value, and no allocation or mutation may occur (this is the step
    /// generation hot path).
    fn calc_position(&self, mv: MoveCursor<'_>, move_time: f64) -> f64;

    /// Lead time (seconds) before a move starts during which this axis can
    /// still influence step generation. The scheduler must not finalize
    /// steps closer than this to unprocessed moves.
    fn pre_active(&self) -> f64 {
        0.0
    }

    /// Trail time (seconds) after a move ends, symmetric to `pre_active`.
    fn post_active(&self) -> f64 {
        0.0
    }
}
