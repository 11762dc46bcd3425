//! Triangular-kernel velocity smoothing across queued moves.
//!
//! The pressure advance correction is driven by a windowed average of the
//! nominal velocity rather than its instantaneous value: the raw correction
//! would step discontinuously at accel/cruise/decel boundaries and the
//! stepper cannot follow position jumps. The weighting kernel is the "hat"
//! function `max(0, hst - |t - center|)`, normalized by `hst^2`.

use extruder_traits::{Move, MoveCursor};

use crate::integrate::{integral, time_weighted_integral};

/// Integral over `[start, end]`, clipped to the move's own time span, of
/// the move's velocity weighted by `(t - time_offset)`.
///
/// `time_offset` is the window edge in this move's local time; it may lie
/// outside `[0, move_t]`, which is why clipping only applies to the bounds.
fn velocity_integral(m: &Move, mut start: f64, mut end: f64, time_offset: f64) -> f64 {
    if start < 0.0 {
        start = 0.0;
    }
    if end > m.move_t {
        end = m.move_t;
    }
    // velocity(t) = start_v + 2 * half_accel * t
    let ivel = integral(m.start_v, 2.0 * m.half_accel, 0.0, start, end);
    let wgt_vel = time_weighted_integral(m.start_v, 2.0 * m.half_accel, 0.0, start, end);
    wgt_vel - time_offset * ivel
}

/// Raw triangular-kernel integral of nominal velocity around `move_time`
/// in the move under `mv`, half-window `hst`. The caller divides by
/// `hst^2` (the solver keeps that inverse cached).
///
/// The window may extend into neighbouring moves; the walk follows the
/// cursor in both directions. If the queue ends while part of the window
/// is unabsorbed, the missing span contributes zero velocity. That keeps
/// the result defined, but a window wider than the queued history means
/// the scheduler's lead/trail margins were not honored.
pub fn windowed_velocity_integral(mv: MoveCursor<'_>, move_time: f64, hst: f64) -> f64 {
    let m = mv.get();
    let start = move_time - hst;
    let end = move_time + hst;

    // Half-window before the center: weight rises from 0 at `start` to
    // `hst` at the center, so the weight factor is (t - start).
    let mut res = velocity_integral(m, start, move_time, start);
    // Half-window after the center: weight (end - t), hence the sign flip.
    res -= velocity_integral(m, move_time, end, end);

    // Carry the leading deficit into earlier moves, re-expressing the
    // window edge in each move's own local time.
    let mut cur = mv;
    let mut start = start;
    while start < 0.0 {
        let Some(prev) = cur.prev() else {
            break;
        };
        cur = prev;
        let pm = cur.get();
        start += pm.move_t;
        res += velocity_integral(pm, start, pm.move_t, start);
    }

    // Symmetrically absorb the trailing surplus in later moves.
    let mut cur = mv;
    let mut end = end;
    let mut span = m.move_t;
    while end > span {
        end -= span;
        let Some(next) = cur.next() else {
            break;
        };
        cur = next;
        let nm = cur.get();
        span = nm.move_t;
        res -= velocity_integral(nm, 0.0, end, end);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::constant_velocity_queue;

    fn smoothed(mv: MoveCursor<'_>, move_time: f64, hst: f64) -> f64 {
        windowed_velocity_integral(mv, move_time, hst) / (hst * hst)
    }

    #[test]
    fn constant_velocity_is_invariant_under_smoothing() {
        let q = constant_velocity_queue(&[(7.5, 4.0)]);
        let c = q.cursor(0).unwrap();
        for t in [0.5, 1.0, 2.0, 3.5] {
            assert!((smoothed(c, t, 0.25) - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn accelerating_move_interior_sample_matches_center_velocity() {
        // For a linear velocity ramp the symmetric kernel average equals
        // the velocity at the window center.
        let mut q = extruder_traits::MoveQueue::new();
        q.push(extruder_traits::Move {
            print_time: 0.0,
            move_t: 2.0,
            start_pos: 0.0,
            start_v: 1.0,
            half_accel: 0.5,
            extrudes: true,
        });
        let c = q.cursor(0).unwrap();
        let t = 1.0;
        let center_v = 1.0 + 2.0 * 0.5 * t;
        assert!((smoothed(c, t, 0.25) - center_v).abs() < 1e-12);
    }

    #[test]
    fn missing_history_contributes_zero() {
        // Window extends 0.3s before the queue start; that span counts as
        // zero velocity, weighted by the outer (thus lower-weight) part of
        // the kernel.
        let q = constant_velocity_queue(&[(4.0, 1.0)]);
        let c = q.cursor(0).unwrap();
        let hst = 0.5;
        let t = 0.2;
        // Analytic: missing [-0.3, 0) has weight ∫ (x+0.3) dx over [-0.3,0]
        // = 0.045 of the kernel mass hst^2 = 0.25.
        let expect = 4.0 * (0.25 - 0.045) / 0.25;
        assert!((smoothed(c, t, hst) - expect).abs() < 1e-12);
    }
}
