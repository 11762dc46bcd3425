//! Move-queue builders for tests and benches.

use extruder_traits::{Move, MoveQueue};

/// Queue of back-to-back constant-velocity extruding moves, each given as
/// `(start_v, move_t)`. Positions and print times are kept continuous.
pub fn constant_velocity_queue(segments: &[(f64, f64)]) -> MoveQueue {
    let mut q = MoveQueue::new();
    let mut print_time = 0.0;
    let mut start_pos = 0.0;
    for &(start_v, move_t) in segments {
        q.push(Move {
            print_time,
            move_t,
            start_pos,
            start_v,
            half_accel: 0.0,
            extrudes: true,
        });
        print_time += move_t;
        start_pos += start_v * move_t;
    }
    q
}

/// Accelerate from rest to `cruise_v`, cruise, decelerate back to rest:
/// the standard trapezoidal profile as three queued moves.
pub fn trapezoid_queue(cruise_v: f64, accel: f64, cruise_t: f64) -> MoveQueue {
    let accel_t = cruise_v / accel;
    let half_accel = 0.5 * accel;
    let accel_dist = half_accel * accel_t * accel_t;

    let mut q = MoveQueue::new();
    q.push(Move {
        print_time: 0.0,
        move_t: accel_t,
        start_pos: 0.0,
        start_v: 0.0,
        half_accel,
        extrudes: true,
    });
    q.push(Move {
        print_time: accel_t,
        move_t: cruise_t,
        start_pos: accel_dist,
        start_v: cruise_v,
        half_accel: 0.0,
        extrudes: true,
    });
    q.push(Move {
        print_time: accel_t + cruise_t,
        move_t: accel_t,
        start_pos: accel_dist + cruise_v * cruise_t,
        start_v: cruise_v,
        half_accel: -half_accel,
        extrudes: true,
    });
    q
}
