//! Closed-form definite integrals of a move's quadratic profile.
//!
//! A move's position is `p(t) = base + t * (start_v + t * half_accel)`.
//! Both integrals below are exact antiderivative evaluations at the bounds;
//! the smoothing layer depends on that exactness, so no sampling
//! approximation is acceptable here.

/// Definite integral of `base + start_v*t + half_accel*t^2` over
/// `[start, end]`.
///
/// Antiderivative: `base*t + start_v*t^2/2 + half_accel*t^3/3`.
#[inline]
pub fn integral(base: f64, start_v: f64, half_accel: f64, start: f64, end: f64) -> f64 {
    let half_v = 0.5 * start_v;
    let sixth_a = (1.0 / 3.0) * half_accel;
    let si = start * (base + start * (half_v + start * sixth_a));
    let ei = end * (base + end * (half_v + end * sixth_a));
    ei - si
}

/// Definite integral of `t * (base + start_v*t + half_accel*t^2)` over
/// `[start, end]`.
///
/// Antiderivative: `base*t^2/2 + start_v*t^3/3 + half_accel*t^4/4`.
#[inline]
pub fn time_weighted_integral(base: f64, start_v: f64, half_accel: f64, start: f64, end: f64) -> f64 {
    let half_b = 0.5 * base;
    let third_v = (1.0 / 3.0) * start_v;
    let quarter_a = 0.25 * half_accel;
    let si = start * start * (half_b + start * (third_v + start * quarter_a));
    let ei = end * end * (half_b + end * (third_v + end * quarter_a));
    ei - si
}
