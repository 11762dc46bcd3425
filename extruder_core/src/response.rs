//! Saturating nonlinear pressure advance response curves.

use crate::timeline::{PaMethod, PaParams};

/// Sigmoid input clamp; beyond this the curve is saturated to within f64
/// rounding and `exp` would only lose precision.
const SIGMOID_CLAMP: f64 = 20.0;

/// Map a smoothed velocity to a bounded displacement correction.
///
/// All curves are odd in the normalized velocity `rel_v = velocity / linv`
/// and saturate to `±offset`. Degenerate inputs (zero or non-finite
/// `offset`, non-finite `velocity`, `linv` or `rel_v`) return 0 so that a
/// bad sample disables compensation locally instead of feeding NaN/Inf to
/// the step scheduler.
///
/// `PaMethod::Linear` is not a saturating curve and is handled by the
/// caller as a direct multiplication; it evaluates to 0 here.
pub fn nonlinear_response(velocity: f64, pa: &PaParams) -> f64 {
    if !velocity.is_finite()
        || !pa.offset.is_finite()
        || pa.offset == 0.0
        || !pa.linv.is_finite()
        || pa.linv == 0.0
    {
        return 0.0;
    }

    let rel_v = velocity / pa.linv;
    if !rel_v.is_finite() {
        return 0.0;
    }

    match pa.method {
        PaMethod::Linear => 0.0,
        PaMethod::Tanh => pa.offset * rel_v.tanh(),
        PaMethod::Exp => {
            let sign = if rel_v >= 0.0 { 1.0 } else { -1.0 };
            pa.offset * sign * (1.0 - (-rel_v.abs()).exp())
        }
        PaMethod::Recip => pa.offset * rel_v / (1.0 + rel_v.abs()),
        PaMethod::Sigmoid => {
            let rel_v = rel_v.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
            pa.offset * (2.0 / (1.0 + (-rel_v).exp()) - 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(method: PaMethod, offset: f64, linv: f64) -> PaParams {
        PaParams {
            method,
            pressure_advance: 0.0,
            offset,
            linv,
            active_print_time: 0.0,
        }
    }

    #[test]
    fn zero_velocity_maps_to_zero() {
        for method in [
            PaMethod::Tanh,
            PaMethod::Exp,
            PaMethod::Recip,
            PaMethod::Sigmoid,
        ] {
            let pa = params(method, 0.5, 2.0);
            assert_eq!(nonlinear_response(0.0, &pa), 0.0, "{method:?}");
        }
    }

    #[test]
    fn small_velocity_is_near_linear_in_rel_v() {
        // All curves have slope offset/linv at the origin.
        let pa = params(PaMethod::Tanh, 0.5, 2.0);
        let v = 1e-6;
        let expect = 0.5 * v / 2.0;
        assert!((nonlinear_response(v, &pa) - expect).abs() < 1e-12);
    }

    #[test]
    fn zero_offset_disables_correction() {
        let pa = params(PaMethod::Tanh, 0.0, 2.0);
        assert_eq!(nonlinear_response(100.0, &pa), 0.0);
    }

    #[test]
    fn non_finite_inputs_are_absorbed() {
        let pa = params(PaMethod::Recip, 0.5, 2.0);
        assert_eq!(nonlinear_response(f64::NAN, &pa), 0.0);
        assert_eq!(nonlinear_response(f64::INFINITY, &pa), 0.0);
        let bad = params(PaMethod::Recip, f64::NAN, 2.0);
        assert_eq!(nonlinear_response(1.0, &bad), 0.0);
        let bad = params(PaMethod::Recip, 0.5, f64::NAN);
        assert_eq!(nonlinear_response(1.0, &bad), 0.0);
    }

    #[test]
    fn recip_exact_value() {
        // rel_v = 3 -> 0.5 * 3 / 4
        let pa = params(PaMethod::Recip, 0.5, 1.0);
        assert!((nonlinear_response(3.0, &pa) - 0.375).abs() < 1e-15);
    }
}
