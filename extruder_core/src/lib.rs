#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
// Bitwise float equality is semantic here (record dedupe, degenerate-value
// guards), and the integrators must keep their exact evaluation order.
#![allow(clippy::float_cmp, clippy::suboptimal_flops)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Pressure advance position solver for an extruder stepper.
//!
//! Computes the time-stamped target position the step generation layer turns
//! into pulses, compensating for the elastic delay between commanded
//! extrusion and actual filament motion.
//!
//! ## Architecture
//!
//! - **Integration**: closed-form integrals of a move's quadratic profile
//!   (`integrate` module)
//! - **Timeline**: ordered pressure advance parameter history, reconfigurable
//!   mid-print (`timeline` module)
//! - **Smoothing**: triangular-kernel velocity average across adjacent queued
//!   moves (`smoothing` module)
//! - **Response**: saturating nonlinear correction curves (`response` module)
//! - **Solver**: `ExtruderStepper`, the `Kinematics` implementation combining
//!   the above (`stepper` module)
//!
//! The hot path (`ExtruderStepper::calc_position`) is pure and allocation
//! free; all allocation happens when parameters are reconfigured.

pub mod config;
pub mod error;
pub mod integrate;
pub mod mocks;
pub mod response;
pub mod smoothing;
pub mod stepper;
pub mod timeline;

pub use config::PaCfg;
pub use error::{PaError, Result};
pub use stepper::ExtruderStepper;
pub use timeline::{PaMethod, PaParams, PaTimeline};
