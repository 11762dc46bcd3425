//! Typed errors for the config boundary.
//!
//! The solver hot path returns plain `f64` and never fails; degenerate
//! numerics are absorbed to a zero correction instead of being propagated.
//! Errors only exist where host-supplied parameters enter the system.

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum PaError {
    #[error("invalid pressure advance config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
