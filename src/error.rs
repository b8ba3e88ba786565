use thiserror::Error;

use crate::orbit::OrbitType;
use crate::Num;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LambertError {
    #[error("non-positive time of flight: {tof}")]
    InvalidTimeOfFlight { tof: Num },

    #[error("chord exceeds semi-perimeter bound (s = {s}, c = {c})")]
    InvalidGeometry { s: Num, c: Num },

    #[error("invalid branch selector {0:?}, expected 'l' or 'r'")]
    InvalidBranchSelector(String),

    #[error("gravitational parameter must be positive and finite, got {mu}")]
    InvalidGravitationalParameter { mu: Num },

    #[error("degenerate transfer geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("time of flight equation did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("orbit has not been initialized with a state")]
    Uninitialized,

    #[error("gravitational parameter must be positive and finite, got {mu}")]
    InvalidGravitationalParameter { mu: Num },

    #[error("degenerate orbital state: {0}")]
    DegenerateState(&'static str),

    #[error("kepler's equation did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("operation is not defined for a {0:?} orbit")]
    UnsupportedOrbitType(OrbitType),
}

/// Raised by [`crate::math::newton_approx`] when the iteration cap is hit.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("failed to converge after {iterations} iterations (x0 = {x0}, x = {x})")]
pub struct ConvergenceError {
    pub iterations: usize,
    pub x0: Num,
    pub x: Num,
}

impl From<ConvergenceError> for OrbitError {
    fn from(err: ConvergenceError) -> Self {
        OrbitError::NonConvergence {
            iterations: err.iterations,
        }
    }
}
