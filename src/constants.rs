use crate::Num;

/// Gravitational constant
pub const G: Num = 6.67430e-11;

pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// Iteration cap of the Lambert time-of-flight solve.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Residual tolerance of the Lambert time-of-flight solve.
pub const DEFAULT_TOLERANCE: Num = 1e-9;

/// Tolerance used when solving Kepler's equation during propagation.
pub const KEPLER_TOLERANCE: Num = 1e-12;

/// Eccentricities closer than this to 0 (or 1) are treated as circular (or parabolic).
pub const ECCENTRICITY_EPSILON: Num = 1e-10;
