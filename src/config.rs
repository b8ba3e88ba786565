use crate::constants::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::Num;

/// Controls the root solve of the Lambert time-of-flight equation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Upper bound on root solver iterations. Reaching it means the solve did not converge.
    pub max_iterations: usize,
    /// The solve stops once the residual of the time-of-flight equation drops below this.
    pub tolerance: Num,
}

impl SolverConfig {
    pub fn new(max_iterations: usize, tolerance: Num) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Num) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
