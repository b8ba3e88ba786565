//! Lambert's problem in its minimal two dimensional form.
//!
//! Lengths are in units of `r1` and `mu = 1`. The time of flight equation is
//! solved for Battin's variable `x` after rectifying the time of flight curve:
//! `[ln(x + 1), ln(tof)]` for direct transfers and `[tan(x·π/2), tof]` when
//! the transfer completes full revolutions.
//!
//! `theta = π` is harmless here (`tan(theta / 2)` only grows large) but it
//! leaves the transfer plane undefined for [`solve`], which reports it.

use std::fmt;
use std::str::FromStr;

use crate::config::SolverConfig;
use crate::error::LambertError;
use crate::math::regula_falsi;
use crate::{Num, PI};

mod geometry;
mod tof;
mod transfer;

pub use self::geometry::Geometry;
pub use self::tof::{tof_curve, tof_curve_multi_rev, x2tof};
pub use self::transfer::{solve, LambertSolution, TransferKind};

/// Below this `eta` the transfer is a straight line through the attractor.
const MIN_ETA: Num = 1e-12;

/// Selects one of the two solutions of a multi revolution transfer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Branch {
    /// Left of the time of flight minimum, the higher energy solution
    #[default]
    Left,
    Right,
}

impl Branch {
    /// Initial interval of `ix = tan(x·π/2)` around this branch's root.
    fn multi_rev_interval(self) -> (Num, Num) {
        let ix = |x: Num| (x * PI / 2.0).tan();

        match self {
            Branch::Left => (ix(-0.5234), ix(-0.2234)),
            Branch::Right => (ix(0.7234), ix(0.5234)),
        }
    }
}

impl TryFrom<char> for Branch {
    type Error = LambertError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'l' => Ok(Branch::Left),
            'r' => Ok(Branch::Right),
            other => Err(LambertError::InvalidBranchSelector(other.to_string())),
        }
    }
}

impl FromStr for Branch {
    type Err = LambertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l" | "left" => Ok(Branch::Left),
            "r" | "right" => Ok(Branch::Right),
            other => Err(LambertError::InvalidBranchSelector(other.to_string())),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Left => f.write_str("left"),
            Branch::Right => f.write_str("right"),
        }
    }
}

/// Solution of [`lambert_2d`], in units `r1 = 1`, `mu = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lambert2dSolution {
    /// Radial velocity at r1
    pub vr1: Num,
    /// Tangential velocity at r1
    pub vt1: Num,
    /// Radial velocity at r2
    pub vr2: Num,
    /// Tangential velocity at r2
    pub vt2: Num,
    /// Semi-major axis, negative for hyperbolae
    pub a: Num,
    /// Parameter `p = a(1 - e²)`
    pub p: Num,
    /// Battin's variable at the root
    pub x: Num,
    /// Transfer angle
    pub theta: Num,
    /// Iterations spent on the time of flight equation
    pub iterations: usize,
}

impl Lambert2dSolution {
    /// Whether the time of flight equation converged under `config`.
    pub fn converged(&self, config: &SolverConfig) -> bool {
        self.iterations < config.max_iterations
    }

    /// Turns a solution that hit the iteration cap into [`LambertError::NonConvergence`].
    pub fn check_converged(self, config: &SolverConfig) -> Result<Self, LambertError> {
        if self.converged(config) {
            Ok(self)
        } else {
            Err(LambertError::NonConvergence {
                iterations: self.iterations,
            })
        }
    }
}

/// Solves Lambert's problem for the triangle with semi-perimeter `s` and
/// chord `c` built on `r1 = 1`.
///
/// `long_way` selects the transfer with `theta > π`. `branch` only matters
/// when `revolutions > 0`.
///
/// Hitting `config.max_iterations` is not an error: the best estimate is
/// returned and the caller decides, see [`Lambert2dSolution::converged`].
/// Straight line transfers and transfer angles of 0 or 2π are reported as
/// [`LambertError::DegenerateGeometry`] instead of producing `inf` or `NaN`.
pub fn lambert_2d(
    s: Num,
    c: Num,
    tof: Num,
    long_way: bool,
    revolutions: u32,
    branch: Branch,
    config: &SolverConfig,
) -> Result<Lambert2dSolution, LambertError> {
    if tof.is_nan() || tof <= 0.0 || tof.is_infinite() {
        return Err(LambertError::InvalidTimeOfFlight { tof });
    }

    let Geometry {
        am,
        r2,
        theta,
        lambda,
        ..
    } = Geometry::new(s, c, long_way)?;

    log::debug!(
        "lambert: s = {s}, c = {c}, tof = {tof}, long_way = {long_way}, N = {revolutions}, branch = {branch}, theta = {theta}"
    );

    let (x, iterations) = if revolutions == 0 {
        let estimate = regula_falsi(
            |ix| tof_curve(ix, s, c, tof, long_way),
            (0.5 as Num).ln(),
            (1.5 as Num).ln(),
            config.max_iterations,
            config.tolerance,
        );

        (estimate.root.exp() - 1.0, estimate.iterations)
    } else {
        let (lo, hi) = branch.multi_rev_interval();
        let estimate = regula_falsi(
            |ix| tof_curve_multi_rev(ix, s, c, tof, long_way, revolutions),
            lo,
            hi,
            config.max_iterations,
            config.tolerance,
        );

        (estimate.root.atan() * 2.0 / PI, estimate.iterations)
    };

    if iterations >= config.max_iterations {
        log::warn!(
            "lambert: time of flight equation did not converge in {iterations} iterations (x = {x})"
        );
    } else {
        log::trace!("lambert: x = {x} after {iterations} iterations");
    }

    let a = am / (1.0 - x * x);

    let eta2 = if x < 1.0 {
        // ellipse
        let beta = 2.0 * ((s - c) / (2.0 * a)).sqrt().asin();
        let beta = if long_way { -beta } else { beta };
        let alfa = 2.0 * x.acos();
        let psi = (alfa - beta) / 2.0;

        2.0 * a * psi.sin().powi(2) / s
    } else {
        // hyperbola
        let beta = 2.0 * ((c - s) / (2.0 * a)).sqrt().asinh();
        let beta = if long_way { -beta } else { beta };
        let alfa = 2.0 * x.acosh();
        let psi = (alfa - beta) / 2.0;

        -2.0 * a * psi.sinh().powi(2) / s
    };
    let eta = eta2.sqrt();

    if eta.is_nan() || eta < MIN_ETA {
        return Err(LambertError::DegenerateGeometry("rectilinear transfer"));
    }

    let p = (r2 / (am * eta2)) * (theta / 2.0).sin().powi(2);
    let sigma1 = (1.0 / (eta * am.sqrt())) * (2.0 * lambda * am - (lambda + x * eta));

    let vr1 = sigma1;
    let vt1 = p.sqrt();
    let vt2 = vt1 / r2;
    let vr2 = -vr1 + (vt1 - vt2) / (theta / 2.0).tan();

    let solution = Lambert2dSolution {
        vr1,
        vt1,
        vr2,
        vt2,
        a,
        p,
        x,
        theta,
        iterations,
    };

    let outputs = [vr1, vt1, vr2, vt2, a, p];
    if outputs.iter().any(|v| !v.is_finite()) {
        log::warn!("lambert: non-finite solution {solution:?}");
        return Err(LambertError::DegenerateGeometry(
            "solution is not finite",
        ));
    }

    Ok(solution)
}
