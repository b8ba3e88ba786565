use super::{lambert_2d, Branch};
use crate::config::SolverConfig;
use crate::error::LambertError;
use crate::{Num, Vec3};

/// Below this `|r̂1 × r̂2|` the transfer plane is undefined.
const MIN_PLANE_NORMAL: Num = 1e-12;

/// Which of the transfers connecting two positions to solve for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferKind {
    /// Sweep more than π about `r1 × r2`, i.e. move clockwise about it
    pub long_way: bool,
    pub revolutions: u32,
    pub branch: Branch,
}

impl TransferKind {
    pub fn short_way() -> Self {
        Self::default()
    }

    pub fn long_way() -> Self {
        Self {
            long_way: true,
            ..Self::default()
        }
    }

    pub fn with_revolutions(mut self, revolutions: u32, branch: Branch) -> Self {
        self.revolutions = revolutions;
        self.branch = branch;
        self
    }
}

/// Cartesian solution of [`solve`], in the units of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LambertSolution {
    /// Velocity at departure
    pub v1: Vec3,
    /// Velocity at arrival
    pub v2: Vec3,
    /// Semi-major axis, negative for hyperbolae
    pub a: Num,
    /// Semi-latus rectum
    pub p: Num,
    /// Battin's variable at the root
    pub x: Num,
    pub iterations: usize,
}

impl LambertSolution {
    pub fn converged(&self, config: &SolverConfig) -> bool {
        self.iterations < config.max_iterations
    }
}

/// Finds the velocities taking a body from `r1` to `r2` in `tof` around an
/// attractor with gravitational parameter `mu`.
///
/// The problem is scaled to `|r1| = 1`, `mu = 1`, handed to [`lambert_2d`]
/// and the radial and tangential components are rotated back into the frame
/// of `r1` and `r2`.
pub fn solve(
    r1: Vec3,
    r2: Vec3,
    tof: Num,
    mu: Num,
    kind: TransferKind,
    config: &SolverConfig,
) -> Result<LambertSolution, LambertError> {
    if tof.is_nan() || tof <= 0.0 || tof.is_infinite() {
        return Err(LambertError::InvalidTimeOfFlight { tof });
    }

    if mu.is_nan() || mu <= 0.0 || mu.is_infinite() {
        return Err(LambertError::InvalidGravitationalParameter { mu });
    }

    let r1_mag = r1.length();
    let r2_mag = r2.length();

    if !r1_mag.is_normal() || !r2_mag.is_normal() {
        return Err(LambertError::DegenerateGeometry(
            "position vectors must be non-zero and finite",
        ));
    }

    let ir1 = r1 / r1_mag;
    let ir2 = r2 / r2_mag;
    let normal = ir1.cross(ir2);

    if normal.length() < MIN_PLANE_NORMAL {
        return Err(LambertError::DegenerateGeometry(
            "position vectors are collinear, the transfer plane is undefined",
        ));
    }

    // Units
    let length = r1_mag;
    let speed = (mu / length).sqrt();
    let time = length / speed;

    let c = (r2 - r1).length() / length;
    let s = (1.0 + r2_mag / length + c) / 2.0;

    let solution = lambert_2d(
        s,
        c,
        tof / time,
        kind.long_way,
        kind.revolutions,
        kind.branch,
        config,
    )?;

    let ih = if kind.long_way {
        -normal.normalize()
    } else {
        normal.normalize()
    };
    let it1 = ih.cross(ir1);
    let it2 = ih.cross(ir2);

    let v1 = speed * (solution.vr1 * ir1 + solution.vt1 * it1);
    let v2 = speed * (solution.vr2 * ir2 + solution.vt2 * it2);

    log::debug!("lambert: v1 = {v1}, v2 = {v2}, a = {}", solution.a * length);

    Ok(LambertSolution {
        v1,
        v2,
        a: solution.a * length,
        p: solution.p * length,
        x: solution.x,
        iterations: solution.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vec3, PI};
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_circle() {
        let solution = solve(
            Vec3::X,
            Vec3::Y,
            PI / 2.0,
            1.0,
            TransferKind::short_way(),
            &SolverConfig::default(),
        )
        .unwrap();

        assert_abs_diff_eq!(solution.v1.distance(Vec3::Y), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.v2.distance(-Vec3::X), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(solution.a, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn long_way_reverses_the_sense_of_motion() {
        let solution = solve(
            Vec3::X,
            Vec3::Y,
            2.0,
            1.0,
            TransferKind::long_way(),
            &SolverConfig::default(),
        )
        .unwrap();

        assert!(Vec3::X.cross(solution.v1).z < 0.0);
    }

    #[test]
    fn scales_with_units() {
        let mu = 398_600.4418;
        let r1 = vec3(7000.0, 100.0, -300.0);
        let r2 = vec3(-2000.0, 8000.0, 1500.0);

        let solution = solve(
            r1,
            r2,
            3000.0,
            mu,
            TransferKind::short_way(),
            &SolverConfig::default(),
        )
        .unwrap();

        assert_abs_diff_eq!(solution.v1.x, 3.016_654_648_836, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.v1.y, 6.764_294_653_157, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.v1.z, 1.054_698_357_860, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.v2.x, -5.014_170_700_951, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.v2.y, -3.467_515_749_806, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.v2.z, -0.383_314_424_122, epsilon = 1e-6);
    }

    #[test]
    fn collinear_positions_are_degenerate() {
        let result = solve(
            Vec3::X,
            -2.0 * Vec3::X,
            3.0,
            1.0,
            TransferKind::short_way(),
            &SolverConfig::default(),
        );

        assert!(matches!(result, Err(LambertError::DegenerateGeometry(_))));
    }

    #[test]
    fn rejects_invalid_inputs() {
        let config = SolverConfig::default();
        let kind = TransferKind::short_way();

        assert!(matches!(
            solve(Vec3::X, Vec3::Y, 0.0, 1.0, kind, &config),
            Err(LambertError::InvalidTimeOfFlight { .. })
        ));
        assert!(matches!(
            solve(Vec3::X, Vec3::Y, 1.0, -1.0, kind, &config),
            Err(LambertError::InvalidGravitationalParameter { .. })
        ));
        assert!(matches!(
            solve(Vec3::ZERO, Vec3::Y, 1.0, 1.0, kind, &config),
            Err(LambertError::DegenerateGeometry(_))
        ));
    }
}
