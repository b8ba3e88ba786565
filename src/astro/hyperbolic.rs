use crate::error::ConvergenceError;
use crate::math::newton_approx;
use crate::Num;

/// Hyperbolic Anomaly (F) is given by the equation:
/// M = e * sinh(F) - F
/// where
/// M is the hyperbolic mean anomaly
/// e is the eccentricity
///
/// https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/hyperbolic-trajectories.html#equation-eq-hyperbolic-keplers-equation
pub fn estimate_anomaly(M: Num, e: Num, tolerance: Num) -> Result<Num, ConvergenceError> {
    newton_approx(
        // f(F) = e * sinh(F) - F - M
        |F| (e * F.sinh()) - F - M,
        // f'(F) = e * cosh(F) - 1
        |F| e * F.cosh() - 1.0,
        // e * sinh(F) dominates far from periapsis, starting from M overflows there
        (M / e).asinh(),
        tolerance,
    )
}

pub fn true_anomaly(F: Num, e: Num) -> Num {
    // https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/hyperbolic-trajectories.html#equation-eq-eccentric-anomaly-true-anomaly-hyperbola
    2.0 * ((F / 2.0).tanh() / ((e - 1.0) / (e + 1.0)).sqrt()).atan()
}

pub fn hyperbolic_anomaly(v: Num, e: Num) -> Num {
    2.0 * (((e - 1.0) / (e + 1.0)).sqrt() * (v / 2.0).tan()).atanh()
}

/// Hyperbolic Kepler's equation
pub fn mean_anomaly(F: Num, e: Num) -> Num {
    e * F.sinh() - F
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(1.2)]
    #[test_case(3.0)]
    fn anomalies_round_trip(e: Num) {
        for M in [-50.0, -2.0, -0.1, 0.0, 0.4, 7.0, 300.0] {
            let F = estimate_anomaly(M, e, 1e-13).unwrap();
            let v = true_anomaly(F, e);

            assert_abs_diff_eq!(
                mean_anomaly(hyperbolic_anomaly(v, e), e),
                M,
                epsilon = 1e-8 * M.abs().max(1.0)
            );
        }
    }

    #[test]
    fn true_anomaly_approaches_the_asymptote() {
        let e: Num = 2.0;
        let F = estimate_anomaly(1e6, e, 1e-13).unwrap();

        assert_abs_diff_eq!(true_anomaly(F, e), (-1.0 / e).acos(), epsilon = 1e-5);
    }
}
