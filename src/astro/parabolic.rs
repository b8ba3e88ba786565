//! Barker's equation.
//!
//! For a parabola the "mean anomaly" is `M = D + D³/3` with `D = tan(v/2)`,
//! growing at `2·sqrt(mu / p³)`.
//!
//! https://en.wikipedia.org/wiki/Parabolic_trajectory#Barker's_equation

use crate::Num;

/// Solves `D + D³/3 = M` in closed form.
pub fn estimate_anomaly(M: Num) -> Num {
    let q = 1.5 * M.abs();
    // cbrt(q - sqrt(q² + 1)) == -1 / B, without the cancellation
    let B = (q + (q.powi(2) + 1.0).sqrt()).cbrt();

    (B - 1.0 / B).copysign(M)
}

pub fn true_anomaly(D: Num) -> Num {
    2.0 * D.atan()
}

pub fn parabolic_anomaly(v: Num) -> Num {
    (v / 2.0).tan()
}

pub fn mean_anomaly(D: Num) -> Num {
    D + D.powi(3) / 3.0
}

pub fn mean_motion(p: Num, mu: Num) -> Num {
    2.0 * (mu / p.powi(3)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn barker_round_trip() {
        for M in [-40.0, -1.0, 0.0, 0.25, 3.0, 1e3] {
            let D = estimate_anomaly(M);

            assert_abs_diff_eq!(mean_anomaly(D), M, epsilon = 1e-9 * M.abs().max(1.0));
        }
    }

    #[test]
    fn periapsis() {
        assert_abs_diff_eq!(true_anomaly(estimate_anomaly(0.0)), 0.0, epsilon = 1e-15);
    }
}
