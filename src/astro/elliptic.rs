use crate::error::ConvergenceError;
use crate::math::newton_approx;
use crate::{Num, PI, TWO_PI};

/// Eccentric Anomaly (E) is given by the equation:
/// M = E - e * sin(E)
/// where
/// M is the mean anomaly
/// e is the eccentricity
///
/// https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/elliptical-orbits.html#equation-eq-keplers-equation-ellipse
pub fn estimate_anomaly(
    // Mean anomaly
    M: Num,
    // Eccentricity
    e: Num,
    tolerance: Num,
) -> Result<Num, ConvergenceError> {
    let M = M.rem_euclid(TWO_PI);

    // Starting from M stalls for highly eccentric orbits
    let E0 = if e > 0.8 { PI } else { M };

    newton_approx(
        // f(E) = E - e*sin(E) - M
        |E| E - (e * E.sin()) - M,
        // f'(E) = 1 - e*cos(E)
        |E| 1.0 - (e * E.cos()),
        E0,
        tolerance,
    )
}

pub fn true_anomaly(E: Num, e: Num) -> Num {
    // Circular (practically unattainable), elliptic or parabolic (practically unattainable)
    // https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/elliptical-orbits.html#equation-eq-eccentric-anomaly-true-anomaly-ellipse
    2.0 * ((E / 2.0).tan() / ((1.0 - e) / (1.0 + e)).sqrt()).atan()
}

pub fn eccentric_anomaly(v: Num, e: Num) -> Num {
    ((1.0 - e.powi(2)).sqrt() * v.sin()).atan2(e + v.cos())
}

/// Kepler's equation
pub fn mean_anomaly(E: Num, e: Num) -> Num {
    E - e * E.sin()
}
