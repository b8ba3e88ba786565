use crate::constants::{G, TWO_PI};
use crate::Num;

pub mod elliptic;
pub mod hyperbolic;
pub mod parabolic;

/// https://en.wikipedia.org/wiki/Standard_gravitational_parameter
#[inline]
pub fn standard_gravitational_parameter(mass: Num) -> Num {
    G * mass
}

/// https://en.wikipedia.org/wiki/Orbital_period
pub fn period(a: Num, mu: Num) -> Num {
    TWO_PI * (a.powi(3) / mu).sqrt()
}

/// Mean motion of an ellipse, or its hyperbolic analogue when `a` is the
/// semi-major axis of a hyperbola.
///
/// https://en.wikipedia.org/wiki/Mean_motion
pub fn mean_motion(a: Num, mu: Num) -> Num {
    (mu / a.abs().powi(3)).sqrt()
}

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: Num) -> Num {
    let wrapped = angle.rem_euclid(TWO_PI);

    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}
