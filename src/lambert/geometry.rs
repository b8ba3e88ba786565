use crate::error::LambertError;
use crate::{Num, TWO_PI};

/// Below this `tan(theta / 2)` is treated as zero, i.e. a transfer angle of 0 or 2π.
const SINGULAR_HALF_ANGLE_TAN: Num = 1e-12;

/// How far `cos(theta)` may drift outside `[-1, 1]` from rounding before the
/// triangle is rejected.
const COS_THETA_SLACK: Num = 1e-12;

/// Triangle formed by `r1 = 1`, `r2` and the chord joining them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Semi-perimeter
    pub s: Num,
    /// Chord
    pub c: Num,
    /// Transfer angle above π
    pub long_way: bool,
    /// Semi-major axis of the minimum energy ellipse
    pub am: Num,
    /// Second radius in units of the first
    pub r2: Num,
    /// Transfer angle
    pub theta: Num,
    pub lambda: Num,
}

impl Geometry {
    pub fn new(s: Num, c: Num, long_way: bool) -> Result<Self, LambertError> {
        if !s.is_finite() || !c.is_finite() || c > s {
            return Err(LambertError::InvalidGeometry { s, c });
        }

        let am = s / 2.0;
        let r2 = 2.0 * s - c - 1.0;

        if r2 <= 0.0 {
            return Err(LambertError::DegenerateGeometry(
                "second radius is not positive",
            ));
        }

        let cos_theta = (1.0 - c * c) / r2 / 2.0 + r2 / 2.0;

        if cos_theta.abs() > 1.0 + COS_THETA_SLACK {
            return Err(LambertError::DegenerateGeometry(
                "chord is shorter than the difference of the radii",
            ));
        }

        let short_way_angle = cos_theta.clamp(-1.0, 1.0).acos();
        let theta = if long_way {
            TWO_PI - short_way_angle
        } else {
            short_way_angle
        };

        if (theta / 2.0).tan().abs() < SINGULAR_HALF_ANGLE_TAN {
            return Err(LambertError::DegenerateGeometry(
                "transfer angle is a multiple of 2π",
            ));
        }

        let lambda = r2.sqrt() * (theta / 2.0).cos() / s;

        Ok(Self {
            s,
            c,
            long_way,
            am,
            r2,
            theta,
            lambda,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PI;
    use approx::assert_abs_diff_eq;

    #[test]
    fn equilateral_triangle() {
        let geometry = Geometry::new(1.5, 1.0, false).unwrap();

        assert_abs_diff_eq!(geometry.r2, 1.0);
        assert_abs_diff_eq!(geometry.theta, PI / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geometry.am, 0.75);
    }

    #[test]
    fn long_way_takes_the_complementary_angle() {
        let short = Geometry::new(1.5, 1.0, false).unwrap();
        let long = Geometry::new(1.5, 1.0, true).unwrap();

        assert_abs_diff_eq!(long.theta, TWO_PI - short.theta, epsilon = 1e-12);
        assert_abs_diff_eq!(long.lambda, -short.lambda, epsilon = 1e-12);
    }

    #[test]
    fn chord_longer_than_semi_perimeter() {
        assert_eq!(
            Geometry::new(1.0, 1.5, false),
            Err(LambertError::InvalidGeometry { s: 1.0, c: 1.5 })
        );
    }

    #[test]
    fn zero_transfer_angle_is_degenerate() {
        // r2 = 2 on the same ray as r1
        let result = Geometry::new(2.0, 1.0, false);

        assert!(matches!(result, Err(LambertError::DegenerateGeometry(_))));
    }

    #[test]
    fn vanishing_second_radius_is_degenerate() {
        let result = Geometry::new(1.0, 1.0, false);

        assert!(matches!(result, Err(LambertError::DegenerateGeometry(_))));
    }

    #[test]
    fn impossible_triangle_is_degenerate() {
        // r2 = 3 but the chord is only 1
        let result = Geometry::new(2.5, 1.0, false);

        assert!(matches!(result, Err(LambertError::DegenerateGeometry(_))));
    }
}
