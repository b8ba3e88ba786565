//! Time of flight as a function of Battin's variable `x`, in units where
//! `r1 = 1` and `mu = 1`.

use crate::{Num, PI, TWO_PI};

/// Time of flight of the conic through both endpoints described by `x`.
///
/// `x < 1` is an ellipse (completing `revolutions` extra loops), `x > 1` a
/// hyperbola, for which `revolutions` is ignored. `x = ±1` has no finite
/// semi-major axis and yields a non-finite value.
pub fn x2tof(x: Num, s: Num, c: Num, long_way: bool, revolutions: u32) -> Num {
    let am = s / 2.0;
    let a = am / (1.0 - x * x);

    let (alfa, beta) = if x < 1.0 {
        let beta = 2.0 * ((s - c) / (2.0 * a)).sqrt().asin();
        (2.0 * x.acos(), if long_way { -beta } else { beta })
    } else {
        let beta = 2.0 * ((s - c) / (-2.0 * a)).sqrt().asinh();
        (2.0 * x.acosh(), if long_way { -beta } else { beta })
    };

    if a > 0.0 {
        a * a.sqrt()
            * ((alfa - alfa.sin()) - (beta - beta.sin()) + TWO_PI * revolutions as Num)
    } else {
        -a * (-a).sqrt() * ((alfa.sinh() - alfa) - (beta.sinh() - beta))
    }
}

/// Zero revolution residual in the `ix = ln(x + 1)`, `ln(tof)` plane.
pub fn tof_curve(ix: Num, s: Num, c: Num, tof: Num, long_way: bool) -> Num {
    x2tof(ix.exp() - 1.0, s, c, long_way, 0).ln() - tof.ln()
}

/// Multi revolution residual in the `ix = tan(x·π/2)` plane.
pub fn tof_curve_multi_rev(
    ix: Num,
    s: Num,
    c: Num,
    tof: Num,
    long_way: bool,
    revolutions: u32,
) -> Num {
    x2tof(ix.atan() * 2.0 / PI, s, c, long_way, revolutions) - tof
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn quarter_of_the_unit_circle() {
        // a = 1 means 1 - x² = am
        let s = (2.0 + 2f64.sqrt()) / 2.0;
        let c = 2f64.sqrt();
        let x = (1.0 - s / 2.0).sqrt();

        assert_abs_diff_eq!(x2tof(x, s, c, false, 0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x2tof(x, s, c, false, 1), PI / 2.0 + TWO_PI, epsilon = 1e-12);
    }

    #[test_case(false ; "short way")]
    #[test_case(true ; "long way")]
    fn decreasing_in_x_for_zero_revolutions(long_way: bool) {
        let samples: Vec<Num> = (-9..=30)
            .map(|i| x2tof(i as Num / 10.0, 1.5, 1.0, long_way, 0))
            .filter(|tof| tof.is_finite())
            .collect();

        assert!(samples.len() > 30);
        assert!(samples.windows(2).all(|w| w[1] < w[0]), "{samples:?}");
    }

    #[test]
    fn long_way_is_slower() {
        for i in -9..=9 {
            let x = i as Num / 10.0;

            assert!(x2tof(x, 1.5, 1.0, true, 0) > x2tof(x, 1.5, 1.0, false, 0));
        }
    }

    #[test]
    fn multi_revolution_curve_has_a_minimum() {
        let tof_at = |x: Num| x2tof(x, 1.5, 1.0, false, 1);

        assert!(tof_at(-0.5) > tof_at(0.15));
        assert!(tof_at(0.7) > tof_at(0.15));
    }

    #[test]
    fn curves_vanish_at_the_generating_x() {
        let (s, c) = (1.5, 1.0);

        let tof = x2tof(0.1, s, c, false, 0);
        assert_abs_diff_eq!(tof_curve((1.1 as Num).ln(), s, c, tof, false), 0.0, epsilon = 1e-12);

        let tof = x2tof(-0.4, s, c, true, 2);
        let ix = (-0.4 * PI / 2.0).tan();
        assert_abs_diff_eq!(tof_curve_multi_rev(ix, s, c, tof, true, 2), 0.0, epsilon = 1e-10);
    }
}
