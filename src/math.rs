use crate::error::ConvergenceError;
use crate::Num;

const MAX_STEPS: usize = 100_000;

/// Approximates the root of a function using the Newton-Raphson method.
///
/// # Arguments
/// f - The function to approximate the root of.
/// f_prime - The derivative of the function.
/// x0 - The initial guess.
/// epsilon - The maximum error allowed.
///
/// # Returns
/// The approximate root of the function
pub fn newton_approx(
    f: impl Fn(Num) -> Num,
    f_prime: impl Fn(Num) -> Num,
    x0: Num,
    epsilon: Num,
) -> Result<Num, ConvergenceError> {
    let mut x = x0;

    for _ in 0..MAX_STEPS {
        let x_next = x - f(x) / f_prime(x);

        let error = (x_next - x).abs();

        if error < epsilon {
            return Ok(x_next);
        }

        if !x_next.is_finite() {
            break;
        }

        x = x_next;
    }

    Err(ConvergenceError {
        iterations: MAX_STEPS,
        x0,
        x,
    })
}

/// Outcome of [`regula_falsi`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate {
    pub root: Num,
    /// Equal to the iteration cap when the search did not converge.
    pub iterations: usize,
}

impl RootEstimate {
    pub fn converged(&self, max_iterations: usize) -> bool {
        self.iterations < max_iterations
    }
}

/// Finds a root of `f` starting from the interval `[lo, hi]`.
///
/// Each step samples the false-position point, the zero of the line through
/// both endpoint values. While `f(lo)` and `f(hi)` have opposite signs the
/// sample replaces the endpoint with the same sign and the bracket is kept
/// (with the Illinois weight halving so neither endpoint gets stuck). If the
/// interval does not bracket a root the two most recent samples are used
/// instead (a secant step) until a sign change shows up.
///
/// Stops when `|f(x)| < tolerance`. Never fails: when `max_iterations` is
/// exhausted, or `f` stops producing finite values, the best sample seen so
/// far is returned with `iterations == max_iterations`.
pub fn regula_falsi(
    f: impl Fn(Num) -> Num,
    lo: Num,
    hi: Num,
    max_iterations: usize,
    tolerance: Num,
) -> RootEstimate {
    let (mut a, mut b) = (lo, hi);
    let (mut fa, mut fb) = (f(a), f(b));

    let not_converged = |root: Num| RootEstimate {
        root,
        iterations: max_iterations,
    };

    if !fa.is_finite() || !fb.is_finite() {
        let root = if fb.is_finite() { b } else { a };
        return not_converged(root);
    }

    let (mut best, mut f_best) = if fa.abs() <= fb.abs() { (a, fa) } else { (b, fb) };

    if f_best.abs() < tolerance {
        return RootEstimate {
            root: best,
            iterations: 0,
        };
    }

    let mut bracketed = fa * fb < 0.0;
    // Which endpoint was replaced on the previous bracketing step
    let mut last_replaced: Option<bool> = None;

    for n in 1..=max_iterations {
        let denominator = fb - fa;

        if denominator == 0.0 {
            log::trace!("regula falsi stalled at iteration {n}: f(a) == f(b) == {fa}");
            break;
        }

        let x = (a * fb - b * fa) / denominator;
        let fx = f(x);

        log::trace!("regula falsi iteration {n}: x = {x}, f(x) = {fx}");

        if !fx.is_finite() {
            break;
        }

        if fx.abs() < f_best.abs() {
            best = x;
            f_best = fx;
        }

        if fx.abs() < tolerance {
            return RootEstimate {
                root: x,
                iterations: n,
            };
        }

        if bracketed {
            let replace_hi = fx.signum() == fb.signum();

            if replace_hi {
                b = x;
                fb = fx;
                if last_replaced == Some(true) {
                    fa /= 2.0;
                }
            } else {
                a = x;
                fa = fx;
                if last_replaced == Some(false) {
                    fb /= 2.0;
                }
            }

            last_replaced = Some(replace_hi);
        } else {
            a = b;
            fa = fb;
            b = x;
            fb = fx;
            bracketed = fa * fb < 0.0;
        }
    }

    not_converged(best)
}
