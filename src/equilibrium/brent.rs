//! Bracketing root finder.
//!
//! Brent's method: inverse quadratic interpolation or secant steps when
//! they make progress, bisection otherwise. Needs only a sign change of `f`
//! across the starting interval; no derivative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stopping rules for [`brentq`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrentOptions {
    /// Absolute tolerance on the root.
    pub xtol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
    pub max_iterations: usize,
}

impl Default for BrentOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

/// A located root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub value: f64,
    pub iterations: usize,
    pub function_calls: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootFindingError {
    #[error("invalid bracket [{a}, {b}]")]
    InvalidBracket { a: f64, b: f64 },
    #[error("f(a) = {fa} and f(b) = {fb} have the same sign")]
    NoSignChange { fa: f64, fb: f64 },
    #[error("f({x}) is not finite")]
    NonFinite { x: f64 },
    #[error("no convergence after {iterations} iterations (last estimate {estimate})")]
    NotConverged { iterations: usize, estimate: f64 },
    /// Raised by callers that check `f` at the returned root.
    #[error("estimate {estimate} leaves residual {residual}")]
    Residual { estimate: f64, residual: f64 },
}

/// Find a root of `f` in `[a, b]`.
///
/// Returns the first endpoint that is an exact root, otherwise an estimate
/// within `xtol + rtol * |x|` of a sign change.
///
/// # Examples
///
/// ```
/// use ksv_econ::equilibrium::brent::{brentq, BrentOptions};
///
/// let root = brentq(|x| x * x - 2.0, 0.0, 2.0, &BrentOptions::default()).unwrap();
/// assert!((root.value - 2.0_f64.sqrt()).abs() < 1e-10);
/// ```
pub fn brentq<F>(mut f: F, a: f64, b: f64, options: &BrentOptions) -> Result<Root, RootFindingError>
where
    F: FnMut(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) || a == b {
        return Err(RootFindingError::InvalidBracket { a, b });
    }

    let mut calls = 0;
    let (mut xpre, mut xcur) = (a, b);
    let mut fpre = evaluate(&mut f, xpre, &mut calls)?;
    let mut fcur = evaluate(&mut f, xcur, &mut calls)?;
    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0, 0.0);

    if fpre * fcur > 0.0 {
        return Err(RootFindingError::NoSignChange { fa: fpre, fb: fcur });
    }
    if fpre == 0.0 {
        return Ok(Root {
            value: xpre,
            iterations: 0,
            function_calls: 2,
        });
    }
    if fcur == 0.0 {
        return Ok(Root {
            value: xcur,
            iterations: 0,
            function_calls: 2,
        });
    }

    for iteration in 0..options.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        // Keep the better estimate in xcur.
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (options.xtol + options.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(Root {
                value: xcur,
                iterations: iteration,
                function_calls: calls,
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = evaluate(&mut f, xcur, &mut calls)?;
    }

    Err(RootFindingError::NotConverged {
        iterations: options.max_iterations,
        estimate: xcur,
    })
}

fn evaluate<F>(f: &mut F, x: f64, calls: &mut usize) -> Result<f64, RootFindingError>
where
    F: FnMut(f64) -> f64,
{
    *calls += 1;
    let fx = f(x);
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(RootFindingError::NonFinite { x })
    }
}
