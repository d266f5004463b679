use crate::core::country::Country;
use crate::core::economy::Economy;
use crate::core::error::{check_wage, ParameterError};
use crate::equilibrium::brent::{brentq, BrentOptions, RootFindingError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from solving for the world interest rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquilibriumError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("no equilibrium rate in [{r_min}, {r_max}] for wx = {wx}, wy = {wy}: {source}")]
    NotFound {
        wx: f64,
        wy: f64,
        r_min: f64,
        r_max: f64,
        #[source]
        source: RootFindingError,
    },
}

/// Search settings for the world-rate solver.
///
/// The root is searched in `ln r`, so `brent.xtol` bounds the relative
/// error of the rate whatever its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// `r_max` is the larger saturation rate times `upper_multiplier`.
    pub upper_multiplier: f64,
    /// Largest `|excess demand|` accepted at the returned rate.
    pub residual_tolerance: f64,
    pub brent: BrentOptions,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            upper_multiplier: 1e12,
            residual_tolerance: 1e-8,
            brent: BrentOptions::default(),
        }
    }
}

/// A market-clearing world interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub rate: f64,
    pub r_min: f64,
    pub r_max: f64,
    pub iterations: usize,
}

/// Solves for the interest rate clearing the integrated credit market.
///
/// Both countries lend their whole wage and borrow for projects, so the
/// rate `r` must satisfy
///
/// ```text
/// phi_x(wx, r) + phi_y(wy, r) - wx - wy = 0
/// ```
///
/// The search starts at the largest rate where both countries are still
/// unconstrained (`phi = 1`), where excess demand is `2 - wx - wy`, and
/// ends far above it, where demand has collapsed.
///
/// # Examples
///
/// ```
/// use ksv_econ::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
/// use ksv_econ::equilibrium::world_rate::WorldRateSolver;
///
/// let params = MoralHazardParams { gamma: 0.4, alpha: 0.55, z: 10.0, p: 0.25 };
/// let x = MoralHazardEconomy::new(params).unwrap();
/// let y = x.clone();
///
/// let eq = WorldRateSolver::default().solve(&x, 0.1, &y, 0.9).unwrap();
/// assert!(eq.rate > eq.r_min && eq.rate < eq.r_max);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorldRateSolver {
    options: SolverOptions,
}

impl WorldRateSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Excess demand for credit at rate `r`. Decreasing in `r`.
    pub fn excess_demand<E: Economy>(x: &E, wx: f64, y: &E, wy: f64, r: f64) -> f64 {
        x.phi(wx, r) + y.phi(wy, r) - wx - wy
    }

    /// Search interval `[r_min, r_max]` for the given wages.
    ///
    /// Below the smaller saturation rate both countries have `phi = 1`.
    /// `r_max` is anchored on the larger one so both `phi` have collapsed
    /// there, however far apart the two rates are.
    pub fn bracket<E: Economy>(&self, x: &E, wx: f64, y: &E, wy: f64) -> (f64, f64) {
        let (sx, sy) = (x.saturation_rate(wx), y.saturation_rate(wy));
        (sx.min(sy), sx.max(sy) * self.options.upper_multiplier)
    }

    /// Find the world rate for economies `x` and `y` at wages `wx` and `wy`.
    ///
    /// Fails when the economies differ in anything but `z`, when a wage is
    /// negative or not finite, or when the bracket holds no sign change
    /// (for instance `wx = wy = 0`).
    pub fn solve<E: Economy>(
        &self,
        x: &E,
        wx: f64,
        y: &E,
        wy: f64,
    ) -> Result<Equilibrium, EquilibriumError> {
        x.compatibility(y)?;
        check_wage("x", wx)?;
        check_wage("y", wy)?;

        let (r_min, r_max) = self.bracket(x, wx, y, wy);
        let f = |log_r: f64| Self::excess_demand(x, wx, y, wy, log_r.exp());

        let found = brentq(f, r_min.ln(), r_max.ln(), &self.options.brent).and_then(|root| {
            let rate = root.value.exp();
            let residual = Self::excess_demand(x, wx, y, wy, rate);
            if residual.abs() <= self.options.residual_tolerance {
                Ok((rate, root.iterations))
            } else {
                Err(RootFindingError::Residual {
                    estimate: rate,
                    residual,
                })
            }
        });

        match found {
            Ok((rate, iterations)) => {
                debug!(
                    "world rate {:.10} in [{:.6e}, {:.6e}] after {} iterations (wx = {}, wy = {})",
                    rate, r_min, r_max, iterations, wx, wy
                );
                Ok(Equilibrium {
                    rate,
                    r_min,
                    r_max,
                    iterations,
                })
            }
            Err(source) => {
                warn!("no world rate for wx = {}, wy = {}: {}", wx, wy, source);
                Err(EquilibriumError::NotFound {
                    wx,
                    wy,
                    r_min,
                    r_max,
                    source,
                })
            }
        }
    }

    /// Solve at the countries' current wages.
    pub fn solve_countries<E: Economy>(
        &self,
        x: &Country<E>,
        y: &Country<E>,
    ) -> Result<Equilibrium, EquilibriumError> {
        self.solve(x.economy(), x.wage(), y.economy(), y.wage())
    }
}
