//! Integrated two-country simulation.
//!
//! Each period solves the world rate at the current wages, records the
//! period, then moves both countries to their next wages. [`step`] does the
//! first two and returns the next wages instead of applying them, so the
//! current accounts are always taken at pre-update wages.

use crate::core::country::Country;
use crate::core::economy::Economy;
use crate::core::error::{check_wage, ParameterError};
use crate::equilibrium::world_rate::{EquilibriumError, SolverOptions, WorldRateSolver};
use crate::simulation::productivity::ProductivityDraw;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    /// Period `period` had no market-clearing rate. `completed` holds the
    /// periods before it.
    #[error("period {period}: {source}")]
    Equilibrium {
        period: usize,
        #[source]
        source: EquilibriumError,
        completed: SimulationTrace,
    },
}

/// What to do when a period has no market-clearing rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Redraw both productivities and solve again, up to `max_attempts`
    /// draws in total. Only applies to stochastic runs.
    Redraw { max_attempts: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Redraw `z` in both countries each period when set.
    pub productivity: Option<ProductivityDraw>,
    pub on_no_equilibrium: FailurePolicy,
    /// Seed for productivity draws. Fresh entropy when absent.
    pub seed: Option<u64>,
    pub solver: SolverOptions,
}

/// State of the world in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub t: usize,
    pub wage_x: f64,
    pub wage_y: f64,
    /// World rate `r_{t+1}` found at this period's wages.
    pub rate: f64,
    pub current_account_x: f64,
    pub current_account_y: f64,
    pub z_x: f64,
    pub z_y: f64,
}

/// Wages both countries move to after a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextWages {
    pub x: f64,
    pub y: f64,
}

/// Ordered per-period records of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    records: Vec<PeriodRecord>,
}

impl SimulationTrace {
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn wages_x(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.wage_x).collect()
    }

    pub fn wages_y(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.wage_y).collect()
    }

    /// World rates indexed by the period they apply to. Entry 0 is `None`.
    pub fn world_rates(&self) -> Vec<Option<f64>> {
        std::iter::once(None)
            .chain(self.records.iter().map(|r| Some(r.rate)))
            .collect()
    }

    pub fn current_accounts_x(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.current_account_x).collect()
    }

    pub fn current_accounts_y(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.current_account_y).collect()
    }

    /// `|w_x - w_y|` per period.
    pub fn cross_country_gap(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| (r.wage_x - r.wage_y).abs())
            .collect()
    }

    /// The five series `(x, y, world_r, ca_x, ca_y)` in plotting order.
    #[allow(clippy::type_complexity)]
    pub fn into_series(self) -> (Vec<f64>, Vec<f64>, Vec<Option<f64>>, Vec<f64>, Vec<f64>) {
        (
            self.wages_x(),
            self.wages_y(),
            self.world_rates(),
            self.current_accounts_x(),
            self.current_accounts_y(),
        )
    }
}

/// Solve period `t` and snapshot it at the countries' current wages.
///
/// Neither country is mutated; the returned [`NextWages`] are applied by
/// the caller.
pub fn step<E: Economy>(
    t: usize,
    x: &Country<E>,
    y: &Country<E>,
    solver: &WorldRateSolver,
) -> Result<(PeriodRecord, NextWages), EquilibriumError> {
    let r = solver.solve_countries(x, y)?.rate;

    let record = PeriodRecord {
        t,
        wage_x: x.wage(),
        wage_y: y.wage(),
        rate: r,
        current_account_x: x.current_account(r),
        current_account_y: y.current_account(r),
        z_x: x.economy().productivity(),
        z_y: y.economy().productivity(),
    };
    let next = NextWages {
        x: x.next_wage(r)?,
        y: y.next_wage(r)?,
    };
    Ok((record, next))
}

/// Run `n` periods of the integrated world.
///
/// `x0` and `y0` override the countries' wages before the first period.
/// Productivity draws use `options.seed` when given.
///
/// Nothing is mutated when the run is rejected up front. When period `t`
/// fails, both countries are left as period `t` saw them: advanced wages
/// and, on stochastic runs, the last productivity drawn.
pub fn simulate<E: Economy + Clone>(
    n: usize,
    x: &mut Country<E>,
    y: &mut Country<E>,
    x0: Option<f64>,
    y0: Option<f64>,
    options: &SimulationOptions,
) -> Result<SimulationTrace, SimulationError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    simulate_with_rng(n, x, y, x0, y0, options, &mut rng)
}

/// [`simulate`] with a caller-supplied random source.
pub fn simulate_with_rng<E: Economy + Clone, R: Rng + ?Sized>(
    n: usize,
    x: &mut Country<E>,
    y: &mut Country<E>,
    x0: Option<f64>,
    y0: Option<f64>,
    options: &SimulationOptions,
    rng: &mut R,
) -> Result<SimulationTrace, SimulationError> {
    x.economy().compatibility(y.economy())?;
    if let Some(draw) = &options.productivity {
        check_draw(x, draw)?;
        check_draw(y, draw)?;
    }
    let x0 = x0.map(|w| check_wage(x.label(), w)).transpose()?;
    let y0 = y0.map(|w| check_wage(y.label(), w)).transpose()?;
    if let Some(w) = x0 {
        x.set_wage(w)?;
    }
    if let Some(w) = y0 {
        y.set_wage(w)?;
    }

    info!(
        "simulating {} periods from wx = {}, wy = {}{}",
        n,
        x.wage(),
        y.wage(),
        if options.productivity.is_some() {
            " with stochastic productivity"
        } else {
            ""
        }
    );

    let solver = WorldRateSolver::new(options.solver);
    let mut records = Vec::with_capacity(n);
    for t in 0..n {
        let (record, next) = match run_period(t, x, y, &solver, options, rng) {
            Ok(out) => out,
            Err(source) => {
                return Err(SimulationError::Equilibrium {
                    period: t,
                    source,
                    completed: SimulationTrace { records },
                });
            }
        };
        debug!(
            "t = {}: wx = {:.6}, wy = {:.6}, r = {:.6}, ca_x = {:.6}",
            t, record.wage_x, record.wage_y, record.rate, record.current_account_x
        );
        x.set_wage(next.x)?;
        y.set_wage(next.y)?;
        records.push(record);
    }

    info!(
        "finished {} periods at wx = {:.6}, wy = {:.6} (w* = {:.6})",
        n,
        x.wage(),
        y.wage(),
        x.economy().wstar()
    );
    Ok(SimulationTrace { records })
}

/// Reject draws whose upper end breaks the equity condition before the run starts.
fn check_draw<E: Economy + Clone>(
    country: &Country<E>,
    draw: &ProductivityDraw,
) -> Result<(), ParameterError> {
    draw.validate()?;
    // wbar rises with z, so the top of the range is the binding case.
    let mut widest = country.economy().clone();
    widest.set_productivity(draw.high)
}

fn run_period<E: Economy, R: Rng + ?Sized>(
    t: usize,
    x: &mut Country<E>,
    y: &mut Country<E>,
    solver: &WorldRateSolver,
    options: &SimulationOptions,
    rng: &mut R,
) -> Result<(PeriodRecord, NextWages), EquilibriumError> {
    let attempts = match (&options.productivity, options.on_no_equilibrium) {
        (Some(_), FailurePolicy::Redraw { max_attempts }) => max_attempts.max(1),
        _ => 1,
    };

    let mut attempt = 0;
    loop {
        attempt += 1;
        if let Some(draw) = &options.productivity {
            x.economy_mut().set_productivity(draw.sample(rng))?;
            y.economy_mut().set_productivity(draw.sample(rng))?;
        }

        match step(t, x, y, solver) {
            Ok(out) => return Ok(out),
            Err(source @ EquilibriumError::NotFound { .. }) if attempt < attempts => {
                warn!(
                    "period {}: redrawing productivity (attempt {} of {}): {}",
                    t, attempt, attempts, source
                );
            }
            Err(source) => return Err(source),
        }
    }
}
