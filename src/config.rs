//! Run configuration.
//!
//! A run is described by one JSON document: which calibration to use, how
//! the two countries differ, where they start, and the simulation options.
//!
//! ```json
//! {
//!   "economy": { "variant": "moral_hazard", "gamma": 0.4, "alpha": 0.55, "z": 10, "p": 0.25 },
//!   "z_y": 9.0,
//!   "wage_x": 0.1,
//!   "wage_y": 0.9,
//!   "periods": 20,
//!   "simulation": { "seed": 7, "on_no_equilibrium": { "policy": "abort" } }
//! }
//! ```

use crate::core::country::Country;
use crate::core::economy::Economy;
use crate::core::error::ParameterError;
use crate::core::ksv::{KsvEconomy, KsvParams};
use crate::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
use crate::simulation::autarky::{simulate_autarky, AutarkyTrace};
use crate::simulation::complete_markets::{complete_markets_path, CompleteMarketsTrace};
use crate::simulation::report::SimulationReport;
use crate::simulation::world::{simulate, SimulationError, SimulationOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Which calibration both countries share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum EconomyConfig {
    MoralHazard(MoralHazardParams),
    Ksv(KsvParams),
}

impl Default for EconomyConfig {
    fn default() -> Self {
        EconomyConfig::MoralHazard(MoralHazardParams {
            gamma: 0.4,
            alpha: 0.55,
            z: 10.0,
            p: 0.25,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub economy: EconomyConfig,
    /// Productivity of country X when it differs from `economy`.
    pub z_x: Option<f64>,
    /// Productivity of country Y when it differs from `economy`.
    pub z_y: Option<f64>,
    pub wage_x: f64,
    pub wage_y: f64,
    pub periods: usize,
    pub simulation: SimulationOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            z_x: None,
            z_y: None,
            wage_x: 0.1,
            wage_y: 0.9,
            periods: 3,
            simulation: SimulationOptions::default(),
        }
    }
}

impl RunConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.build()?;
        Ok(config)
    }

    /// Validate every parameter and construct both countries.
    pub fn build(&self) -> Result<World, ParameterError> {
        if let Some(draw) = &self.simulation.productivity {
            draw.validate()?;
        }
        match self.economy {
            EconomyConfig::MoralHazard(params) => {
                let (x, y) = self.countries(MoralHazardEconomy::new(params)?)?;
                Ok(World::MoralHazard(x, y))
            }
            EconomyConfig::Ksv(params) => {
                let (x, y) = self.countries(KsvEconomy::new(params)?)?;
                Ok(World::Ksv(x, y))
            }
        }
    }

    fn countries<E: Economy + Clone>(
        &self,
        economy: E,
    ) -> Result<(Country<E>, Country<E>), ParameterError> {
        let mut x_economy = economy.clone();
        let mut y_economy = economy;
        if let Some(z) = self.z_x {
            x_economy.set_productivity(z)?;
        }
        if let Some(z) = self.z_y {
            y_economy.set_productivity(z)?;
        }
        Ok((
            Country::new("X", x_economy, self.wage_x)?,
            Country::new("Y", y_economy, self.wage_y)?,
        ))
    }
}

/// Two ready-to-run countries of the configured calibration.
#[derive(Debug, Clone, PartialEq)]
pub enum World {
    MoralHazard(Country<MoralHazardEconomy>, Country<MoralHazardEconomy>),
    Ksv(Country<KsvEconomy>, Country<KsvEconomy>),
}

impl World {
    /// Steady-state wage of country X.
    pub fn wstar(&self) -> f64 {
        match self {
            World::MoralHazard(x, _) => x.economy().wstar(),
            World::Ksv(x, _) => x.economy().wstar(),
        }
    }

    pub fn simulate(
        &mut self,
        periods: usize,
        options: &SimulationOptions,
    ) -> Result<SimulationReport, SimulationError> {
        match self {
            World::MoralHazard(x, y) => run_integrated(periods, x, y, options),
            World::Ksv(x, y) => run_integrated(periods, x, y, options),
        }
    }

    /// Autarky paths of both countries, each on its own.
    pub fn autarky(
        &mut self,
        periods: usize,
    ) -> Result<(AutarkyTrace, AutarkyTrace), ParameterError> {
        match self {
            World::MoralHazard(x, y) => Ok((simulate_autarky(periods, x)?, simulate_autarky(periods, y)?)),
            World::Ksv(x, y) => Ok((simulate_autarky(periods, x)?, simulate_autarky(periods, y)?)),
        }
    }

    /// Complete-markets benchmark from the current wages, using X's calibration.
    pub fn complete_markets(&self, periods: usize) -> Result<CompleteMarketsTrace, ParameterError> {
        match self {
            World::MoralHazard(x, y) => complete_markets_path(x.economy(), x.wage(), y.wage(), periods),
            World::Ksv(x, y) => complete_markets_path(x.economy(), x.wage(), y.wage(), periods),
        }
    }
}

fn run_integrated<E: Economy + Clone>(
    periods: usize,
    x: &mut Country<E>,
    y: &mut Country<E>,
    options: &SimulationOptions,
) -> Result<SimulationReport, SimulationError> {
    let wstar = x.economy().wstar();
    let trace = simulate(periods, x, y, None, None, options)?;
    Ok(SimulationReport::new(trace, wstar))
}
