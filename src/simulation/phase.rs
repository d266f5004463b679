//! Phase-diagram data for the integrated wage map.
//!
//! The map `(x, y) -> (g(x, y), h(x, y))` sends this period's wages to next
//! period's. Sampling `g - x` and `h - y` on a grid gives the arrows and,
//! through their zero contours, the nullclines of a phase plot. Rendering is
//! left to the consumer.

use crate::core::economy::Economy;
use crate::core::error::{in_range, ParameterError};
use crate::equilibrium::world_rate::{EquilibriumError, WorldRateSolver};
use log::debug;
use serde::{Deserialize, Serialize};

/// Rectangular grid of wage pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseGrid {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Points per axis, endpoints included.
    pub resolution: usize,
}

impl Default for PhaseGrid {
    fn default() -> Self {
        Self {
            x_min: 0.01,
            x_max: 0.95,
            y_min: 0.01,
            y_max: 0.95,
            resolution: 12,
        }
    }
}

impl PhaseGrid {
    pub fn validate(&self) -> Result<(), ParameterError> {
        in_range("x_min", self.x_min, 0.0..self.x_max, "in [0, x_max)")?;
        in_range("y_min", self.y_min, 0.0..self.y_max, "in [0, y_max)")?;
        if self.resolution < 2 {
            return Err(ParameterError::OutOfRange {
                name: "resolution",
                value: self.resolution as f64,
                expected: ">= 2",
            });
        }
        Ok(())
    }

    fn axis(min: f64, max: f64, n: usize) -> impl Iterator<Item = f64> {
        let step = (max - min) / (n - 1) as f64;
        (0..n).map(move |i| min + step * i as f64)
    }

    /// Grid points in row-major order (y outer, x inner).
    pub fn points(&self) -> Vec<(f64, f64)> {
        Self::axis(self.y_min, self.y_max, self.resolution)
            .flat_map(|y| Self::axis(self.x_min, self.x_max, self.resolution).map(move |x| (x, y)))
            .collect()
    }
}

/// Displacement of the wage map at one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseArrow {
    pub x: f64,
    pub y: f64,
    /// `g(x, y) - x`
    pub dx: f64,
    /// `h(x, y) - y`
    pub dy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseField {
    pub arrows: Vec<PhaseArrow>,
    /// Grid points with no market-clearing rate.
    pub skipped: usize,
}

/// Sample the integrated wage map over `grid`.
///
/// Points where the solver finds no rate are counted in
/// [`PhaseField::skipped`]; configuration errors abort.
pub fn vector_field<E: Economy>(
    x_economy: &E,
    y_economy: &E,
    grid: &PhaseGrid,
    solver: &WorldRateSolver,
) -> Result<PhaseField, EquilibriumError> {
    grid.validate()?;
    x_economy.compatibility(y_economy)?;

    let mut field = PhaseField::default();
    for (x, y) in grid.points() {
        match solver.solve(x_economy, x, y_economy, y) {
            Ok(eq) => field.arrows.push(PhaseArrow {
                x,
                y,
                dx: x_economy.update_wage(x, eq.rate) - x,
                dy: y_economy.update_wage(y, eq.rate) - y,
            }),
            Err(EquilibriumError::NotFound { .. }) => field.skipped += 1,
            Err(err) => return Err(err),
        }
    }

    debug!(
        "phase field: {} arrows, {} points without equilibrium",
        field.arrows.len(),
        field.skipped
    );
    Ok(field)
}
