//! Stochastic productivity shocks.

use crate::core::error::ParameterError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Uniform distribution for per-period redraws of productivity `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityDraw {
    pub low: f64,
    pub high: f64,
}

impl Default for ProductivityDraw {
    fn default() -> Self {
        Self {
            low: 15.0,
            high: 25.0,
        }
    }
}

impl ProductivityDraw {
    pub fn new(low: f64, high: f64) -> Result<Self, ParameterError> {
        let draw = Self { low, high };
        draw.validate()?;
        Ok(draw)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.low.is_finite() && self.low > 0.0) {
            return Err(ParameterError::OutOfRange {
                name: "productivity.low",
                value: self.low,
                expected: "finite and > 0",
            });
        }
        if !(self.high.is_finite() && self.high > self.low) {
            return Err(ParameterError::OutOfRange {
                name: "productivity.high",
                value: self.high,
                expected: "finite and > low",
            });
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..self.high)
    }
}
