//! Complete-markets benchmark.
//!
//! Without the credit friction, savings are pooled across both countries
//! and each country's wage next period depends only on the world average:
//!
//! ```text
//! x[t+1] = y[t+1] = (1 - alpha) (s (x[t] + y[t]) / 2)^alpha
//! ```
//!
//! with `s` the economy's output scale. This is a separate scenario and is
//! not derived from [`Economy::update_wage`].

use crate::core::economy::Economy;
use crate::core::error::{check_wage, ParameterError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompleteMarketsTrace {
    pub wages_x: Vec<f64>,
    pub wages_y: Vec<f64>,
}

/// Next-period wage shared by both countries.
pub fn pooled_wage<E: Economy>(economy: &E, x: f64, y: f64) -> f64 {
    let alpha = economy.alpha();
    (1.0 - alpha) * (economy.output_scale() * 0.5 * (x + y)).powf(alpha)
}

/// Wage paths of length `n` starting from `(x0, y0)`.
pub fn complete_markets_path<E: Economy>(
    economy: &E,
    x0: f64,
    y0: f64,
    n: usize,
) -> Result<CompleteMarketsTrace, ParameterError> {
    let mut wages_x = Vec::with_capacity(n);
    let mut wages_y = Vec::with_capacity(n);
    let (mut x, mut y) = (check_wage("x", x0)?, check_wage("y", y0)?);

    for _ in 0..n {
        wages_x.push(x);
        wages_y.push(y);
        x = pooled_wage(economy, x, y);
        y = x;
    }

    Ok(CompleteMarketsTrace { wages_x, wages_y })
}
