//! Closed-economy dynamics.
//!
//! No solver is involved: the autarky rate has a closed form in the wage.

use crate::core::country::Country;
use crate::core::economy::Economy;
use crate::core::error::ParameterError;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutarkyTrace {
    /// Wage at the start of each period.
    pub wages: Vec<f64>,
    /// Autarky rates indexed by the period they apply to. Entry 0 is `None`.
    pub rates: Vec<Option<f64>>,
}

/// Run `n` periods of `country` cut off from world capital markets.
///
/// The country's wage is advanced in place. A zero wage has no autarky
/// rate and stops the run.
pub fn simulate_autarky<E: Economy>(
    n: usize,
    country: &mut Country<E>,
) -> Result<AutarkyTrace, ParameterError> {
    let mut wages = Vec::with_capacity(n);
    let mut rates = Vec::with_capacity(n + 1);
    rates.push(None);

    for t in 0..n {
        let r = country.autarky_r()?;
        wages.push(country.wage());
        rates.push(Some(r));
        debug!("{} autarky t = {}: w = {:.6}, r = {:.6}", country.label(), t, country.wage(), r);
        country.advance_autarky()?;
    }

    Ok(AutarkyTrace { wages, rates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ksv::{KsvEconomy, KsvParams};
    use approx::assert_relative_eq;

    #[test]
    fn test_autarky_converges_to_wstar() {
        let economy = KsvEconomy::new(KsvParams::default()).unwrap();
        let wstar = economy.wstar();
        let mut country = Country::new("X", economy, 0.05).unwrap();

        let trace = simulate_autarky(60, &mut country).unwrap();
        assert_eq!(trace.wages.len(), 60);
        assert_eq!(trace.rates.len(), 61);
        assert!(trace.rates[0].is_none());
        assert_relative_eq!(country.wage(), wstar, epsilon = 1e-9);
    }

    #[test]
    fn test_rate_matches_closed_form() {
        let economy = KsvEconomy::new(KsvParams::default()).unwrap();
        let expected = economy.autarky_r(0.3);
        let mut country = Country::new("X", economy, 0.3).unwrap();
        let trace = simulate_autarky(1, &mut country).unwrap();
        assert_eq!(trace.rates[1], Some(expected));
    }

    #[test]
    fn test_zero_wage_stops_run() {
        let economy = KsvEconomy::new(KsvParams::default()).unwrap();
        let mut country = Country::new("X", economy, 0.0).unwrap();
        assert!(matches!(
            simulate_autarky(3, &mut country),
            Err(ParameterError::ZeroWage { .. })
        ));
    }
}
