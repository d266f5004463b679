use crate::core::economy::Economy;
use crate::core::error::{check_wage, ParameterError};
use std::fmt;

/// One economy together with its current wage.
///
/// The wage is the only state that changes from period to period. Every
/// wage that would be stored is checked first, so a degenerate value is
/// reported where it arises instead of leaking into the next period.
///
/// # Examples
///
/// ```
/// use ksv_econ::core::country::Country;
/// use ksv_econ::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
///
/// let economy = MoralHazardEconomy::new(MoralHazardParams::default()).unwrap();
/// let mut home = Country::new("X", economy, 0.3).unwrap();
/// let r = home.autarky_r().unwrap();
/// home.advance_autarky().unwrap();
/// assert!(r > 0.0 && home.wage() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Country<E> {
    label: String,
    economy: E,
    wage: f64,
}

impl<E: Economy> Country<E> {
    pub fn new(label: impl Into<String>, economy: E, wage: f64) -> Result<Self, ParameterError> {
        let label = label.into();
        let wage = check_wage(&label, wage)?;
        Ok(Self {
            label,
            economy,
            wage,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn economy(&self) -> &E {
        &self.economy
    }

    pub fn economy_mut(&mut self) -> &mut E {
        &mut self.economy
    }

    pub fn wage(&self) -> f64 {
        self.wage
    }

    pub fn set_wage(&mut self, wage: f64) -> Result<(), ParameterError> {
        self.wage = check_wage(&self.label, wage)?;
        Ok(())
    }

    pub fn phi(&self, r: f64) -> f64 {
        self.economy.phi(self.wage, r)
    }

    pub fn current_account(&self, r: f64) -> f64 {
        self.economy.current_account(self.wage, r)
    }

    /// Next-period wage at world rate `r`, without mutating the country.
    pub fn next_wage(&self, r: f64) -> Result<f64, ParameterError> {
        check_wage(&self.label, self.economy.update_wage(self.wage, r))
    }

    /// Autarky interest rate at the current wage. Undefined at a zero wage.
    pub fn autarky_r(&self) -> Result<f64, ParameterError> {
        if self.wage <= 0.0 {
            return Err(ParameterError::ZeroWage {
                country: self.label.clone(),
                wage: self.wage,
            });
        }
        Ok(self.economy.autarky_r(self.wage))
    }

    pub fn autarky_next_wage(&self) -> Result<f64, ParameterError> {
        check_wage(&self.label, self.economy.autarky_update_wage(self.wage))
    }

    /// Move to the next period at world rate `r`.
    pub fn advance(&mut self, r: f64) -> Result<f64, ParameterError> {
        self.wage = self.next_wage(r)?;
        Ok(self.wage)
    }

    /// Move to the next period under autarky.
    pub fn advance_autarky(&mut self) -> Result<f64, ParameterError> {
        self.wage = self.autarky_next_wage()?;
        Ok(self.wage)
    }
}

impl<E: Economy> fmt::Display for Country<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (z = {}, w = {:.6}, w* = {:.6})",
            self.label,
            self.economy.productivity(),
            self.wage,
            self.economy.wstar()
        )
    }
}
