use crate::core::error::ParameterError;

/// A single economy with a credit-market friction.
///
/// Implementors hold structural parameters and the constants derived from
/// them. All methods are pure in the wage `w` and the gross interest rate
/// `r`; the current wage itself lives in [`Country`](crate::core::country::Country).
///
/// Two calibrations implement this interface:
/// [`MoralHazardEconomy`](crate::core::moral_hazard::MoralHazardEconomy) and
/// [`KsvEconomy`](crate::core::ksv::KsvEconomy). They share the contract but
/// not their internal constants.
pub trait Economy {
    /// Capital share exponent, in (0, 1).
    fn alpha(&self) -> f64;

    /// Productivity scale `z`.
    fn productivity(&self) -> f64;

    /// Effective productivity multiplying the entrepreneur fraction in output.
    fn output_scale(&self) -> f64;

    /// Upper bound on next-period wages, reached when every agent is an entrepreneur.
    fn wbar(&self) -> f64;

    /// Autarky steady-state wage.
    fn wstar(&self) -> f64;

    /// Fraction of domestic entrepreneurs financed at wage `w` and rate `r`.
    ///
    /// Saturates at exactly 1 when the credit constraint stops binding.
    /// Outside `w >= 0, r > 0` it is NaN, never a clipped 1, so the
    /// degenerate state reaches the caller's finiteness checks.
    fn phi(&self, w: f64, r: f64) -> f64;

    /// Rate at or below which `phi(w, r)` is clipped to 1.
    fn saturation_rate(&self, w: f64) -> f64;

    /// Next-period wage when a fraction `phi` of agents run projects.
    fn update_wage_from_phi(&self, phi: f64) -> f64;

    /// Interest rate clearing the closed economy at wage `w`.
    fn autarky_r(&self, w: f64) -> f64;

    /// Ok if `other` differs from `self` at most in productivity `z`.
    fn compatibility(&self, other: &Self) -> Result<(), ParameterError>
    where
        Self: Sized;

    /// Replace `z` and recalibrate. Leaves `self` untouched on error.
    fn set_productivity(&mut self, z: f64) -> Result<(), ParameterError>;

    /// Savings minus entrepreneurial demand. Positive for a net lender.
    fn current_account(&self, w: f64, r: f64) -> f64 {
        w - self.phi(w, r)
    }

    /// Next-period wage in the integrated world.
    fn update_wage(&self, w: f64, r: f64) -> f64 {
        self.update_wage_from_phi(self.phi(w, r))
    }

    /// Next-period wage in autarky, where savings fund exactly `phi = w`.
    fn autarky_update_wage(&self, w: f64) -> f64 {
        self.update_wage_from_phi(w)
    }
}
