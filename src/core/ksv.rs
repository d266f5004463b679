use crate::core::economy::Economy;
use crate::core::error::{in_range, open_interval, positive, same, ParameterError};
use serde::{Deserialize, Serialize};
use std::ops::Bound::{Excluded, Included};

/// Structural parameters of the KSV calibration.
///
/// Projects succeed with probability `q1` when the entrepreneur works and
/// `q0` when they shirk; `v1` is the private value of shirking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsvParams {
    pub v1: f64,
    pub q0: f64,
    pub q1: f64,
    pub alpha: f64,
    pub z: f64,
}

impl Default for KsvParams {
    fn default() -> Self {
        Self {
            v1: 1.0,
            q0: 0.2,
            q1: 0.8,
            alpha: 0.5,
            z: 4.0,
        }
    }
}

impl KsvParams {
    pub fn validate(&self) -> Result<(), ParameterError> {
        positive("v1", self.v1)?;
        in_range("q1", self.q1, (Excluded(0.0), Included(1.0)), "in (0, 1]")?;
        in_range("q0", self.q0, 0.0..self.q1, "in [0, q1)")?;
        open_interval("alpha", self.alpha, 0.0, 1.0, "in (0, 1)")?;
        positive("z", self.z)
    }
}

/// Economy with the KSV financial friction.
///
/// Holds the structural parameters and everything [`KsvEconomy::calibrate`]
/// derives from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KsvParams", into = "KsvParams")]
pub struct KsvEconomy {
    params: KsvParams,
    eta: f64,
    theta: f64,
    big_r: f64,
    wbar: f64,
    wstar: f64,
    stability_measure: f64,
}

impl KsvEconomy {
    pub fn new(params: KsvParams) -> Result<Self, ParameterError> {
        params.validate()?;
        let mut economy = Self {
            params,
            eta: 0.0,
            theta: 0.0,
            big_r: 0.0,
            wbar: 0.0,
            wstar: 0.0,
            stability_measure: 0.0,
        };
        economy.calibrate()?;
        Ok(economy)
    }

    /// Recompute the implied constants from the current parameters.
    ///
    /// Fails when the equity condition `(1 - alpha) R^alpha < 1` does not hold.
    pub fn calibrate(&mut self) -> Result<(), ParameterError> {
        let KsvParams { v1, q0, q1, alpha, z } = self.params;

        let eta = (v1 / (q1 - q0)).exp();
        let theta = ((eta - 1.0) * q1 + 1.0) / eta.powf(q0) - 1.0;
        let big_r = q1 * z;
        let wbar = (1.0 - alpha) * big_r.powf(alpha);
        if !(wbar < 1.0) {
            return Err(ParameterError::EquityCondition { wbar });
        }
        let wstar = wbar.powf(1.0 / (1.0 - alpha));

        self.eta = eta;
        self.theta = theta;
        self.big_r = big_r;
        self.wbar = wbar;
        self.wstar = wstar;
        self.stability_measure = (2.0 * alpha - 1.0) * theta * wstar / (1.0 - alpha);
        Ok(())
    }

    pub fn params(&self) -> &KsvParams {
        &self.params
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Friction multiplier on the wage in the lending constraint.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Gross project return `q1 z`.
    pub fn big_r(&self) -> f64 {
        self.big_r
    }

    /// Local stability of the autarky steady state; oscillations appear above 1.
    pub fn stability_measure(&self) -> f64 {
        self.stability_measure
    }

    /// Inverse of the marginal product `f'(k) = alpha k^(alpha - 1)`.
    fn f_prime_inv(&self, y: f64) -> f64 {
        (self.params.alpha / y).powf(1.0 / (1.0 - self.params.alpha))
    }
}

impl TryFrom<KsvParams> for KsvEconomy {
    type Error = ParameterError;

    fn try_from(params: KsvParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<KsvEconomy> for KsvParams {
    fn from(economy: KsvEconomy) -> Self {
        economy.params
    }
}

impl Economy for KsvEconomy {
    fn alpha(&self) -> f64 {
        self.params.alpha
    }

    fn productivity(&self) -> f64 {
        self.params.z
    }

    fn output_scale(&self) -> f64 {
        self.big_r
    }

    fn wbar(&self) -> f64 {
        self.wbar
    }

    fn wstar(&self) -> f64 {
        self.wstar
    }

    fn phi(&self, w: f64, r: f64) -> f64 {
        if !(w >= 0.0 && r > 0.0) {
            return f64::NAN;
        }
        let y = self.f_prime_inv((1.0 + self.theta * w) * (r / self.big_r)) / self.big_r;
        y.min(1.0)
    }

    fn saturation_rate(&self, w: f64) -> f64 {
        let alpha = self.params.alpha;
        alpha * self.big_r.powf(alpha) / (1.0 + self.theta * w)
    }

    fn update_wage_from_phi(&self, phi: f64) -> f64 {
        let alpha = self.params.alpha;
        // Realized phi, never self.phi re-applied.
        (1.0 - alpha) * (self.big_r * phi).powf(alpha)
    }

    fn autarky_r(&self, w: f64) -> f64 {
        let alpha = self.params.alpha;
        let marginal = alpha * self.big_r.powf(alpha) * w.powf(alpha - 1.0);
        marginal / (1.0 + self.theta * w)
    }

    fn compatibility(&self, other: &Self) -> Result<(), ParameterError> {
        same("alpha", self.params.alpha, other.params.alpha)?;
        same("v1", self.params.v1, other.params.v1)?;
        same("q0", self.params.q0, other.params.q0)?;
        same("q1", self.params.q1, other.params.q1)?;
        same("theta", self.theta, other.theta)
    }

    fn set_productivity(&mut self, z: f64) -> Result<(), ParameterError> {
        positive("z", z)?;
        let mut next = self.clone();
        next.params.z = z;
        next.calibrate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calibration_constants() {
        let e = KsvEconomy::new(KsvParams::default()).unwrap();
        assert_relative_eq!(e.eta(), (1.0_f64 / 0.6).exp(), epsilon = 1e-12);
        assert_relative_eq!(e.big_r(), 3.2, epsilon = 1e-12);
        assert_relative_eq!(e.wbar(), 0.5 * 3.2_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(e.wstar(), e.wbar() * e.wbar(), epsilon = 1e-12);
        // alpha = 0.5 puts the stability measure at zero
        assert_relative_eq!(e.stability_measure(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_historical_default_sits_on_equity_boundary() {
        let result = KsvEconomy::new(KsvParams {
            z: 5.0,
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(ParameterError::EquityCondition { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_probabilities() {
        let result = KsvEconomy::new(KsvParams {
            q0: 0.9,
            q1: 0.8,
            ..Default::default()
        });
        assert!(matches!(result, Err(ParameterError::OutOfRange { name: "q0", .. })));
    }

    #[test]
    fn test_probability_bounds() {
        let certain = KsvEconomy::new(KsvParams {
            q0: 0.0,
            q1: 1.0,
            z: 3.0,
            ..Default::default()
        });
        assert!(certain.is_ok());

        let result = KsvEconomy::new(KsvParams {
            q0: -1e-17,
            ..Default::default()
        });
        assert!(matches!(result, Err(ParameterError::OutOfRange { name: "q0", .. })));
        let result = KsvEconomy::new(KsvParams {
            q1: 1.0 + 1e-15,
            ..Default::default()
        });
        assert!(matches!(result, Err(ParameterError::OutOfRange { name: "q1", .. })));
    }

    #[test]
    fn test_phi_outside_domain_is_nan() {
        let e = KsvEconomy::new(KsvParams::default()).unwrap();
        assert!(e.phi(-0.5, 0.5).is_nan());
        assert!(e.phi(0.3, 0.0).is_nan());
        assert!(e.current_account(-0.5, 0.5).is_nan());
    }

    #[test]
    fn test_phi_clips_at_saturation() {
        let e = KsvEconomy::new(KsvParams::default()).unwrap();
        let w = 0.4;
        let r_sat = e.saturation_rate(w);
        assert_eq!(e.phi(w, r_sat / 3.0), 1.0);
        assert_relative_eq!(e.phi(w, r_sat), 1.0, epsilon = 1e-12);
        assert!(e.phi(w, r_sat * 2.0) < 1.0);
    }

    #[test]
    fn test_autarky_rate_matches_phi_equal_wage() {
        let e = KsvEconomy::new(KsvParams::default()).unwrap();
        for w in [0.1, 0.3, 0.7] {
            assert_relative_eq!(e.phi(w, e.autarky_r(w)), w, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_autarky_fixed_point() {
        let e = KsvEconomy::new(KsvParams {
            alpha: 0.6,
            ..Default::default()
        })
        .unwrap();
        assert_relative_eq!(e.autarky_update_wage(e.wstar()), e.wstar(), epsilon = 1e-9);
    }

    #[test]
    fn test_set_productivity_rejects_boundary() {
        let mut e = KsvEconomy::new(KsvParams::default()).unwrap();
        e.set_productivity(3.0).unwrap();
        assert_relative_eq!(e.big_r(), 2.4, epsilon = 1e-12);

        assert!(e.set_productivity(5.0).is_err());
        assert_eq!(e.productivity(), 3.0);
    }
}
