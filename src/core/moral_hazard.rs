use crate::core::economy::Economy;
use crate::core::error::{open_interval, positive, same, ParameterError};
use serde::{Deserialize, Serialize};

/// Structural parameters of the moral-hazard calibration.
///
/// # Examples
///
/// ```
/// use ksv_econ::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
///
/// let params = MoralHazardParams { gamma: 0.4, alpha: 0.55, z: 10.0, p: 0.25 };
/// let economy = MoralHazardEconomy::new(params).unwrap();
/// assert!(economy.lambda() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoralHazardParams {
    /// Private-benefit exponent driving the friction multiplier.
    pub gamma: f64,
    /// Capital share.
    pub alpha: f64,
    /// Productivity scale.
    pub z: f64,
    /// Project success probability.
    pub p: f64,
}

impl Default for MoralHazardParams {
    fn default() -> Self {
        Self {
            gamma: 0.5,
            alpha: 0.66,
            z: 20.0,
            p: 0.2,
        }
    }
}

impl MoralHazardParams {
    /// Range checks plus the equity condition `z p < (1 - alpha)^(-1/alpha)`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        open_interval("gamma", self.gamma, 0.0, 1.0, "in (0, 1)")?;
        open_interval("alpha", self.alpha, 0.0, 1.0, "in (0, 1)")?;
        positive("z", self.z)?;
        open_interval("p", self.p, 0.0, 1.0, "in (0, 1)")?;

        let bound = (1.0 - self.alpha).powf(-1.0 / self.alpha);
        if self.z * self.p < bound {
            Ok(())
        } else {
            Err(ParameterError::EquityCondition {
                wbar: (1.0 - self.alpha) * (self.z * self.p).powf(self.alpha),
            })
        }
    }
}

/// Economy where entrepreneurs can divert funds, so lenders require a
/// stake that rises with the wage.
///
/// Derived constants are recomputed on every change of `z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoralHazardParams", into = "MoralHazardParams")]
pub struct MoralHazardEconomy {
    params: MoralHazardParams,
    lambda: f64,
    wbar: f64,
    wstar: f64,
}

impl MoralHazardEconomy {
    pub fn new(params: MoralHazardParams) -> Result<Self, ParameterError> {
        params.validate()?;
        let lambda = params.p.powf((params.gamma - 1.0) / params.gamma) - 1.0;
        let wbar = (1.0 - params.alpha) * (params.z * params.p).powf(params.alpha);
        let wstar = wbar.powf(1.0 / (1.0 - params.alpha));
        Ok(Self {
            params,
            lambda,
            wbar,
            wstar,
        })
    }

    pub fn params(&self) -> &MoralHazardParams {
        &self.params
    }

    /// Friction multiplier on the wage in the lending constraint.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Marginal product term `alpha (z p)^alpha` shared by several formulas.
    fn marginal_product(&self) -> f64 {
        let MoralHazardParams { alpha, z, p, .. } = self.params;
        alpha * (z * p).powf(alpha)
    }
}

impl TryFrom<MoralHazardParams> for MoralHazardEconomy {
    type Error = ParameterError;

    fn try_from(params: MoralHazardParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<MoralHazardEconomy> for MoralHazardParams {
    fn from(economy: MoralHazardEconomy) -> Self {
        economy.params
    }
}

impl Economy for MoralHazardEconomy {
    fn alpha(&self) -> f64 {
        self.params.alpha
    }

    fn productivity(&self) -> f64 {
        self.params.z
    }

    fn output_scale(&self) -> f64 {
        self.params.z * self.params.p
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
        let unconstrained = self.marginal_product() / (r * (1.0 + self.lambda * w));
        unconstrained.powf(1.0 / (1.0 - self.params.alpha)).min(1.0)
    }

    fn saturation_rate(&self, w: f64) -> f64 {
        self.marginal_product() / (1.0 + self.lambda * w)
    }

    fn update_wage_from_phi(&self, phi: f64) -> f64 {
        let MoralHazardParams { alpha, z, p, .. } = self.params;
        (1.0 - alpha) * (p * z * phi).powf(alpha)
    }

    fn autarky_r(&self, w: f64) -> f64 {
        let alpha = self.params.alpha;
        self.marginal_product() / (w.powf(1.0 - alpha) * (1.0 + self.lambda * w))
    }

    fn compatibility(&self, other: &Self) -> Result<(), ParameterError> {
        same("alpha", self.params.alpha, other.params.alpha)?;
        same("p", self.params.p, other.params.p)?;
        same("gamma", self.params.gamma, other.params.gamma)?;
        same("lambda", self.lambda, other.lambda)
    }

    fn set_productivity(&mut self, z: f64) -> Result<(), ParameterError> {
        *self = Self::new(MoralHazardParams { z, ..self.params })?;
        Ok(())
    }
}
