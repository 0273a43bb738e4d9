// src/models/vol_surface.rs

//! Parametric volatility surface
//!
//! A three-parameter surface quadratic in strike-over-spot moneyness and linear
//! in maturity:
//!
//! σ(m, T) = σ0 + α·T + β·(m − 1)²,   m = K / S
//!
//! It is the feature generator the prediction service applies before calling
//! its model, so a caller can reproduce the volatility input it would have used.

use anyhow::{anyhow, Result};

/// Coefficients of the parametric surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParametricVolSurface {
    /// Base volatility level at m = 1, T = 0
    #[cfg_attr(feature = "serde", serde(default = "default_sigma0"))]
    pub sigma0: f64,
    /// Term slope (volatility added per year of maturity)
    #[cfg_attr(feature = "serde", serde(default = "default_alpha"))]
    pub alpha: f64,
    /// Smile curvature in K/S
    #[cfg_attr(feature = "serde", serde(default = "default_beta"))]
    pub beta: f64,
}

impl Default for ParametricVolSurface {
    fn default() -> Self {
        Self {
            sigma0: default_sigma0(),
            alpha: default_alpha(),
            beta: default_beta(),
        }
    }
}

impl ParametricVolSurface {
    /// Creates a surface, rejecting coefficients that could produce a non-positive volatility.
    pub fn new(sigma0: f64, alpha: f64, beta: f64) -> Result<Self> {
        let surface = Self {
            sigma0,
            alpha,
            beta,
        };
        surface.validate()?;
        Ok(surface)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sigma0.is_finite() || self.sigma0 <= 0.0 {
            return Err(anyhow!(
                "surface sigma0 (sigma0={}) must be > 0 and finite",
                self.sigma0
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(anyhow!(
                "surface alpha (alpha={}) must be >= 0 and finite",
                self.alpha
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(anyhow!(
                "surface beta (beta={}) must be >= 0 and finite",
                self.beta
            ));
        }
        Ok(())
    }

    /// Volatility at strike-over-spot moneyness `m` and maturity `t`.
    pub fn volatility_at(&self, m: f64, t: f64) -> f64 {
        self.sigma0 + t * self.alpha + self.beta * (m - 1.0).powi(2)
    }

    /// Volatility for a contract, with `m = strike / spot`.
    pub fn volatility(&self, spot: f64, strike: f64, t: f64) -> f64 {
        self.volatility_at(strike / spot, t)
    }
}

fn default_sigma0() -> f64 {
    0.2
}

fn default_alpha() -> f64 {
    0.1
}

fn default_beta() -> f64 {
    0.1
}
