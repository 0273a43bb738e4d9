use crate::models::vol_surface::ParametricVolSurface;
#[cfg(feature = "serde")]
use anyhow::{Context, Result};
#[cfg(feature = "serde")]
use std::path::Path;

/// Engine-level settings shared by parsing, display metrics and comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Rate substituted for a blank risk-free-rate field (None = field is required)
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_risk_free_rate: Option<f64>,

    /// Day count used for the days-to-expiry metric
    #[cfg_attr(feature = "serde", serde(default = "default_days_per_year"))]
    pub days_per_year: f64,

    /// Decimals used when rendering the percent difference
    #[cfg_attr(feature = "serde", serde(default = "default_percent_decimals"))]
    pub percent_decimals: usize,

    /// Parametric surface used to fill in volatility from spot/strike/maturity
    #[cfg_attr(feature = "serde", serde(default))]
    pub surface: ParametricVolSurface,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_risk_free_rate: None,
            days_per_year: default_days_per_year(),
            percent_decimals: default_percent_decimals(),
            surface: ParametricVolSurface::default(),
        }
    }
}

impl EngineConfig {
    /// Every field must be supplied by the caller.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Dashboard behaviour: a blank rate falls back to 4.33%.
    pub fn dashboard() -> Self {
        Self {
            default_risk_free_rate: Some(0.0433),
            ..Self::default()
        }
    }

    /// Parses a TOML document; absent keys take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("failed to parse engine config")?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in config file {}", path.display()))
    }

    #[cfg(feature = "serde")]
    fn check(&self) -> Result<()> {
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            anyhow::bail!("days_per_year must be > 0, got {}", self.days_per_year);
        }
        if let Some(rate) = self.default_risk_free_rate {
            if !rate.is_finite() {
                anyhow::bail!("default_risk_free_rate must be finite, got {}", rate);
            }
        }
        self.surface.validate()
    }
}

fn default_days_per_year() -> f64 {
    365.0
}

fn default_percent_decimals() -> usize {
    2
}
