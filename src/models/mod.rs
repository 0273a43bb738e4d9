pub mod bs;
pub mod comparison;
pub mod vol_surface;

/// Common traits at the boundary with external collaborators
pub mod traits {
    use crate::pricing::types::OptionParameters;
    use anyhow::Result;

    /// Source of a model-predicted call price for the same contract.
    ///
    /// Implementations typically wrap a remote model-serving call; the library
    /// only consumes the resolved price.
    pub trait PricePredictor {
        fn predict(&self, params: &OptionParameters) -> Result<f64>;
    }

    impl<F> PricePredictor for F
    where
        F: Fn(&OptionParameters) -> Result<f64>,
    {
        fn predict(&self, params: &OptionParameters) -> Result<f64> {
            self(params)
        }
    }
}

/// Utility functions for option pricing and calculations
pub mod utils {
    /// Spot-over-strike ratio: S/K
    pub fn moneyness_ratio(spot: f64, strike: f64) -> f64 {
        spot / strike
    }

    /// Calculate log-moneyness: ln(S/K)
    pub fn log_moneyness(spot: f64, strike: f64) -> f64 {
        (spot / strike).ln()
    }

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    /// Standard normal cumulative distribution function.
    ///
    /// Abramowitz–Stegun 7.1.26 rational approximation of `erf`, maximum
    /// absolute error about 1.5e-7. Exact at 0 and satisfies
    /// `Φ(x) + Φ(-x) = 1` up to rounding.
    pub fn normal_cdf(x: f64) -> f64 {
        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        0.5 * (1.0 + sign * erf_abs(x.abs() / 2.0_f64.sqrt()))
    }

    /// Error function approximation for `u >= 0`.
    fn erf_abs(u: f64) -> f64 {
        let t = 1.0 / (1.0 + P * u);
        1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-u * u).exp()
    }

}
