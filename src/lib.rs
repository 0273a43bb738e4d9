//! # Callprice-Lib: Black-Scholes Reference Pricing and Prediction Comparison
//!
//! `callprice-lib` prices European call options with the closed-form Black-Scholes
//! formula and measures how far an externally predicted price (for example from a
//! machine-learning model) deviates from that theoretical reference.
//!
//! ## Core Features
//!
//! - **Reference Pricing**: Black-Scholes call value with `d1`/`d2`, using a fixed
//!   Abramowitz–Stegun approximation of the normal CDF (max error ≈ 1.5e-7)
//! - **Input Validation**: every missing, non-numeric, non-finite or out-of-domain
//!   field is reported in a single typed [`ValidationError`]
//! - **Comparison**: signed percent difference and in/out-of-the-money label
//! - **Batch Evaluation**: price and compare CSV files of contracts
//!
//! ## Quick Start
//!
//! ```rust
//! use callprice_lib::{compare, price, Moneyness, OptionParameters};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.05)?;
//! let report = price(&params)?;
//! assert!((report.reference_price - 10.4506).abs() < 1e-3);
//!
//! let result = compare(&report, 11.0, params.spot_price, params.strike_price);
//! assert_eq!(result.moneyness, Moneyness::OutOfTheMoney);
//! println!("model vs Black-Scholes: {}", result.percent_difference);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Form Input
//!
//! Raw strings (as typed into a form) go through [`RawOptionInputs`], which
//! reports blank fields as missing and rejects anything that is not a number.
//!
//! ## Configuration Presets
//!
//! - `standard()`: every field required
//! - `dashboard()`: a blank risk-free rate defaults to 4.33%

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod pricing;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{EvaluationError, Field, FieldIssue, IssueKind, ValidationError};

// Core value types and configuration
pub use pricing::{
    config::EngineConfig,
    pipeline::{evaluate_batch, BatchOutcome, BatchSummary, ComparisonRequest, RowEvaluation},
    types::{
        ComparisonResult, Moneyness, OptionMetrics, OptionParameters, PercentDifference,
        PriceReport, RawOptionInputs,
    },
};

#[cfg(feature = "serde")]
pub use pricing::pipeline::{load_requests, read_requests};

// Engines, collaborators and the parametric surface
pub use models::{
    bs::{bs_call_price, d1_d2, PricingEngine},
    comparison::{percent_difference, ComparisonEvaluator},
    traits::PricePredictor,
    utils::normal_cdf,
    vol_surface::ParametricVolSurface,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured engine settings.
///
/// - [`standard()`]: strict input, every field required
/// - [`dashboard()`]: mirrors the pricing dashboard, which pre-fills a 4.33% rate
pub mod default_configs {
    use crate::pricing::config::EngineConfig;

    /// Strict configuration: all five fields must be supplied.
    ///
    /// # Example
    ///
    /// ```rust
    /// use callprice_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert!(config.default_risk_free_rate.is_none());
    /// ```
    pub fn standard() -> EngineConfig {
        EngineConfig::standard()
    }

    /// Dashboard configuration: a blank risk-free rate becomes 0.0433.
    ///
    /// # Example
    ///
    /// ```rust
    /// use callprice_lib::{default_configs, RawOptionInputs};
    ///
    /// let inputs = RawOptionInputs {
    ///     spot_price: Some("187.42".into()),
    ///     strike_price: Some("180".into()),
    ///     time_to_maturity: Some("0.5".into()),
    ///     volatility: Some("0.25".into()),
    ///     risk_free_rate: None,
    /// }
    /// .with_config(&default_configs::dashboard());
    /// assert_eq!(inputs.parse()?.risk_free_rate, 0.0433);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn dashboard() -> EngineConfig {
        EngineConfig::dashboard()
    }
}

/// Black-Scholes reference price of a European call.
///
/// # Errors
///
/// [`ValidationError`] when any field is non-finite or when spot, strike,
/// maturity or volatility is not strictly positive. Every offending field is
/// listed.
pub fn price(params: &OptionParameters) -> Result<PriceReport, ValidationError> {
    PricingEngine::new().price(params)
}

/// Compares an externally predicted price with a reference report.
///
/// `percent_difference` is `(predicted − reference) / reference × 100`, or
/// [`PercentDifference::DivisionUndefined`] for a zero reference. The contract
/// is in the money only when `spot > strike`.
pub fn compare(
    report: &PriceReport,
    predicted_price: f64,
    spot: f64,
    strike: f64,
) -> ComparisonResult {
    ComparisonEvaluator::new().compare_report(report, predicted_price, spot, strike)
}

/// Everything produced for one contract by [`evaluate_prediction`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub params: OptionParameters,
    pub report: PriceReport,
    pub comparison: ComparisonResult,
    pub metrics: OptionMetrics,
}

/// Prices a contract, asks `predictor` for its price, and compares the two.
///
/// The predictor is only called once the parameters have passed validation.
///
/// # Example
///
/// ```rust
/// use callprice_lib::{evaluate_prediction, EngineConfig, OptionParameters};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.05)?;
/// let model = |p: &OptionParameters| -> anyhow::Result<f64> { Ok(0.11 * p.spot_price) };
///
/// let evaluation = evaluate_prediction(&params, &model, &EngineConfig::default())?;
/// assert_eq!(evaluation.metrics.days_to_expiry, 365);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn evaluate_prediction<P>(
    params: &OptionParameters,
    predictor: &P,
    config: &EngineConfig,
) -> Result<Evaluation, EvaluationError>
where
    P: PricePredictor + ?Sized,
{
    let report = price(params)?;

    let predicted = predictor
        .predict(params)
        .map_err(EvaluationError::Predictor)?;
    if !predicted.is_finite() {
        return Err(EvaluationError::NonFinitePrediction(predicted));
    }

    let comparison = compare(&report, predicted, params.spot_price, params.strike_price);

    Ok(Evaluation {
        params: *params,
        report,
        comparison,
        metrics: OptionMetrics::from_params(params, config.days_per_year),
    })
}

/// Parses raw form input (applying config defaults) and prices it.
pub fn price_from_inputs(
    inputs: &RawOptionInputs,
    config: &EngineConfig,
) -> Result<(OptionParameters, PriceReport), ValidationError> {
    let params = inputs.clone().with_config(config).parse()?;
    let report = price(&params)?;
    Ok((params, report))
}
