// Black-Scholes reference pricing for European calls. Only what the call
// price needs is exposed (d1, d2); Greeks and puts are out of scope.

use crate::error::{Field, FieldIssue, IssueKind, Result, ValidationError};
use crate::models::utils::{log_moneyness, normal_cdf};
use crate::pricing::types::{OptionParameters, PriceReport};

/// Standardized Black-Scholes intermediates `(d1, d2)`.
///
/// Assumes `sigma > 0` and `t > 0`; callers validate first.
#[allow(non_snake_case)]
pub fn d1_d2(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * T.sqrt();
    let d1 = (log_moneyness(S, K) + (r + sigma * sigma / 2.0) * T) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price of a European call option under Black-Scholes assumptions (no dividends).
///
/// Assumes `sigma > 0` and `t > 0`; use [`PricingEngine::price`] for validated input.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    call_from_d(S, K, r, T, d1, d2)
}

// The CDF approximation can leave a deep out-of-the-money value a hair below zero.
// Only a finite negative residue is clamped; NaN and infinities pass through.
#[allow(non_snake_case)]
fn call_from_d(S: f64, K: f64, r: f64, T: f64, d1: f64, d2: f64) -> f64 {
    let nd2 = normal_cdf(d2);
    // Φ(d2) == 0 must not meet an overflowed discount factor as 0 * inf.
    let discounted_strike = if nd2 == 0.0 {
        0.0
    } else {
        K * (-r * T).exp() * nd2
    };
    let price = S * normal_cdf(d1) - discounted_strike;
    if price < 0.0 && price.is_finite() {
        0.0
    } else {
        price
    }
}

fn out_of_range(params: &OptionParameters, fields: &[Field]) -> ValidationError {
    let issues = params
        .values()
        .into_iter()
        .filter(|(field, _)| fields.contains(field))
        .map(|(field, value)| FieldIssue::new(field, IssueKind::OutOfRange(value)))
        .collect();
    ValidationError::new(issues)
}

/// Stateless Black-Scholes call pricer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validates `params` and returns the call value with `d1`/`d2`.
    ///
    /// # Errors
    ///
    /// [`ValidationError`](crate::ValidationError) listing every field that is
    /// non-finite or, for S, K, T and σ, not strictly positive. Inputs that are
    /// valid one by one but overflow `σ√T`, `d1`/`d2` or the price itself are
    /// reported as [`IssueKind::OutOfRange`] on the fields driving the overflow.
    pub fn price(&self, params: &OptionParameters) -> Result<PriceReport> {
        params.validate()?;

        let OptionParameters {
            spot_price: s,
            strike_price: k,
            time_to_maturity: t,
            volatility: sigma,
            risk_free_rate: r,
        } = *params;

        if !(sigma * t.sqrt()).is_finite() {
            return Err(out_of_range(params, &[Field::TimeToMaturity, Field::Volatility]));
        }

        let (d1, d2) = d1_d2(s, k, r, t, sigma);
        if !d1.is_finite() || !d2.is_finite() {
            let fields: &[Field] = if log_moneyness(s, k).is_finite() {
                &[Field::TimeToMaturity, Field::Volatility, Field::RiskFreeRate]
            } else {
                &[Field::SpotPrice, Field::StrikePrice]
            };
            return Err(out_of_range(params, fields));
        }

        let price = call_from_d(s, k, r, t, d1, d2);
        if !price.is_finite() {
            return Err(out_of_range(params, &[Field::TimeToMaturity, Field::RiskFreeRate]));
        }

        tracing::debug!(
            spot = s,
            strike = k,
            maturity = t,
            volatility = sigma,
            rate = r,
            d1,
            d2,
            price,
            "priced european call"
        );

        Ok(PriceReport {
            reference_price: price,
            d1,
            d2,
        })
    }
}
