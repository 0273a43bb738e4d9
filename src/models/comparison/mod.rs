//! Comparison of an externally predicted call price against the Black-Scholes reference.
//!
//! The percent difference is measured relative to the reference price:
//!
//! ```text
//! diff% = (predicted − reference) / reference × 100
//! ```
//!
//! A zero reference leaves the ratio undefined and is reported as
//! [`PercentDifference::DivisionUndefined`] instead of `NaN`/`inf`.

use crate::pricing::types::{ComparisonResult, Moneyness, PercentDifference, PriceReport};

/// Stateless evaluator combining a reference price with a predicted one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEvaluator;

impl ComparisonEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compares `predicted_price` with `reference_price` and classifies the contract.
    pub fn compare(
        &self,
        reference_price: f64,
        predicted_price: f64,
        spot: f64,
        strike: f64,
    ) -> ComparisonResult {
        let percent_difference = percent_difference(reference_price, predicted_price);
        if percent_difference.is_undefined() {
            tracing::warn!(
                reference_price,
                predicted_price,
                "percent difference undefined"
            );
        }

        ComparisonResult {
            reference_price,
            predicted_price,
            percent_difference,
            moneyness: Moneyness::classify(spot, strike),
        }
    }

    /// Same as [`compare`](Self::compare), taking the reference from an engine report.
    pub fn compare_report(
        &self,
        report: &PriceReport,
        predicted_price: f64,
        spot: f64,
        strike: f64,
    ) -> ComparisonResult {
        self.compare(report.reference_price, predicted_price, spot, strike)
    }
}

/// Signed percent deviation of `predicted` from `reference`.
///
/// Undefined when the reference is zero or either price is non-finite.
pub fn percent_difference(reference: f64, predicted: f64) -> PercentDifference {
    if reference == 0.0 || !reference.is_finite() || !predicted.is_finite() {
        return PercentDifference::DivisionUndefined;
    }
    PercentDifference::Defined((predicted - reference) / reference * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_reference_is_undefined() {
        let result = ComparisonEvaluator::new().compare(0.0, 1.5, 100.0, 120.0);
        assert_eq!(result.percent_difference, PercentDifference::DivisionUndefined);
        assert_eq!(result.percent_difference.formatted(2), "undefined");
        assert_eq!(result.moneyness, Moneyness::OutOfTheMoney);
    }

    #[test]
    fn test_equal_prices_give_zero() {
        let diff = percent_difference(10.45, 10.45);
        assert_eq!(diff, PercentDifference::Defined(0.0));
        assert_eq!(diff.formatted(2), "0.00");
    }

    #[test]
    fn test_non_finite_prediction_is_undefined() {
        assert!(percent_difference(10.0, f64::NAN).is_undefined());
        assert!(percent_difference(10.0, f64::INFINITY).is_undefined());
    }
}
