
use assert_approx_eq::assert_approx_eq;
use callprice_lib::{
    compare, evaluate_prediction, price, ComparisonEvaluator, EngineConfig, EvaluationError,
    Field, Moneyness, OptionParameters, PercentDifference, PriceReport,
};
use std::cell::Cell;
use test_utils::{benchmark_params, create_test_config, params_with};

fn report_with(reference_price: f64) -> PriceReport {
    PriceReport {
        reference_price,
        d1: 0.0,
        d2: 0.0,
    }
}

/// Prediction above the reference gives a positive deviation: 10.45 → 11.00 is +5.26%.
#[test]
fn test_positive_percent_difference() {
    let result = compare(&report_with(10.45), 11.00, 187.42, 180.0);
    let diff = result.percent_difference.value().expect("defined");
    assert_approx_eq!(diff, 5.26, 5e-3);
    assert_eq!(result.percent_difference.formatted(2), "+5.26");
    assert_eq!(result.reference_price, 10.45);
    assert_eq!(result.predicted_price, 11.00);
}

/// Prediction below the reference gives a negative deviation: 10.45 → 9.00 is -13.88%.
#[test]
fn test_negative_percent_difference() {
    let result = ComparisonEvaluator::new().compare(10.45, 9.00, 187.42, 190.0);
    let diff = result.percent_difference.value().expect("defined");
    assert_approx_eq!(diff, -13.88, 5e-3);
    assert_eq!(result.percent_difference.formatted(2), "-13.88");
    assert_eq!(result.percent_difference.to_string(), "-13.88%");
}

/// A zero reference price is reported as a distinct undefined state, never NaN.
#[test]
fn test_zero_reference_is_division_undefined() {
    let result = compare(&report_with(0.0), 0.01, 10.0, 1000.0);
    assert_eq!(result.percent_difference, PercentDifference::DivisionUndefined);
    assert!(result.percent_difference.value().is_none());
    assert_eq!(result.percent_difference.to_string(), "undefined");
}

/// Strict spot > strike rule: at-the-money is classified out of the money.
#[test]
fn test_moneyness_classification() {
    let evaluator = ComparisonEvaluator::new();
    assert_eq!(
        evaluator.compare(10.0, 10.0, 187.42, 180.0).moneyness,
        Moneyness::InTheMoney
    );
    assert_eq!(
        evaluator.compare(10.0, 10.0, 187.42, 190.0).moneyness,
        Moneyness::OutOfTheMoney
    );
    assert_eq!(
        evaluator.compare(10.0, 10.0, 187.42, 187.42).moneyness,
        Moneyness::OutOfTheMoney
    );
    assert_eq!(Moneyness::InTheMoney.to_string(), "In The Money");
}

/// Full flow: price, ask the predictor, compare, and attach display metrics.
#[test]
fn test_evaluate_prediction_flow() {
    let params = params_with(187.42, 180.0);
    let model = |p: &OptionParameters| -> anyhow::Result<f64> { Ok(0.1 * p.spot_price) };

    let evaluation = evaluate_prediction(&params, &model, &create_test_config())
        .expect("evaluation should succeed");

    let reference = price(&params).unwrap().reference_price;
    assert_eq!(evaluation.report.reference_price, reference);
    assert_eq!(evaluation.comparison.predicted_price, 0.1 * 187.42);
    assert_eq!(evaluation.comparison.moneyness, Moneyness::InTheMoney);
    let expected = (0.1 * 187.42 - reference) / reference * 100.0;
    assert_approx_eq!(
        evaluation.comparison.percent_difference.value().unwrap(),
        expected,
        1e-9
    );

    assert_approx_eq!(evaluation.metrics.moneyness_ratio, 187.42 / 180.0, 1e-12);
    assert_eq!(evaluation.metrics.days_to_expiry, 365);
    assert_approx_eq!(evaluation.metrics.volatility_percent, 20.0, 1e-12);
}

/// Invalid parameters fail before the predictor is consulted.
#[test]
fn test_predictor_not_called_on_invalid_input() {
    let calls = Cell::new(0);
    let model = |_: &OptionParameters| -> anyhow::Result<f64> {
        calls.set(calls.get() + 1);
        Ok(1.0)
    };
    let params = OptionParameters {
        volatility: 0.0,
        ..benchmark_params()
    };

    let err = evaluate_prediction(&params, &model, &EngineConfig::default()).unwrap_err();
    match err {
        EvaluationError::Validation(v) => assert_eq!(v.fields(), vec![Field::Volatility]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.get(), 0);
}

/// Predictor failures and non-finite predictions surface as distinct errors;
/// a failed predictor stays reachable through `Error::source`.
#[test]
fn test_predictor_failures() {
    let params = benchmark_params();
    let config = EngineConfig::default();

    let failing = |_: &OptionParameters| -> anyhow::Result<f64> {
        Err(anyhow::anyhow!("prediction service unavailable"))
    };
    let err = evaluate_prediction(&params, &failing, &config).unwrap_err();
    assert!(matches!(err, EvaluationError::Predictor(_)));
    assert!(err.to_string().contains("prediction service unavailable"));
    let source = std::error::Error::source(&err).expect("predictor error keeps its cause");
    assert!(source.to_string().contains("prediction service unavailable"));

    let nan = |_: &OptionParameters| -> anyhow::Result<f64> { Ok(f64::NAN) };
    let err = evaluate_prediction(&params, &nan, &config).unwrap_err();
    assert!(matches!(err, EvaluationError::NonFinitePrediction(v) if v.is_nan()));
}
