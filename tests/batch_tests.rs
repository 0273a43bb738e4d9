
use assert_approx_eq::assert_approx_eq;
use callprice_lib::{
    evaluate_batch, load_requests, read_requests, BatchSummary, Field, Moneyness,
    PercentDifference,
};
use test_utils::{benchmark_params, params_with, request, COMPARISONS_CSV};

/// Loads the fixture and checks every row's outcome and the batch summary.
#[test]
fn test_fixture_batch() {
    let requests = load_requests(COMPARISONS_CSV).expect("Failed to load test data");
    assert_eq!(requests.len(), 6);
    assert_eq!(requests[0].label.as_deref(), Some("AAPL-C180"));
    assert_eq!(requests[5].label, None);

    let outcomes = evaluate_batch(&requests);
    assert_eq!(outcomes.len(), requests.len());

    let itm = outcomes[0].result.as_ref().expect("AAPL-C180 valid");
    assert_eq!(itm.comparison.moneyness, Moneyness::InTheMoney);
    assert_approx_eq!(itm.report.reference_price, 16.2337, 1e-3);

    let otm = outcomes[1].result.as_ref().expect("AAPL-C190 valid");
    assert_eq!(otm.comparison.moneyness, Moneyness::OutOfTheMoney);
    assert!(otm.comparison.percent_difference.value().unwrap() < 0.0);

    let deep = outcomes[3].result.as_ref().expect("DEEP-OTM valid");
    assert_eq!(deep.report.reference_price, 0.0);
    assert_eq!(
        deep.comparison.percent_difference,
        PercentDifference::DivisionUndefined
    );

    let bad = outcomes[4].result.as_ref().expect_err("BAD-T has zero maturity");
    assert_eq!(bad.fields(), vec![Field::TimeToMaturity]);
    assert_eq!(outcomes[4].label.as_deref(), Some("BAD-T"));

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.evaluated, 5);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.undefined, 1);
    assert_approx_eq!(summary.mean_abs_percent_difference.unwrap(), 6.3115, 1e-3);
}

/// In-memory CSV without the optional label column.
#[test]
fn test_read_requests_without_labels() {
    let csv = "spot_price,strike_price,time_to_maturity,volatility,risk_free_rate,predicted_price\n\
               100,100,1,0.2,0.05,11.0\n";
    let requests = read_requests(csv.as_bytes()).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].label, None);
    assert_eq!(requests[0].params(), benchmark_params());
}

/// A malformed row reports its line number.
#[test]
fn test_read_requests_reports_bad_line() {
    let csv = "spot_price,strike_price,time_to_maturity,volatility,risk_free_rate,predicted_price\n\
               100,100,1,0.2,0.05,11.0\n\
               100,abc,1,0.2,0.05,11.0\n";
    let err = read_requests(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");
}

/// Empty batches summarise to zeros with no mean.
#[test]
fn test_empty_batch_summary() {
    let outcomes = evaluate_batch(&[]);
    assert_eq!(BatchSummary::from_outcomes(&outcomes), BatchSummary::default());
}

/// Batch results agree with pricing the rows one at a time.
#[test]
fn test_batch_matches_single_pricing() {
    let requests = vec![
        request("ITM", params_with(120.0, 100.0), 25.0),
        request("OTM", params_with(80.0, 100.0), 1.0),
    ];
    let outcomes = evaluate_batch(&requests);
    for (req, outcome) in requests.iter().zip(&outcomes) {
        let single = callprice_lib::price(&req.params()).unwrap();
        assert_eq!(outcome.result.as_ref().unwrap().report, single);
    }
}
