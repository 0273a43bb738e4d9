use crate::error::ValidationError;
use crate::models::bs::PricingEngine;
use crate::models::comparison::ComparisonEvaluator;
use crate::pricing::types::{ComparisonResult, OptionParameters, PriceReport};
#[cfg(feature = "serde")]
use anyhow::{Context, Result};
#[cfg(feature = "serde")]
use std::path::Path;

/// One contract to price together with the prediction it should be checked against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRequest {
    /// Free-form identifier (ticker or option symbol)
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    pub spot_price: f64,
    pub strike_price: f64,
    pub time_to_maturity: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
    /// Externally predicted call price
    pub predicted_price: f64,
}

impl ComparisonRequest {
    pub fn params(&self) -> OptionParameters {
        OptionParameters {
            spot_price: self.spot_price,
            strike_price: self.strike_price,
            time_to_maturity: self.time_to_maturity,
            volatility: self.volatility,
            risk_free_rate: self.risk_free_rate,
        }
    }
}

/// Reference price and comparison for one accepted request.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEvaluation {
    pub report: PriceReport,
    pub comparison: ComparisonResult,
}

/// Per-row outcome; a rejected row never aborts the rest of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub label: Option<String>,
    pub result: std::result::Result<RowEvaluation, ValidationError>,
}

/// Aggregate figures over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchSummary {
    /// Rows priced and compared
    pub evaluated: usize,
    /// Rows that failed validation
    pub rejected: usize,
    /// Evaluated rows whose percent difference is undefined
    pub undefined: usize,
    /// Mean of |percent difference| over rows where it is defined
    pub mean_abs_percent_difference: Option<f64>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let mut summary = Self::default();
        let mut abs_sum = 0.0;
        let mut defined = 0usize;

        for outcome in outcomes {
            match &outcome.result {
                Ok(row) => {
                    summary.evaluated += 1;
                    match row.comparison.percent_difference.value() {
                        Some(v) => {
                            abs_sum += v.abs();
                            defined += 1;
                        }
                        None => summary.undefined += 1,
                    }
                }
                Err(_) => summary.rejected += 1,
            }
        }

        if defined > 0 {
            summary.mean_abs_percent_difference = Some(abs_sum / defined as f64);
        }
        summary
    }
}

/// Prices and compares every request, preserving input order.
pub fn evaluate_batch(requests: &[ComparisonRequest]) -> Vec<BatchOutcome> {
    let engine = PricingEngine::new();
    let evaluator = ComparisonEvaluator::new();

    requests
        .iter()
        .map(|req| {
            let params = req.params();
            let result = engine.price(&params).map(|report| RowEvaluation {
                comparison: evaluator.compare_report(
                    &report,
                    req.predicted_price,
                    params.spot_price,
                    params.strike_price,
                ),
                report,
            });
            if let Err(err) = &result {
                tracing::warn!(label = ?req.label, %err, "skipping invalid request");
            }
            BatchOutcome {
                label: req.label.clone(),
                result,
            }
        })
        .collect()
}

/// Reads comparison requests from CSV with a header row.
///
/// Expected columns: `label` (optional), `spot_price`, `strike_price`,
/// `time_to_maturity`, `volatility`, `risk_free_rate`, `predicted_price`.
#[cfg(feature = "serde")]
pub fn read_requests<R: std::io::Read>(reader: R) -> Result<Vec<ComparisonRequest>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut requests = Vec::new();

    for (i, record) in csv_reader.deserialize().enumerate() {
        // +2: header line plus 1-based numbering
        let request: ComparisonRequest =
            record.with_context(|| format!("invalid comparison request on line {}", i + 2))?;
        requests.push(request);
    }

    Ok(requests)
}

/// Loads comparison requests from a CSV file.
#[cfg(feature = "serde")]
pub fn load_requests(path: impl AsRef<Path>) -> Result<Vec<ComparisonRequest>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open request file {}", path.display()))?;
    read_requests(file)
}
