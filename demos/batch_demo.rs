// demos/batch_demo.rs

//! Batch comparison of predicted prices against Black-Scholes references
//!
//! Usage: `cargo run --example batch_demo -- [requests.csv]`
//! (defaults to the test fixture `tests/data/comparisons.csv`)

use anyhow::Result;
use callprice_lib::{evaluate_batch, load_requests, BatchSummary};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/data/comparisons.csv".to_string());

    println!("Batch Comparison Demo");
    println!("=====================");

    let requests = load_requests(&path)?;
    println!("Loaded {} requests from {}", requests.len(), path);

    let outcomes = evaluate_batch(&requests);

    println!(
        "\n{:<12} {:>12} {:>12} {:>10} {:<18}",
        "Label", "BS Price", "Predicted", "Diff %", "Moneyness"
    );
    println!("{}", "-".repeat(68));

    for outcome in &outcomes {
        let label = outcome.label.as_deref().unwrap_or("-");
        match &outcome.result {
            Ok(row) => println!(
                "{:<12} {:>12.4} {:>12.4} {:>10} {:<18}",
                label,
                row.report.reference_price,
                row.comparison.predicted_price,
                row.comparison.percent_difference.formatted(2),
                row.comparison.moneyness
            ),
            Err(err) => println!("{:<12} rejected: {}", label, err),
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    println!("\nEvaluated: {}", summary.evaluated);
    println!("Rejected:  {}", summary.rejected);
    println!("Undefined: {}", summary.undefined);
    if let Some(mean) = summary.mean_abs_percent_difference {
        println!("Mean |diff|: {:.2}%", mean);
    }

    Ok(())
}
