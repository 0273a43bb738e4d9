// demos/pricing_demo.rs

//! Demonstration of Black-Scholes reference pricing and prediction comparison
//!
//! This example shows how to:
//! 1. Parse form-style string inputs with the dashboard defaults
//! 2. Price the call with the Black-Scholes reference engine
//! 3. Fill volatility from the parametric surface
//! 4. Compare an externally predicted price with the reference

use anyhow::Result;
use callprice_lib::{
    default_configs, evaluate_prediction, price_from_inputs, OptionParameters, RawOptionInputs,
};

fn main() -> Result<()> {
    println!("Black-Scholes Reference Pricing Demo");
    println!("====================================");

    let config = default_configs::dashboard();

    // Risk-free rate left blank: the dashboard preset fills in 4.33%
    let inputs = RawOptionInputs {
        spot_price: Some("187.42".into()),
        strike_price: Some("190".into()),
        time_to_maturity: Some("0.25".into()),
        volatility: Some("0.28".into()),
        risk_free_rate: None,
    };

    println!("\nStep 1: Parsing and pricing form input...");
    let (params, report) = price_from_inputs(&inputs, &config)?;
    println!("  Spot:       ${:.2}", params.spot_price);
    println!("  Strike:     ${:.2}", params.strike_price);
    println!("  Maturity:   {:.4} years", params.time_to_maturity);
    println!("  Volatility: {:.2}%", params.volatility * 100.0);
    println!("  Rate:       {:.2}%", params.risk_free_rate * 100.0);
    println!("  d1 = {:.6}, d2 = {:.6}", report.d1, report.d2);
    println!("  Reference price: ${:.4}", report.reference_price);

    println!("\nStep 2: Invalid input is reported field by field...");
    let broken = RawOptionInputs {
        spot_price: Some("187.42".into()),
        strike_price: Some("".into()),
        time_to_maturity: Some("0".into()),
        volatility: Some("abc".into()),
        risk_free_rate: Some("0.0433".into()),
    };
    if let Err(err) = broken.parse() {
        for issue in err.issues() {
            println!("  - {}", issue);
        }
    }

    println!("\nStep 3: Volatility from the parametric surface...");
    let surface_params =
        OptionParameters::from_surface(187.42, 190.0, 0.25, 0.0433, &config.surface)?;
    println!(
        "  Surface volatility at K/S = {:.4}: {:.2}%",
        190.0 / 187.42,
        surface_params.volatility * 100.0
    );

    println!("\nStep 4: Comparing with a model prediction...");
    // Stand-in for the remote model: predicts a price normalised by spot
    let model = |p: &OptionParameters| -> Result<f64> { Ok(0.055 * p.spot_price) };
    let evaluation = evaluate_prediction(&surface_params, &model, &config)?;

    let metrics = &evaluation.metrics;
    let comparison = &evaluation.comparison;
    let difference = comparison.percent_difference.formatted(config.percent_decimals);

    println!("{:<22} {:>12}", "Metric", "Value");
    println!("{}", "-".repeat(36));
    println!("{:<22} {:>12.4}", "Moneyness (S/K)", metrics.moneyness_ratio);
    println!("{:<22} {:>12}", "Days to expiry", metrics.days_to_expiry);
    println!("{:<22} {:>11.2}%", "Volatility", metrics.volatility_percent);
    println!("{:<22} {:>12.4}", "Black-Scholes price", evaluation.report.reference_price);
    println!("{:<22} {:>12.4}", "Predicted price", comparison.predicted_price);
    println!("{:<22} {:>11}%", "Difference", difference);
    println!("{:<22} {:>12}", "Moneyness", comparison.moneyness);

    Ok(())
}
