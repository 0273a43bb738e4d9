use crate::error::{Field, FieldIssue, IssueKind, Result, ValidationError};
use crate::models::utils::moneyness_ratio;
use crate::models::vol_surface::ParametricVolSurface;
use crate::pricing::config::EngineConfig;
use std::fmt;

/// Market inputs for pricing one European call.
///
/// A struct literal is not checked. The engine calls
/// [`OptionParameters::validate`], which requires every field to be finite and
/// `S, K, T, σ > 0`; [`OptionParameters::new`] validates up front.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    /// Current price of the underlying (S)
    pub spot_price: f64,
    /// Exercise price (K)
    pub strike_price: f64,
    /// Years until expiry (T)
    pub time_to_maturity: f64,
    /// Annualised volatility of log returns (σ, as decimal)
    pub volatility: f64,
    /// Continuously-compounded annual rate (r), any sign
    pub risk_free_rate: f64,
}

impl OptionParameters {
    /// Creates validated parameters.
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> Result<Self> {
        let params = Self {
            spot_price,
            strike_price,
            time_to_maturity,
            volatility,
            risk_free_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates validated parameters whose volatility is read off a parametric surface.
    pub fn from_surface(
        spot_price: f64,
        strike_price: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        surface: &ParametricVolSurface,
    ) -> Result<Self> {
        let volatility = surface.volatility(spot_price, strike_price, time_to_maturity);
        Self::new(
            spot_price,
            strike_price,
            time_to_maturity,
            volatility,
            risk_free_rate,
        )
    }

    /// Field/value pairs in form order.
    pub fn values(&self) -> [(Field, f64); 5] {
        [
            (Field::SpotPrice, self.spot_price),
            (Field::StrikePrice, self.strike_price),
            (Field::TimeToMaturity, self.time_to_maturity),
            (Field::Volatility, self.volatility),
            (Field::RiskFreeRate, self.risk_free_rate),
        ]
    }

    /// Checks every field and reports all violations at once.
    pub fn validate(&self) -> Result<()> {
        let issues = self
            .values()
            .into_iter()
            .filter_map(|(field, value)| {
                check_domain(field, value)
                    .err()
                    .map(|kind| FieldIssue::new(field, kind))
            })
            .collect();

        match ValidationError::from_issues(issues) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn check_domain(field: Field, value: f64) -> std::result::Result<f64, IssueKind> {
    if !value.is_finite() {
        return Err(IssueKind::NotFinite(value));
    }
    if field.requires_positive() && value <= 0.0 {
        return Err(IssueKind::NotPositive(value));
    }
    Ok(value)
}

fn parse_field(field: Field, raw: Option<&str>) -> std::result::Result<f64, IssueKind> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Err(IssueKind::Missing),
        Some(text) => text,
    };
    let value: f64 = text
        .parse()
        .map_err(|_| IssueKind::NotNumeric(text.to_string()))?;
    check_domain(field, value)
}

/// The five inputs as entered in a form, before parsing.
///
/// Blank strings count as missing. Parsing is strict: trailing garbage such as
/// `"12abc"` is rejected rather than truncated.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawOptionInputs {
    pub spot_price: Option<String>,
    pub strike_price: Option<String>,
    pub time_to_maturity: Option<String>,
    pub volatility: Option<String>,
    pub risk_free_rate: Option<String>,
}

impl RawOptionInputs {
    /// Fills a blank risk-free rate with the configured default, if any.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        let blank = self
            .risk_free_rate
            .as_deref()
            .map_or(true, |s| s.trim().is_empty());
        if blank {
            if let Some(rate) = config.default_risk_free_rate {
                self.risk_free_rate = Some(rate.to_string());
            }
        }
        self
    }

    fn raw(&self, field: Field) -> Option<&str> {
        match field {
            Field::SpotPrice => self.spot_price.as_deref(),
            Field::StrikePrice => self.strike_price.as_deref(),
            Field::TimeToMaturity => self.time_to_maturity.as_deref(),
            Field::Volatility => self.volatility.as_deref(),
            Field::RiskFreeRate => self.risk_free_rate.as_deref(),
        }
    }

    /// Parses and validates all five fields, collecting every problem.
    pub fn parse(&self) -> Result<OptionParameters> {
        let mut values = [0.0; 5];
        let mut issues = Vec::new();

        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            match parse_field(field, self.raw(field)) {
                Ok(v) => *slot = v,
                Err(kind) => issues.push(FieldIssue::new(field, kind)),
            }
        }

        if let Some(err) = ValidationError::from_issues(issues) {
            return Err(err);
        }

        let [spot_price, strike_price, time_to_maturity, volatility, risk_free_rate] = values;
        Ok(OptionParameters {
            spot_price,
            strike_price,
            time_to_maturity,
            volatility,
            risk_free_rate,
        })
    }
}

/// Black-Scholes call value with its standardized intermediates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceReport {
    /// Theoretical call price (non-negative)
    pub reference_price: f64,
    pub d1: f64,
    pub d2: f64,
}

/// Spot relative to strike for a call, ignoring time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Moneyness {
    InTheMoney,
    OutOfTheMoney,
}

impl Moneyness {
    /// `InTheMoney` only when `spot > strike`; at-the-money is out of the money.
    pub fn classify(spot: f64, strike: f64) -> Self {
        if spot > strike {
            Moneyness::InTheMoney
        } else {
            Moneyness::OutOfTheMoney
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Moneyness::InTheMoney => "In The Money",
            Moneyness::OutOfTheMoney => "Out of The Money",
        }
    }
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Signed deviation of the predicted price from the reference, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", content = "value", rename_all = "snake_case"))]
pub enum PercentDifference {
    Defined(f64),
    /// The reference price is zero (or an input was non-finite), so there is
    /// nothing to divide by.
    DivisionUndefined,
}

impl PercentDifference {
    pub fn value(self) -> Option<f64> {
        match self {
            PercentDifference::Defined(v) => Some(v),
            PercentDifference::DivisionUndefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, PercentDifference::DivisionUndefined)
    }

    /// Fixed-decimal rendering with an explicit `+` on positive values,
    /// e.g. `"+5.26"`, `"-13.88"`, `"0.00"`, or `"undefined"`.
    pub fn formatted(self, decimals: usize) -> String {
        match self {
            PercentDifference::Defined(v) if v > 0.0 => format!("+{:.*}", decimals, v),
            PercentDifference::Defined(v) => format!("{:.*}", decimals, v),
            PercentDifference::DivisionUndefined => "undefined".to_string(),
        }
    }
}

impl fmt::Display for PercentDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentDifference::Defined(_) => write!(f, "{}%", self.formatted(2)),
            PercentDifference::DivisionUndefined => f.write_str("undefined"),
        }
    }
}

/// Outcome of comparing an external prediction with the reference price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub reference_price: f64,
    pub predicted_price: f64,
    pub percent_difference: PercentDifference,
    pub moneyness: Moneyness,
}

/// Presentational figures shown next to a priced contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionMetrics {
    /// S / K
    pub moneyness_ratio: f64,
    /// Calendar days to expiry, `round(T * days_per_year)`
    pub days_to_expiry: i64,
    /// Volatility in percent (0.2 -> 20.0)
    pub volatility_percent: f64,
}

impl OptionMetrics {
    pub fn from_params(params: &OptionParameters, days_per_year: f64) -> Self {
        Self {
            moneyness_ratio: moneyness_ratio(params.spot_price, params.strike_price),
            days_to_expiry: (params.time_to_maturity * days_per_year).round() as i64,
            volatility_percent: params.volatility * 100.0,
        }
    }
}
