//! Error types for callprice-lib.
//!
//! The numeric core never signals a bad input with `NaN`: pricing returns
//! `Result<PriceReport, ValidationError>` and the composed prediction flow
//! returns [`EvaluationError`].

use std::fmt;
use thiserror::Error;

/// Convenience alias for results of the pricing core.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// The five user-supplied pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    SpotPrice,
    StrikePrice,
    TimeToMaturity,
    Volatility,
    RiskFreeRate,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::SpotPrice,
        Field::StrikePrice,
        Field::TimeToMaturity,
        Field::Volatility,
        Field::RiskFreeRate,
    ];

    /// Wire/form name of the field (e.g. `spot_price`).
    pub fn name(self) -> &'static str {
        match self {
            Field::SpotPrice => "spot_price",
            Field::StrikePrice => "strike_price",
            Field::TimeToMaturity => "time_to_maturity",
            Field::Volatility => "volatility",
            Field::RiskFreeRate => "risk_free_rate",
        }
    }

    /// Whether the field must be strictly positive. The rate has no sign constraint.
    pub fn requires_positive(self) -> bool {
        !matches!(self, Field::RiskFreeRate)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// Absent or blank.
    Missing,
    /// Present but not parseable as a number; holds the raw text.
    NotNumeric(String),
    /// NaN or infinite.
    NotFinite(f64),
    /// Zero or negative where a strictly positive value is required.
    NotPositive(f64),
    /// Valid on its own but drives the pricing formula past f64 range.
    OutOfRange(f64),
}

/// A single invalid field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: Field,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: Field, kind: IssueKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "{} is required", self.field),
            IssueKind::NotNumeric(raw) => write!(f, "{} is not a number ({:?})", self.field, raw),
            IssueKind::NotFinite(v) => write!(f, "{} must be finite, got {}", self.field, v),
            IssueKind::NotPositive(v) => write!(f, "{} must be > 0, got {}", self.field, v),
            IssueKind::OutOfRange(v) => {
                write!(f, "{} = {} overflows the pricing formula", self.field, v)
            }
        }
    }
}

/// One or more pricing inputs are missing, non-numeric or outside their domain.
///
/// Always holds at least one issue, in form order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid option parameters: {}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build from collected issues; `None` when there is nothing to report.
    pub fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            return None;
        }
        Some(Self::new(issues))
    }

    // Callers guarantee at least one issue.
    pub(crate) fn new(mut issues: Vec<FieldIssue>) -> Self {
        issues.sort_by_key(|issue| Field::ALL.iter().position(|f| *f == issue.field));
        Self { issues }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields that failed, in form order.
    pub fn fields(&self) -> Vec<Field> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    /// Fields that were absent or blank.
    pub fn missing_fields(&self) -> Vec<Field> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Missing)
            .map(|issue| issue.field)
            .collect()
    }

    pub fn involves(&self, field: Field) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// Failure of the composed price → predict → compare flow.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The external predictor could not produce a price.
    #[error("price predictor failed: {0:#}")]
    Predictor(#[source] anyhow::Error),

    /// The predictor answered with NaN or an infinite value.
    #[error("price predictor returned a non-finite price: {0}")]
    NonFinitePrediction(f64),
}
