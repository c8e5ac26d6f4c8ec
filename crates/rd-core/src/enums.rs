//! Classification enums for hazards, goals, metrics and datastores.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage. `FromStr` accepts the stored form plus
//! the aliases users type on the command line.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// GoalComparison
// ---------------------------------------------------------------------------

/// How a metric's final value is compared against a goal's target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GoalComparison {
    Lt,
    Lte,
    Eq,
    Gte,
    Gt,
}

impl GoalComparison {
    pub const ALL: [Self; 5] = [Self::Lt, Self::Lte, Self::Eq, Self::Gte, Self::Gt];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Eq => "eq",
            Self::Gte => "gte",
            Self::Gt => "gt",
        }
    }

    /// Mathematical symbol shown to users.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Lte => "≤",
            Self::Eq => "=",
            Self::Gte => "≥",
            Self::Gt => ">",
        }
    }

    /// Evaluate `value <op> target`.
    #[must_use]
    #[allow(
        clippy::float_cmp,
        reason = "goal targets are matched exactly, as entered"
    )]
    pub fn compare(self, value: f64, target: f64) -> bool {
        match self {
            Self::Lt => value < target,
            Self::Lte => value <= target,
            Self::Eq => value == target,
            Self::Gte => value >= target,
            Self::Gt => value > target,
        }
    }
}

impl fmt::Display for GoalComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for GoalComparison {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" | "lt" | "&lt;" => Ok(Self::Lt),
            "<=" | "≤" | "le" | "lte" | "&le;" => Ok(Self::Lte),
            "=" | "==" | "eq" => Ok(Self::Eq),
            ">=" | "≥" | "ge" | "gte" | "&ge;" => Ok(Self::Gte),
            ">" | "gt" | "&gt;" => Ok(Self::Gt),
            other => Err(CoreError::invalid("comparison", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// MetricUnit
// ---------------------------------------------------------------------------

/// Unit attached to a metric.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    #[default]
    None,
    Kw,
    Kwh,
}

impl MetricUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Kw => "kw",
            Self::Kwh => "kwh",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "N/A",
            Self::Kw => "kW",
            Self::Kwh => "kWh",
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetricUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "n/a" | "" => Ok(Self::None),
            "kw" => Ok(Self::Kw),
            "kwh" => Ok(Self::Kwh),
            _ => Err(CoreError::invalid("unit", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// HazardImpact
// ---------------------------------------------------------------------------

/// Severity of a hazard's consequences.
///
/// ```text
/// unknown < acceptable < tolerable < unacceptable < intolerable
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardImpact {
    #[default]
    Unknown,
    Acceptable,
    Tolerable,
    Unacceptable,
    Intolerable,
}

impl HazardImpact {
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::Acceptable,
        Self::Tolerable,
        Self::Unacceptable,
        Self::Intolerable,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Acceptable => "acceptable",
            Self::Tolerable => "tolerable",
            Self::Unacceptable => "unacceptable",
            Self::Intolerable => "intolerable",
        }
    }
}

impl fmt::Display for HazardImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardImpact {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|impact| impact.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::invalid("impact", s))
    }
}

// ---------------------------------------------------------------------------
// HazardLikelihood
// ---------------------------------------------------------------------------

/// How likely a hazard is to occur.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardLikelihood {
    #[default]
    Unknown,
    Improbable,
    Possible,
    Probable,
}

impl HazardLikelihood {
    pub const ALL: [Self; 4] = [
        Self::Unknown,
        Self::Improbable,
        Self::Possible,
        Self::Probable,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Improbable => "improbable",
            Self::Possible => "possible",
            Self::Probable => "probable",
        }
    }
}

impl fmt::Display for HazardLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardLikelihood {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|likelihood| likelihood.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::invalid("likelihood", s))
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Risk level derived from impact and likelihood. Ordered low to critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DatastoreKind
// ---------------------------------------------------------------------------

/// The snapshot a scenario datastore location represents within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatastoreKind {
    /// The system as currently edited (proposed design).
    Current,
    /// Snapshot of the system taken at baseline import.
    Baseline,
    /// Output of the optimization workflow.
    Results,
}

impl DatastoreKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Baseline => "baseline",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for DatastoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(comparison_lte, GoalComparison, GoalComparison::Lte, "lte");
    test_serde_roundtrip!(unit_kwh, MetricUnit, MetricUnit::Kwh, "kwh");
    test_serde_roundtrip!(
        impact_unacceptable,
        HazardImpact,
        HazardImpact::Unacceptable,
        "unacceptable"
    );
    test_serde_roundtrip!(
        likelihood_improbable,
        HazardLikelihood,
        HazardLikelihood::Improbable,
        "improbable"
    );
    test_serde_roundtrip!(risk_critical, RiskLevel, RiskLevel::Critical, "critical");
    test_serde_roundtrip!(kind_baseline, DatastoreKind, DatastoreKind::Baseline, "baseline");

    #[test]
    fn as_str_matches_serde() {
        for comparison in GoalComparison::ALL {
            let json = serde_json::to_string(&comparison).unwrap();
            assert_eq!(json, format!("\"{}\"", comparison.as_str()));
        }
        for impact in HazardImpact::ALL {
            let json = serde_json::to_string(&impact).unwrap();
            assert_eq!(json, format!("\"{}\"", impact.as_str()));
        }
        for likelihood in HazardLikelihood::ALL {
            let json = serde_json::to_string(&likelihood).unwrap();
            assert_eq!(json, format!("\"{}\"", likelihood.as_str()));
        }
    }

    #[rstest]
    #[case("<", GoalComparison::Lt)]
    #[case("&lt;", GoalComparison::Lt)]
    #[case("<=", GoalComparison::Lte)]
    #[case("≤", GoalComparison::Lte)]
    #[case("&le;", GoalComparison::Lte)]
    #[case("=", GoalComparison::Eq)]
    #[case("eq", GoalComparison::Eq)]
    #[case(">=", GoalComparison::Gte)]
    #[case("&ge;", GoalComparison::Gte)]
    #[case(" > ", GoalComparison::Gt)]
    fn comparison_parses_aliases(#[case] raw: &str, #[case] expected: GoalComparison) {
        assert_eq!(raw.parse::<GoalComparison>().unwrap(), expected);
    }

    #[test]
    fn comparison_rejects_garbage() {
        let err = "~".parse::<GoalComparison>().unwrap_err();
        assert!(err.to_string().contains("comparison"));
    }

    #[rstest]
    #[case(GoalComparison::Lt, 1.0, 2.0, true)]
    #[case(GoalComparison::Lt, 2.0, 2.0, false)]
    #[case(GoalComparison::Lte, 2.0, 2.0, true)]
    #[case(GoalComparison::Eq, 2.0, 2.0, true)]
    #[case(GoalComparison::Eq, 2.5, 2.0, false)]
    #[case(GoalComparison::Eq, 0.1 + 0.2, 0.3, false)]
    #[case(GoalComparison::Gte, 2.0, 2.0, true)]
    #[case(GoalComparison::Gt, 2.0, 2.0, false)]
    #[case(GoalComparison::Gt, 3.0, 2.0, true)]
    fn comparison_compare(
        #[case] comparison: GoalComparison,
        #[case] value: f64,
        #[case] target: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(comparison.compare(value, target), expected);
    }

    #[test]
    fn impact_and_likelihood_parse_case_insensitively() {
        assert_eq!(
            "Intolerable".parse::<HazardImpact>().unwrap(),
            HazardImpact::Intolerable
        );
        assert_eq!(
            "PROBABLE".parse::<HazardLikelihood>().unwrap(),
            HazardLikelihood::Probable
        );
        assert!("catastrophic".parse::<HazardImpact>().is_err());
    }

    #[test]
    fn unit_parses_labels() {
        assert_eq!("kWh".parse::<MetricUnit>().unwrap(), MetricUnit::Kwh);
        assert_eq!("N/A".parse::<MetricUnit>().unwrap(), MetricUnit::None);
        assert!("MW".parse::<MetricUnit>().is_err());
    }

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn defaults_are_unknown() {
        assert_eq!(HazardImpact::default(), HazardImpact::Unknown);
        assert_eq!(HazardLikelihood::default(), HazardLikelihood::Unknown);
        assert_eq!(MetricUnit::default().label(), "N/A");
    }
}
