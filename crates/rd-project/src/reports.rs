//! Structured results of coordinator operations, rendered by the CLI.

use serde::Serialize;

use crate::engine::EngineOutcome;

/// Why a results relationship was not applied to a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than two members (scenario and metric).
    MissingMembers { count: usize },
    UnknownHazard { name: String },
    UnknownMetric { hazard: String, name: String },
    MissingValue,
    NotNumeric { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedResult {
    pub relationship_id: i64,
    pub relationship: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of loading metric values from the results datastore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsReport {
    pub baseline: bool,
    pub applied: usize,
    pub skipped: Vec<SkippedResult>,
}

/// Outcome of a system import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub baseline: bool,
    pub engine: Vec<EngineOutcome>,
    /// Hazards created from the scenarios; zero for a proposed-system import.
    pub hazards: usize,
    pub metrics: usize,
    pub results: Option<ResultsReport>,
}

/// Outcome of an optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub engine: EngineOutcome,
    pub results: ResultsReport,
}

/// A batch item that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub item: String,
    pub message: String,
}

/// Aggregate outcome of a batch of independent edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub applied: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn record_applied(&mut self) {
        self.applied += 1;
    }

    pub fn record_failure(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.failures.push(BatchFailure {
            item: item.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.applied += other.applied;
        self.failures.extend(other.failures);
    }
}
