use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MetricUnit;

/// A measurable quantity reported by the results datastore, shared by every
/// hazard of a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Metric {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub unit: MetricUnit,
    pub baseline_value: Option<f64>,
    pub final_value: Option<f64>,
}

impl Metric {
    /// Change from the baseline value to the final value.
    ///
    /// `Some(0.0)` while no final value exists; `None` when a final value
    /// exists without a baseline to compare against.
    #[must_use]
    pub fn delta(&self) -> Option<f64> {
        match (self.baseline_value, self.final_value) {
            (_, None) => Some(0.0),
            (Some(baseline), Some(final_value)) => Some(final_value - baseline),
            (None, Some(_)) => None,
        }
    }
}
