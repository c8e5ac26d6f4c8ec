//! Goal update builder.
//!
//! Outer `None` leaves a field untouched; `Some(None)` clears it so the goal
//! inherits the value from the `Base` hazard again.

use rd_core::enums::GoalComparison;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Option<GoalComparison>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<Option<f64>>,
}

impl GoalUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.comparison.is_none() && self.target_value.is_none()
    }
}

#[derive(Default)]
pub struct GoalUpdateBuilder(GoalUpdate);

impl GoalUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn comparison(mut self, comparison: Option<GoalComparison>) -> Self {
        self.0.comparison = Some(comparison);
        self
    }

    #[must_use]
    pub fn target_value(mut self, target_value: Option<f64>) -> Self {
        self.0.target_value = Some(target_value);
        self
    }

    #[must_use]
    pub fn build(self) -> GoalUpdate {
        self.0
    }
}
