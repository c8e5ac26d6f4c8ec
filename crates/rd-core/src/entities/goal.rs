use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::GoalComparison;

use super::{Hazard, Metric, Project};

/// Target for one metric under one hazard.
///
/// Unset fields are inherited at read time through [`GoalView`]; they are
/// stored exactly as the user set them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Goal {
    pub id: String,
    pub hazard_id: String,
    pub metric_id: String,
    pub comparison: Option<GoalComparison>,
    pub target_value: Option<f64>,
}

/// A goal seen in the context of its project, resolving inherited values.
#[derive(Debug, Clone, Copy)]
pub struct GoalView<'a> {
    project: &'a Project,
    hazard: &'a Hazard,
    goal: &'a Goal,
}

impl<'a> GoalView<'a> {
    #[must_use]
    pub const fn new(project: &'a Project, hazard: &'a Hazard, goal: &'a Goal) -> Self {
        Self {
            project,
            hazard,
            goal,
        }
    }

    #[must_use]
    pub const fn goal(&self) -> &'a Goal {
        self.goal
    }

    #[must_use]
    pub const fn hazard(&self) -> &'a Hazard {
        self.hazard
    }

    #[must_use]
    pub fn metric(&self) -> Option<&'a Metric> {
        self.project.metric(&self.goal.metric_id)
    }

    /// The goal for the same metric name on the project's `Base` hazard.
    #[must_use]
    pub fn base_goal(&self) -> Option<&'a Goal> {
        let metric = self.metric()?;
        let Some(base) = self.project.base_hazard() else {
            tracing::warn!(project = %self.project.id, "project has no Base hazard");
            return None;
        };
        let found = base.goals.iter().find(|goal| {
            self.project
                .metric(&goal.metric_id)
                .is_some_and(|m| m.name == metric.name)
        });
        if found.is_none() {
            tracing::warn!(
                project = %self.project.id,
                metric = %metric.name,
                "no Base goal for metric"
            );
        }
        found
    }

    /// Effective comparison: own, else the Base goal's, else `=`.
    #[must_use]
    pub fn comparison(&self) -> GoalComparison {
        self.goal
            .comparison
            .or_else(|| self.base_goal().and_then(|base| base.comparison))
            .unwrap_or(GoalComparison::Eq)
    }

    /// Effective target: own, else the Base goal's, else undefined.
    #[must_use]
    pub fn target_value(&self) -> Option<f64> {
        self.goal
            .target_value
            .or_else(|| self.base_goal().and_then(|base| base.target_value))
    }

    /// Whether the metric's final value meets the effective target.
    /// `None` while either side is missing.
    #[must_use]
    pub fn is_met(&self) -> Option<bool> {
        let target = self.target_value()?;
        let value = self.metric()?.final_value?;
        Some(self.comparison().compare(value, target))
    }
}
