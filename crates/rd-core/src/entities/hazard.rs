use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{HazardImpact, HazardLikelihood, RiskLevel};
use crate::{naming, risk};

use super::Goal;

/// A scenario-derived risk condition with one goal per project metric.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Hazard {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub impact: HazardImpact,
    pub likelihood: HazardLikelihood,
    pub goals: Vec<Goal>,
}

impl Hazard {
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        risk::classify(self.impact, self.likelihood)
    }

    /// Whether this is the hazard representing the unmodified system.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.name == naming::BASE_HAZARD_NAME
    }

    /// `Base` and counterfactual `no_*` hazards are not shown to users.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        naming::is_hidden_hazard(&self.name)
    }

    #[must_use]
    pub fn goal_for_metric(&self, metric_id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.metric_id == metric_id)
    }

    pub fn goal_for_metric_mut(&mut self, metric_id: &str) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.metric_id == metric_id)
    }
}
