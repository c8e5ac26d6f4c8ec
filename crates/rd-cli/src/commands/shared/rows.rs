//! Flat response rows shared by several commands.

use rd_core::entities::{GoalView, Hazard, ParameterMap, Project, RelationshipView, SpineObject};
use rd_core::enums::{HazardImpact, HazardLikelihood, RiskLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HazardRow {
    pub name: String,
    pub impact: HazardImpact,
    pub likelihood: HazardLikelihood,
    pub risk: RiskLevel,
}

impl From<&Hazard> for HazardRow {
    fn from(hazard: &Hazard) -> Self {
        Self {
            name: hazard.name.clone(),
            impact: hazard.impact,
            likelihood: hazard.likelihood,
            risk: hazard.risk_level(),
        }
    }
}

/// A goal with inherited values resolved and its metric's values.
#[derive(Debug, Serialize)]
pub struct GoalRow {
    pub hazard: String,
    pub risk: RiskLevel,
    pub metric: String,
    pub unit: String,
    pub comparison: String,
    pub target: Option<f64>,
    /// Comparison or target comes from the Base hazard.
    pub inherited: bool,
    pub baseline: Option<f64>,
    #[serde(rename = "final")]
    pub final_value: Option<f64>,
    pub delta: Option<f64>,
    pub met: Option<bool>,
}

impl GoalRow {
    #[must_use]
    pub fn new(view: &GoalView<'_>) -> Self {
        let goal = view.goal();
        let metric = view.metric();
        Self {
            hazard: view.hazard().name.clone(),
            risk: view.hazard().risk_level(),
            metric: metric.map_or_else(|| goal.metric_id.clone(), |m| m.name.clone()),
            unit: metric.map_or_else(String::new, |m| m.unit.label().to_string()),
            comparison: view.comparison().symbol().to_string(),
            target: view.target_value(),
            inherited: goal.comparison.is_none() || goal.target_value.is_none(),
            baseline: metric.and_then(|m| m.baseline_value),
            final_value: metric.and_then(|m| m.final_value),
            delta: metric.and_then(rd_core::entities::Metric::delta),
            met: view.is_met(),
        }
    }
}

/// Goal rows of the user-facing hazards, highest risk first, optionally
/// preceded by the Base hazard's goals.
#[must_use]
pub fn goal_rows(project: &Project, include_base: bool) -> Vec<GoalRow> {
    let base = project.base_hazard().filter(|_| include_base);
    base.into_iter()
        .chain(project.hazards_by_risk())
        .flat_map(|hazard| project.goals(hazard))
        .map(|view| GoalRow::new(&view))
        .collect()
}

/// `name=value` pairs; unset parameters show as `name=-`.
#[must_use]
pub fn parameter_list(parameters: &ParameterMap) -> String {
    parameters
        .iter()
        .map(|(name, value)| match value {
            Some(value) => format!("{name}={}", value.value),
            None => format!("{name}=-"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Serialize)]
pub struct ObjectRow {
    pub id: i64,
    pub class: String,
    pub name: String,
    pub parameters: String,
}

impl From<&SpineObject> for ObjectRow {
    fn from(object: &SpineObject) -> Self {
        Self {
            id: object.id,
            class: object.class_name.clone(),
            name: object.name.clone(),
            parameters: parameter_list(&object.parameters),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RelationshipRow {
    pub id: i64,
    pub class: String,
    pub members: String,
    pub parameters: String,
}

impl From<&RelationshipView> for RelationshipRow {
    fn from(relationship: &RelationshipView) -> Self {
        Self {
            id: relationship.id,
            class: relationship.class_name.clone(),
            members: relationship
                .members
                .iter()
                .map(|member| member.name.as_str())
                .collect::<Vec<_>>()
                .join(" -> "),
            parameters: parameter_list(&relationship.parameters),
        }
    }
}

#[cfg(test)]
mod tests {
    use rd_core::entities::ParameterValue;

    use super::parameter_list;

    #[test]
    fn parameter_list_marks_unset_values() {
        let mut parameters = rd_core::entities::ParameterMap::new();
        parameters.insert("unit_capacity".to_string(), Some(ParameterValue::new(4, "250")));
        parameters.insert("fom_cost".to_string(), None);
        assert_eq!(parameter_list(&parameters), "fom_cost=-, unit_capacity=250");
    }
}
