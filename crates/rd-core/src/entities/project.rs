use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::naming;

use super::{GoalView, Hazard, Metric};

/// Root aggregate: a user's private copy of the template workspace plus the
/// hazards and metrics derived from its datastores.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub directory: PathBuf,
    /// Opaque JSON recorded by the last optimization run.
    pub results: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    /// Ordered by name.
    pub hazards: Vec<Hazard>,
    /// Ordered by name.
    pub metrics: Vec<Metric>,
}

impl Project {
    #[must_use]
    pub fn base_hazard(&self) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.is_base())
    }

    #[must_use]
    pub fn hazard(&self, name: &str) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.name == name)
    }

    pub fn hazard_mut(&mut self, name: &str) -> Option<&mut Hazard> {
        self.hazards.iter_mut().find(|hazard| hazard.name == name)
    }

    #[must_use]
    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.id == id)
    }

    #[must_use]
    pub fn metric_by_name(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.name == name)
    }

    pub fn metric_by_name_mut(&mut self, name: &str) -> Option<&mut Metric> {
        self.metrics.iter_mut().find(|metric| metric.name == name)
    }

    /// User-facing hazards: everything except `Base` and `no_*`.
    #[must_use]
    pub fn get_hazards(&self) -> Vec<&Hazard> {
        self.hazards.iter().filter(|hazard| !hazard.is_hidden()).collect()
    }

    /// User-facing hazards, highest risk first. Ties keep name order.
    #[must_use]
    pub fn hazards_by_risk(&self) -> Vec<&Hazard> {
        let mut hazards = self.get_hazards();
        hazards.sort_by(|a, b| b.risk_level().cmp(&a.risk_level()));
        hazards
    }

    /// Goals of a hazard with inherited values resolved.
    #[must_use]
    pub fn goals<'a>(&'a self, hazard: &'a Hazard) -> Vec<GoalView<'a>> {
        hazard
            .goals
            .iter()
            .map(|goal| GoalView::new(self, hazard, goal))
            .collect()
    }

    /// Locate a goal by hazard name and metric name.
    #[must_use]
    pub fn goal_view(&self, hazard_name: &str, metric_name: &str) -> Option<GoalView<'_>> {
        let hazard = self.hazard(hazard_name)?;
        let metric = self.metric_by_name(metric_name)?;
        let goal = hazard.goal_for_metric(&metric.id)?;
        Some(GoalView::new(self, hazard, goal))
    }

    /// The hazard a results-datastore scenario object reports against.
    #[must_use]
    pub fn result_hazard(&self, scenario_object: &str) -> Option<&Hazard> {
        self.hazard(naming::result_hazard_name(scenario_object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Goal;
    use crate::enums::{GoalComparison, HazardImpact, HazardLikelihood, MetricUnit, RiskLevel};
    use pretty_assertions::assert_eq;

    fn goal(
        hazard: &str,
        metric: &str,
        comparison: Option<GoalComparison>,
        target: Option<f64>,
    ) -> Goal {
        Goal {
            id: format!("gol-{hazard}{metric}"),
            hazard_id: hazard.into(),
            metric_id: metric.into(),
            comparison,
            target_value: target,
        }
    }

    fn hazard(name: &str, goals: Vec<Goal>) -> Hazard {
        Hazard {
            id: name.into(),
            project_id: "prj-00000001".into(),
            name: name.into(),
            impact: HazardImpact::Unknown,
            likelihood: HazardLikelihood::Unknown,
            goals,
        }
    }

    fn project(hazards: Vec<Hazard>) -> Project {
        Project {
            id: "prj-00000001".into(),
            name: "Grid".into(),
            user_id: "default".into(),
            directory: PathBuf::from("/tmp/grid"),
            results: None,
            created_at: Utc::now(),
            hazards,
            metrics: vec![Metric {
                id: "ens".into(),
                project_id: "prj-00000001".into(),
                name: "Energy_Not_Supplied".into(),
                unit: MetricUnit::Kwh,
                baseline_value: Some(10.0),
                final_value: Some(4.0),
            }],
        }
    }

    #[test]
    fn unset_goal_inherits_from_base() {
        let p = project(vec![
            hazard("Base", vec![goal("Base", "ens", Some(GoalComparison::Lte), Some(5.0))]),
            hazard("Hurricane", vec![goal("Hurricane", "ens", None, None)]),
        ]);
        let view = p.goal_view("Hurricane", "Energy_Not_Supplied").unwrap();
        assert_eq!(view.comparison(), GoalComparison::Lte);
        assert_eq!(view.target_value(), Some(5.0));
        assert_eq!(view.is_met(), Some(true));
    }

    #[test]
    fn own_values_win_over_base() {
        let p = project(vec![
            hazard("Base", vec![goal("Base", "ens", Some(GoalComparison::Lte), Some(5.0))]),
            hazard("Hurricane", vec![goal("Hurricane", "ens", Some(GoalComparison::Gt), None)]),
        ]);
        let view = p.goal_view("Hurricane", "Energy_Not_Supplied").unwrap();
        assert_eq!(view.comparison(), GoalComparison::Gt);
        assert_eq!(view.target_value(), Some(5.0));
        assert_eq!(view.is_met(), Some(false));
    }

    #[test]
    fn unset_everywhere_defaults_to_eq() {
        let p = project(vec![
            hazard("Base", vec![goal("Base", "ens", None, None)]),
            hazard("Hurricane", vec![goal("Hurricane", "ens", None, None)]),
        ]);
        let view = p.goal_view("Hurricane", "Energy_Not_Supplied").unwrap();
        assert_eq!(view.comparison(), GoalComparison::Eq);
        assert_eq!(view.target_value(), None);
        assert_eq!(view.is_met(), None);
    }

    #[test]
    fn missing_base_hazard_degrades() {
        let p = project(vec![hazard(
            "Hurricane",
            vec![goal("Hurricane", "ens", None, None)],
        )]);
        let view = p.goal_view("Hurricane", "Energy_Not_Supplied").unwrap();
        assert!(view.base_goal().is_none());
        assert_eq!(view.comparison(), GoalComparison::Eq);
    }

    #[test]
    fn hidden_hazards_are_filtered() {
        let p = project(vec![
            hazard("Base", vec![]),
            hazard("Hurricane", vec![]),
            hazard("no_Hurricane", vec![]),
        ]);
        let names: Vec<_> = p.get_hazards().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Hurricane"]);
    }

    #[test]
    fn hazards_sorted_by_risk_descending() {
        let mut flood = hazard("Flood", vec![]);
        flood.impact = HazardImpact::Intolerable;
        flood.likelihood = HazardLikelihood::Probable;
        let mut heat = hazard("Heatwave", vec![]);
        heat.impact = HazardImpact::Tolerable;
        let quake = hazard("Earthquake", vec![]);
        let p = project(vec![quake, flood, heat]);

        let ordered: Vec<_> = p
            .hazards_by_risk()
            .iter()
            .map(|h| (h.name.as_str(), h.risk_level()))
            .collect();
        assert_eq!(
            ordered,
            vec![
                ("Flood", RiskLevel::Critical),
                ("Heatwave", RiskLevel::Medium),
                ("Earthquake", RiskLevel::Low),
            ]
        );
    }

    #[test]
    fn result_hazard_maps_baseline_scenarios_to_base() {
        let p = project(vec![hazard("Base", vec![]), hazard("Hurricane", vec![])]);
        assert_eq!(p.result_hazard("no_Hurricane_alt").unwrap().name, "Base");
        assert_eq!(p.result_hazard("Hurricane").unwrap().name, "Hurricane");
        assert!(p.result_hazard("Volcano").is_none());
    }
}
