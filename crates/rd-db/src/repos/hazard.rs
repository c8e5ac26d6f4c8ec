//! Hazard repository: wholesale rebuilds and risk classification.

use std::collections::HashMap;

use rd_core::entities::{Goal, Hazard, Metric};
use rd_core::enums::{HazardImpact, HazardLikelihood, MetricUnit};
use rd_core::ids::{PREFIX_GOAL, PREFIX_HAZARD, PREFIX_METRIC};

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::service::RdService;

const SELECT_COLS: &str = "id, project_id, name, impact, likelihood";

fn row_to_hazard(row: &libsql::Row) -> Result<Hazard, DatabaseError> {
    Ok(Hazard {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        impact: parse_enum(&row.get::<String>(3)?)?,
        likelihood: parse_enum(&row.get::<String>(4)?)?,
        goals: Vec::new(),
    })
}

/// Classification to apply to one hazard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardClassification {
    pub hazard_id: String,
    pub impact: HazardImpact,
    pub likelihood: HazardLikelihood,
}

impl RdService {
    /// Hazards of a project ordered by name, each with its goals.
    pub async fn list_hazards(&self, project_id: &str) -> Result<Vec<Hazard>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM hazards WHERE project_id = ?1 ORDER BY name"),
                [project_id],
            )
            .await?;
        let mut hazards = Vec::new();
        while let Some(row) = rows.next().await? {
            hazards.push(row_to_hazard(&row)?);
        }

        let mut goals_by_hazard: HashMap<String, Vec<Goal>> = HashMap::new();
        for goal in self.list_goals(project_id).await? {
            goals_by_hazard
                .entry(goal.hazard_id.clone())
                .or_default()
                .push(goal);
        }
        for hazard in &mut hazards {
            hazard.goals = goals_by_hazard.remove(&hazard.id).unwrap_or_default();
        }
        Ok(hazards)
    }

    /// Replace every hazard and metric of a project.
    ///
    /// Creates one metric per name and one hazard per name, each hazard with
    /// one unset goal per metric. Prior hazards, goals and metrics are deleted
    /// in the same transaction. Duplicate names are kept once.
    pub async fn rebuild_hazards(
        &self,
        project_id: &str,
        hazard_names: &[String],
        metric_names: &[String],
    ) -> Result<(Vec<Hazard>, Vec<Metric>), DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        tx.execute("DELETE FROM hazards WHERE project_id = ?1", [project_id])
            .await?;
        tx.execute("DELETE FROM metrics WHERE project_id = ?1", [project_id])
            .await?;

        let mut metrics: Vec<Metric> = Vec::new();
        for name in metric_names {
            if metrics.iter().any(|m| &m.name == name) {
                continue;
            }
            let id = self.db().generate_id(PREFIX_METRIC).await?;
            tx.execute(
                "INSERT INTO metrics (id, project_id, name, unit) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    id.as_str(),
                    project_id,
                    name.as_str(),
                    MetricUnit::None.as_str()
                ],
            )
            .await?;
            metrics.push(Metric {
                id,
                project_id: project_id.to_string(),
                name: name.clone(),
                unit: MetricUnit::None,
                baseline_value: None,
                final_value: None,
            });
        }

        let mut hazards: Vec<Hazard> = Vec::new();
        for name in hazard_names {
            if hazards.iter().any(|h| &h.name == name) {
                tracing::warn!(project = %project_id, hazard = %name, "duplicate hazard name skipped");
                continue;
            }
            let hazard_id = self.db().generate_id(PREFIX_HAZARD).await?;
            tx.execute(
                "INSERT INTO hazards (id, project_id, name, impact, likelihood)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    hazard_id.as_str(),
                    project_id,
                    name.as_str(),
                    HazardImpact::Unknown.as_str(),
                    HazardLikelihood::Unknown.as_str()
                ],
            )
            .await?;

            let mut goals = Vec::with_capacity(metrics.len());
            for metric in &metrics {
                let goal_id = self.db().generate_id(PREFIX_GOAL).await?;
                tx.execute(
                    "INSERT INTO goals (id, hazard_id, metric_id) VALUES (?1, ?2, ?3)",
                    libsql::params![goal_id.as_str(), hazard_id.as_str(), metric.id.as_str()],
                )
                .await?;
                goals.push(Goal {
                    id: goal_id,
                    hazard_id: hazard_id.clone(),
                    metric_id: metric.id.clone(),
                    comparison: None,
                    target_value: None,
                });
            }

            hazards.push(Hazard {
                id: hazard_id,
                project_id: project_id.to_string(),
                name: name.clone(),
                impact: HazardImpact::Unknown,
                likelihood: HazardLikelihood::Unknown,
                goals,
            });
        }
        tx.commit().await?;

        hazards.sort_by(|a, b| a.name.cmp(&b.name));
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::info!(
            project = %project_id,
            hazards = hazards.len(),
            metrics = metrics.len(),
            "hazards rebuilt"
        );
        Ok((hazards, metrics))
    }

    /// Reset every hazard of a project to unknown/unknown, then apply the
    /// given classifications. Runs in one transaction. Returns the ids that
    /// matched no hazard of the project.
    pub async fn classify_hazards(
        &self,
        project_id: &str,
        classifications: &[HazardClassification],
    ) -> Result<Vec<String>, DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "UPDATE hazards SET impact = ?1, likelihood = ?2 WHERE project_id = ?3",
            libsql::params![
                HazardImpact::Unknown.as_str(),
                HazardLikelihood::Unknown.as_str(),
                project_id
            ],
        )
        .await?;

        let mut unmatched = Vec::new();
        for classification in classifications {
            let affected = tx
                .execute(
                    "UPDATE hazards SET impact = ?1, likelihood = ?2
                     WHERE id = ?3 AND project_id = ?4",
                    libsql::params![
                        classification.impact.as_str(),
                        classification.likelihood.as_str(),
                        classification.hazard_id.as_str(),
                        project_id
                    ],
                )
                .await?;
            if affected == 0 {
                unmatched.push(classification.hazard_id.clone());
            }
        }
        tx.commit().await?;
        Ok(unmatched)
    }

    /// Set impact and likelihood of one hazard. Returns `false` if it does not exist.
    pub async fn set_hazard_classification(
        &self,
        hazard_id: &str,
        impact: HazardImpact,
        likelihood: HazardLikelihood,
    ) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE hazards SET impact = ?1, likelihood = ?2 WHERE id = ?3",
                libsql::params![impact.as_str(), likelihood.as_str(), hazard_id],
            )
            .await?;
        Ok(affected > 0)
    }
}
