//! Goal repository.

use rd_core::entities::Goal;

use crate::error::DatabaseError;
use crate::helpers::{opt_real, parse_optional_enum};
use crate::service::RdService;
use crate::updates::GoalUpdate;

pub(crate) const SELECT_COLS: &str = "g.id, g.hazard_id, g.metric_id, g.comparison, g.target_value";

pub(crate) fn row_to_goal(row: &libsql::Row) -> Result<Goal, DatabaseError> {
    Ok(Goal {
        id: row.get(0)?,
        hazard_id: row.get(1)?,
        metric_id: row.get(2)?,
        comparison: parse_optional_enum(row.get::<Option<String>>(3)?.as_deref())?,
        target_value: row.get::<Option<f64>>(4)?,
    })
}

impl RdService {
    pub async fn get_goal(&self, id: &str) -> Result<Goal, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM goals g WHERE g.id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_goal(&row)
    }

    /// Goals of every hazard of a project, ordered by metric name.
    pub async fn list_goals(&self, project_id: &str) -> Result<Vec<Goal>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM goals g
                     JOIN hazards h ON h.id = g.hazard_id
                     JOIN metrics m ON m.id = g.metric_id
                     WHERE h.project_id = ?1
                     ORDER BY m.name"
                ),
                [project_id],
            )
            .await?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next().await? {
            goals.push(row_to_goal(&row)?);
        }
        Ok(goals)
    }

    /// Apply a partial update; stored values only, no inheritance.
    pub async fn update_goal(&self, goal_id: &str, update: &GoalUpdate) -> Result<Goal, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(comparison) = update.comparison {
            sets.push(format!("comparison = ?{idx}"));
            params.push(comparison.map_or(libsql::Value::Null, |c| c.as_str().into()));
            idx += 1;
        }
        if let Some(target_value) = update.target_value {
            sets.push(format!("target_value = ?{idx}"));
            params.push(opt_real(target_value));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_goal(goal_id).await;
        }

        params.push(goal_id.into());
        let sql = format!("UPDATE goals SET {} WHERE id = ?{idx}", sets.join(", "));
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(goal = %goal_id, ?update, "goal updated");
        self.get_goal(goal_id).await
    }
}
