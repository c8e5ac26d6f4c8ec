//! Metric repository.

use rd_core::entities::Metric;
use rd_core::enums::MetricUnit;

use crate::error::DatabaseError;
use crate::helpers::{opt_real, parse_enum};
use crate::service::RdService;

pub(crate) const SELECT_COLS: &str = "id, project_id, name, unit, baseline_value, final_value";

pub(crate) fn row_to_metric(row: &libsql::Row) -> Result<Metric, DatabaseError> {
    Ok(Metric {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        unit: parse_enum(&row.get::<String>(3)?)?,
        baseline_value: row.get::<Option<f64>>(4)?,
        final_value: row.get::<Option<f64>>(5)?,
    })
}

impl RdService {
    /// Metrics of a project ordered by name.
    pub async fn list_metrics(&self, project_id: &str) -> Result<Vec<Metric>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM metrics WHERE project_id = ?1 ORDER BY name"),
                [project_id],
            )
            .await?;
        let mut metrics = Vec::new();
        while let Some(row) = rows.next().await? {
            metrics.push(row_to_metric(&row)?);
        }
        Ok(metrics)
    }

    /// Set the baseline (`baseline = true`) or final value of a metric.
    /// Returns `false` if the metric does not exist.
    pub async fn set_metric_value(
        &self,
        metric_id: &str,
        baseline: bool,
        value: Option<f64>,
    ) -> Result<bool, DatabaseError> {
        let column = if baseline { "baseline_value" } else { "final_value" };
        let affected = self
            .db()
            .conn()
            .execute(
                &format!("UPDATE metrics SET {column} = ?1 WHERE id = ?2"),
                libsql::params![opt_real(value), metric_id],
            )
            .await?;
        Ok(affected > 0)
    }

    /// Returns `false` if the metric does not exist.
    pub async fn set_metric_unit(
        &self,
        metric_id: &str,
        unit: MetricUnit,
    ) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE metrics SET unit = ?1 WHERE id = ?2",
                libsql::params![unit.as_str(), metric_id],
            )
            .await?;
        Ok(affected > 0)
    }
}
