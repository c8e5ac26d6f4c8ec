//! Project repository: the root aggregate and its lifecycle.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rd_core::entities::Project;
use rd_core::ids::PREFIX_PROJECT;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_optional_json};
use crate::service::RdService;

const SELECT_COLS: &str = "id, name, user_id, directory, results, created_at";

/// Project row without hazards and metrics.
fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        directory: PathBuf::from(row.get::<String>(3)?),
        results: parse_optional_json(row.get::<Option<String>>(4)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        hazards: Vec::new(),
        metrics: Vec::new(),
    })
}

fn path_text(path: &Path) -> Result<&str, DatabaseError> {
    path.to_str().ok_or_else(|| {
        DatabaseError::Query(format!("Directory is not valid UTF-8: {}", path.display()))
    })
}

impl RdService {
    pub async fn create_project(
        &self,
        name: &str,
        user_id: &str,
        directory: &Path,
    ) -> Result<Project, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO projects ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, NULL, ?5)"),
                libsql::params![
                    id.as_str(),
                    name,
                    user_id,
                    path_text(directory)?,
                    now.to_rfc3339()
                ],
            )
            .await?;
        tracing::info!(project = %id, name, user_id, "project created");

        Ok(Project {
            id,
            name: name.to_string(),
            user_id: user_id.to_string(),
            directory: directory.to_path_buf(),
            results: None,
            created_at: now,
            hazards: Vec::new(),
            metrics: Vec::new(),
        })
    }

    /// Load a project with its metrics, hazards and goals, or `None`.
    pub async fn find_project(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut project = row_to_project(&row)?;
        project.metrics = self.list_metrics(id).await?;
        project.hazards = self.list_hazards(id).await?;
        Ok(Some(project))
    }

    /// Load a project aggregate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no project has this id.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        self.find_project(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Projects owned by `user_id`, newest first.
    pub async fn list_projects(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT id FROM projects WHERE user_id = ?1
                     ORDER BY created_at DESC, id LIMIT {limit}"
                ),
                [user_id],
            )
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }

        let mut projects = Vec::with_capacity(ids.len());
        for id in ids {
            projects.push(self.get_project(&id).await?);
        }
        Ok(projects)
    }

    /// Delete a project; hazards, goals and metrics cascade.
    /// Returns `false` if it did not exist.
    pub async fn delete_project(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .await?;
        if affected > 0 {
            tracing::info!(project = %id, "project deleted");
        }
        Ok(affected > 0)
    }

    /// Replace the opaque results blob.
    pub async fn set_project_results(
        &self,
        id: &str,
        results: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let text = serde_json::to_string(results).map_err(|e| DatabaseError::Other(e.into()))?;
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE projects SET results = ?1 WHERE id = ?2",
                libsql::params![text, id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}
