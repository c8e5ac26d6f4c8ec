use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rd_core::entities::{Metric, Project};
use serde::Serialize;

use crate::commands::shared::rows::HazardRow;

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub directory: PathBuf,
    pub created_at: DateTime<Utc>,
    pub hazards: usize,
    pub metrics: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            user_id: project.user_id.clone(),
            directory: project.directory.clone(),
            created_at: project.created_at,
            hazards: project.get_hazards().len(),
            metrics: project.metrics.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub id: String,
    pub name: String,
    pub directory: PathBuf,
    pub created_at: DateTime<Utc>,
    pub results: Option<serde_json::Value>,
    pub hazards: Vec<HazardRow>,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDeleteResponse {
    pub id: String,
    pub deleted: bool,
}
