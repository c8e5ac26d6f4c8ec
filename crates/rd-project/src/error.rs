use std::path::PathBuf;

use rd_db::error::DatabaseError;
use rd_spine::SpineError;

use crate::engine::EngineMode;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Template workspace not found at {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Could not start optimization engine '{program}': {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Optimization engine {mode} run failed (exit code {exit_code:?})")]
    Engine {
        mode: EngineMode,
        exit_code: Option<i32>,
        diagnostics: String,
    },

    #[error("Workspace task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Spine(#[from] SpineError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
