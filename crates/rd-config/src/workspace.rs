//! Template and project workspace layout.
//!
//! The datastore and spreadsheet paths are relative to a project directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_template_dir() -> PathBuf {
    PathBuf::from("spine/Spine")
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("spine/projects")
}

fn default_spreadsheet_path() -> PathBuf {
    PathBuf::from(".spinetoolbox/items/user_input/user_data.xlsx")
}

fn default_current_db_path() -> PathBuf {
    PathBuf::from(".spinetoolbox/items/miracl_db/miracl_db.sqlite")
}

fn default_baseline_db_path() -> PathBuf {
    PathBuf::from(".spinetoolbox/items/miracl_db/baseline.sqlite")
}

fn default_results_db_path() -> PathBuf {
    PathBuf::from(".spinetoolbox/items/metrics/Metrics.sqlite")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Workspace copied into every new project.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Parent directory of project workspaces.
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// Where an uploaded system description is saved.
    #[serde(default = "default_spreadsheet_path")]
    pub spreadsheet_path: PathBuf,

    /// Datastore holding the system as currently edited.
    #[serde(default = "default_current_db_path")]
    pub current_db_path: PathBuf,

    /// Snapshot of the current datastore taken on baseline import.
    #[serde(default = "default_baseline_db_path")]
    pub baseline_db_path: PathBuf,

    /// Datastore written by the optimization workflow.
    #[serde(default = "default_results_db_path")]
    pub results_db_path: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            projects_dir: default_projects_dir(),
            spreadsheet_path: default_spreadsheet_path(),
            current_db_path: default_current_db_path(),
            baseline_db_path: default_baseline_db_path(),
            results_db_path: default_results_db_path(),
        }
    }
}

impl WorkspaceConfig {
    /// Returns `true` if the template directory is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.template_dir.as_os_str().is_empty() && !self.projects_dir.as_os_str().is_empty()
    }

    /// Check that the in-project paths are relative and distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_project = [
            ("workspace.spreadsheet_path", &self.spreadsheet_path),
            ("workspace.current_db_path", &self.current_db_path),
            ("workspace.baseline_db_path", &self.baseline_db_path),
            ("workspace.results_db_path", &self.results_db_path),
        ];
        for (field, path) in in_project {
            check_relative(field, path)?;
        }
        if self.current_db_path == self.baseline_db_path {
            return Err(ConfigError::InvalidValue {
                field: "workspace.baseline_db_path".into(),
                reason: "must differ from workspace.current_db_path".into(),
            });
        }
        Ok(())
    }
}

fn check_relative(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    if path.is_absolute() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: format!("must be relative to the project directory, got {}", path.display()),
        });
    }
    Ok(())
}
