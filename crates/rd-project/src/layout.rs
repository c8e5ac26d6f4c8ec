use std::path::{Path, PathBuf};

use rd_config::WorkspaceConfig;
use rd_core::enums::DatastoreKind;
use rd_spine::DatastoreLocation;

/// Template and projects directories plus the paths of the spreadsheet and
/// datastores inside each project workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    template_dir: PathBuf,
    projects_dir: PathBuf,
    spreadsheet_path: PathBuf,
    current_db_path: PathBuf,
    baseline_db_path: PathBuf,
    results_db_path: PathBuf,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::from(&WorkspaceConfig::default())
    }
}

impl From<&WorkspaceConfig> for WorkspaceLayout {
    fn from(config: &WorkspaceConfig) -> Self {
        Self {
            template_dir: config.template_dir.clone(),
            projects_dir: config.projects_dir.clone(),
            spreadsheet_path: config.spreadsheet_path.clone(),
            current_db_path: config.current_db_path.clone(),
            baseline_db_path: config.baseline_db_path.clone(),
            results_db_path: config.results_db_path.clone(),
        }
    }
}

impl WorkspaceLayout {
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    #[must_use]
    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// Datastore of the given kind inside a project workspace.
    #[must_use]
    pub fn location(&self, project_dir: &Path, kind: DatastoreKind) -> DatastoreLocation {
        let relative = match kind {
            DatastoreKind::Current => &self.current_db_path,
            DatastoreKind::Baseline => &self.baseline_db_path,
            DatastoreKind::Results => &self.results_db_path,
        };
        DatastoreLocation::new(project_dir, relative)
    }

    /// Current datastore, or the baseline snapshot when `baseline` is set.
    #[must_use]
    pub fn system_location(&self, project_dir: &Path, baseline: bool) -> DatastoreLocation {
        let kind = if baseline {
            DatastoreKind::Baseline
        } else {
            DatastoreKind::Current
        };
        self.location(project_dir, kind)
    }

    /// Where an uploaded system description is saved in a project.
    #[must_use]
    pub fn spreadsheet(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.spreadsheet_path)
    }

    /// The input sheet shipped with the template workspace.
    #[must_use]
    pub fn template_spreadsheet_path(&self) -> PathBuf {
        self.template_dir.join(&self.spreadsheet_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locations() {
        let layout = WorkspaceLayout::default();
        let dir = Path::new("spine/projects/grid_20260101120000");

        assert_eq!(
            layout.location(dir, DatastoreKind::Current).path(),
            dir.join(".spinetoolbox/items/miracl_db/miracl_db.sqlite")
        );
        assert_eq!(
            layout.system_location(dir, true).path(),
            dir.join(".spinetoolbox/items/miracl_db/baseline.sqlite")
        );
        assert_eq!(
            layout.location(dir, DatastoreKind::Results).path(),
            dir.join(".spinetoolbox/items/metrics/Metrics.sqlite")
        );
        assert_eq!(
            layout.spreadsheet(dir),
            dir.join(".spinetoolbox/items/user_input/user_data.xlsx")
        );
    }

    #[test]
    fn template_spreadsheet_is_inside_template() {
        let config = WorkspaceConfig {
            template_dir: PathBuf::from("/opt/resdeeds/template"),
            ..WorkspaceConfig::default()
        };
        let layout = WorkspaceLayout::from(&config);
        assert!(
            layout
                .template_spreadsheet_path()
                .starts_with("/opt/resdeeds/template")
        );
        assert!(layout.template_spreadsheet_path().ends_with("user_data.xlsx"));
    }
}
