use anyhow::Context;
use rd_config::RdConfig;
use rd_db::service::RdService;
use rd_project::{ProjectCoordinator, ToolboxEngine, WorkspaceLayout};
use rd_spine::SpineSession;

use crate::cli::GlobalFlags;

/// Author recorded on datastore commits made by the CLI.
const COMMIT_USER: &str = "resdeeds";

/// Shared application resources for one invocation.
pub struct AppContext {
    pub config: RdConfig,
    pub coordinator: ProjectCoordinator<ToolboxEngine>,
    /// Owner of created and listed projects.
    pub user: String,
}

impl AppContext {
    /// Open the application database and set up a fresh datastore session.
    pub async fn init(config: RdConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = &config.database.path;
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
        let service = RdService::new_local(&db_path.to_string_lossy(), config.database.drop_and_recreate)
            .await
            .context("failed to initialize rd-db service")?;

        let coordinator = ProjectCoordinator::new(
            service,
            SpineSession::with_user(COMMIT_USER),
            ToolboxEngine::new(&config.engine),
            WorkspaceLayout::from(&config.workspace),
        );
        let user = flags
            .user
            .clone()
            .unwrap_or_else(|| config.general.default_user.clone());
        tracing::debug!(%user, db = %db_path.display(), "application context ready");

        Ok(Self {
            config,
            coordinator,
            user,
        })
    }

    /// Load a project or fail with a message naming the id.
    pub async fn project(&self, id: &str) -> anyhow::Result<rd_core::entities::Project> {
        self.coordinator
            .open(id)
            .await
            .with_context(|| format!("cannot open project {id}"))
    }
}
