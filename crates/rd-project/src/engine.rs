//! Out-of-process optimization engine.
//!
//! The engine executes the Spine Toolbox workflow of a project workspace. In
//! import mode only the items that turn the uploaded spreadsheet into the
//! current datastore run; a full run executes everything else.

use std::fmt;
use std::future::Future;
use std::path::Path;

use rd_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::ProjectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    Import,
    FullRun,
}

impl EngineMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::FullRun => "full_run",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an engine invocation reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOutcome {
    pub mode: EngineMode,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    /// Captured stdout followed by stderr.
    pub diagnostics: String,
}

impl EngineOutcome {
    #[must_use]
    pub fn succeeded(mode: EngineMode) -> Self {
        Self {
            mode,
            exit_code: Some(0),
            success: true,
            diagnostics: String::new(),
        }
    }
}

/// Runs the workflow of a project workspace.
pub trait OptimizationEngine {
    /// Run only the import items, refreshing the current datastore from the
    /// workspace spreadsheet.
    fn import_system(
        &self,
        project_dir: &Path,
    ) -> impl Future<Output = Result<EngineOutcome, ProjectError>> + Send;

    /// Run the workflow without the import items, producing results.
    fn run(
        &self,
        project_dir: &Path,
    ) -> impl Future<Output = Result<EngineOutcome, ProjectError>> + Send;
}

/// Spine Toolbox invoked headless:
/// `<program> --execute-only <dir> (--select|--deselect) <items...> <extra_args...>`.
#[derive(Debug, Clone)]
pub struct ToolboxEngine {
    program: String,
    import_items: Vec<String>,
    extra_args: Vec<String>,
    fail_on_nonzero_exit: bool,
}

impl ToolboxEngine {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            program: config.program.clone(),
            import_items: config.import_items.clone(),
            extra_args: config.extra_args.clone(),
            fail_on_nonzero_exit: config.fail_on_nonzero_exit,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one invocation, without the program.
    #[must_use]
    pub fn args(&self, project_dir: &Path, mode: EngineMode) -> Vec<String> {
        let mut args = vec![
            "--execute-only".to_string(),
            project_dir.display().to_string(),
        ];
        if !self.import_items.is_empty() {
            args.push(match mode {
                EngineMode::Import => "--select".to_string(),
                EngineMode::FullRun => "--deselect".to_string(),
            });
            args.extend(self.import_items.iter().cloned());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }

    async fn execute(&self, project_dir: &Path, mode: EngineMode) -> Result<EngineOutcome, ProjectError> {
        let args = self.args(project_dir, mode);
        debug!(program = %self.program, ?args, "starting optimization engine");

        let output = TokioCommand::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProjectError::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
        let outcome = EngineOutcome {
            mode,
            exit_code: output.status.code(),
            success: output.status.success(),
            diagnostics,
        };

        if outcome.success {
            info!(%mode, dir = %project_dir.display(), "optimization engine finished");
            return Ok(outcome);
        }
        warn!(
            %mode,
            exit_code = ?outcome.exit_code,
            dir = %project_dir.display(),
            "optimization engine exited unsuccessfully"
        );
        if self.fail_on_nonzero_exit {
            return Err(ProjectError::Engine {
                mode,
                exit_code: outcome.exit_code,
                diagnostics: outcome.diagnostics,
            });
        }
        Ok(outcome)
    }
}

impl OptimizationEngine for ToolboxEngine {
    async fn import_system(&self, project_dir: &Path) -> Result<EngineOutcome, ProjectError> {
        self.execute(project_dir, EngineMode::Import).await
    }

    async fn run(&self, project_dir: &Path) -> Result<EngineOutcome, ProjectError> {
        self.execute(project_dir, EngineMode::FullRun).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn engine(program: &str, fail_on_nonzero_exit: bool) -> ToolboxEngine {
        ToolboxEngine::new(&EngineConfig {
            program: program.to_string(),
            fail_on_nonzero_exit,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn import_selects_import_items() {
        let args = engine("spinetoolbox", false).args(Path::new("/p"), EngineMode::Import);
        assert_eq!(
            args,
            [
                "--execute-only",
                "/p",
                "--select",
                "import_system",
                "merge_miracl",
                "apply_hazards"
            ]
        );
    }

    #[test]
    fn full_run_deselects_import_items() {
        let mut engine = engine("spinetoolbox", false);
        engine.extra_args = vec!["--verbose".to_string()];
        let args = engine.args(Path::new("/p"), EngineMode::FullRun);
        assert_eq!(args[2], "--deselect");
        assert_eq!(args.last().map(String::as_str), Some("--verbose"));
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let engine = engine("resdeeds-no-such-engine", false);
        let result = engine.run(Path::new(".")).await;
        assert!(matches!(result, Err(ProjectError::EngineSpawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_recorded() {
        let outcome = engine("false", false).run(Path::new(".")).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(outcome.mode, EngineMode::FullRun);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_fails_when_configured() {
        let result = engine("false", true).import_system(Path::new(".")).await;
        assert!(matches!(
            result,
            Err(ProjectError::Engine {
                mode: EngineMode::Import,
                exit_code: Some(1),
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_succeeds() {
        let outcome = engine("true", true).import_system(Path::new(".")).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.mode, EngineMode::Import);
    }
}
