use std::path::Path;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::upload::check_upload;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(
    project_id: &str,
    file: &str,
    is_baseline: bool,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let file = Path::new(file);
    check_upload(file)?;
    let project = ctx.project(project_id).await?;

    let label = if is_baseline { "baseline" } else { "proposed" };
    let progress = Progress::spinner(&format!("Importing {label} system into {}", project.name));
    let result = ctx
        .coordinator
        .import_system(&project, file, is_baseline)
        .await;
    let report = progress
        .finish(result, "System imported.", "Import failed.")
        .context("unable to import system")?;

    for outcome in report.engine.iter().filter(|outcome| !outcome.success) {
        tracing::warn!(mode = %outcome.mode, exit_code = ?outcome.exit_code, "engine reported failure");
    }
    output(&report, flags.format)
}
