use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `resdeeds run`.
pub async fn handle(args: &ProjectArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(&args.project).await?;

    let progress = Progress::spinner(&format!("Running optimization for {}", project.name));
    let result = ctx.coordinator.run_optimization(&project).await;
    let report = progress
        .finish(result, "Optimization finished.", "Optimization failed.")
        .context("unable to run optimization")?;

    if !report.engine.success {
        tracing::warn!(
            exit_code = ?report.engine.exit_code,
            "engine reported failure; metric values may be stale"
        );
    }
    output(&report, flags.format)
}
