use rd_project::ResultsReport;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectArgs;
use crate::commands::shared::rows::{GoalRow, goal_rows};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ResultsResponse {
    results: ResultsReport,
    goals: Vec<GoalRow>,
}

/// Handle `resdeeds results`: reload final metric values from the results
/// datastore without running the engine.
pub async fn handle(args: &ProjectArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(&args.project).await?;
    let results = ctx.coordinator.load_results(&project, false).await?;
    let project = ctx.project(&args.project).await?;
    output(
        &ResultsResponse {
            results,
            goals: goal_rows(&project, false),
        },
        flags.format,
    )
}
