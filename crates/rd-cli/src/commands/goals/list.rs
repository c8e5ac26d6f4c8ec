use crate::cli::GlobalFlags;
use crate::commands::shared::rows::goal_rows;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    include_base: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;
    output(&goal_rows(&project, include_base), flags.format)
}
