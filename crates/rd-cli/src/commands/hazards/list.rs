use crate::cli::GlobalFlags;
use crate::commands::shared::rows::HazardRow;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(project_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;
    let rows = project
        .hazards_by_risk()
        .into_iter()
        .map(HazardRow::from)
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
