use crate::cli::GlobalFlags;
use crate::commands::project::types::ProjectDetail;
use crate::commands::shared::rows::HazardRow;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(id).await?;
    let detail = ProjectDetail {
        id: project.id.clone(),
        name: project.name.clone(),
        directory: project.directory.clone(),
        created_at: project.created_at,
        results: project.results.clone(),
        hazards: project
            .hazards_by_risk()
            .into_iter()
            .map(HazardRow::from)
            .collect(),
        metrics: project.metrics.clone(),
    };
    output(&detail, flags.format)
}
