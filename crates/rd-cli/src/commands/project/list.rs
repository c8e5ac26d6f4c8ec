use crate::cli::GlobalFlags;
use crate::commands::project::types::ProjectSummary;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let projects = ctx.coordinator.list_projects(&ctx.user, limit).await?;
    let summaries = projects.iter().map(ProjectSummary::from).collect::<Vec<_>>();
    output(&summaries, flags.format)
}
