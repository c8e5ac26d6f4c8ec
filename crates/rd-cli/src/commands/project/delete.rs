use crate::cli::GlobalFlags;
use crate::commands::project::types::ProjectDeleteResponse;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(id).await?;
    ctx.coordinator.delete(&project).await?;
    output(
        &ProjectDeleteResponse {
            id: project.id,
            deleted: true,
        },
        flags.format,
    )
}
