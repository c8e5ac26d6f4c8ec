mod classify;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HazardsCommands;
use crate::context::AppContext;

/// Handle `resdeeds hazards`.
pub async fn handle(
    action: &HazardsCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HazardsCommands::List { project } => list::run(project, ctx, flags).await,
        HazardsCommands::Classify {
            project,
            assignments,
        } => classify::run(project, assignments, ctx, flags).await,
    }
}
