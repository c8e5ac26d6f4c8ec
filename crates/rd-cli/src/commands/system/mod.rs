mod edit;
mod import;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SystemCommands;
use crate::context::AppContext;

/// Handle `resdeeds system`.
pub async fn handle(
    action: &SystemCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SystemCommands::Import {
            project,
            file,
            proposed,
        } => import::run(project, file, !*proposed, ctx, flags).await,
        SystemCommands::Show { project, baseline } => show::run(project, *baseline, ctx, flags).await,
        SystemCommands::Edit { project, edits } => edit::run(project, edits, ctx, flags).await,
    }
}
