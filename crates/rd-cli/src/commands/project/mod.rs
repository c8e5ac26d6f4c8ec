mod create;
mod delete;
mod list;
mod show;
mod types;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `resdeeds project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { name } => create::run(name, ctx, flags).await,
        ProjectCommands::List { limit } => list::run(*limit, ctx, flags).await,
        ProjectCommands::Show { id } => show::run(id, ctx, flags).await,
        ProjectCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
