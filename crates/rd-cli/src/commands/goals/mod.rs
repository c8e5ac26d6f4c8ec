mod list;
mod set;
mod unit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GoalsCommands;
use crate::context::AppContext;

/// Handle `resdeeds goals`.
pub async fn handle(
    action: &GoalsCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        GoalsCommands::List { project, base } => list::run(project, *base, ctx, flags).await,
        GoalsCommands::Set {
            project,
            goal,
            comparison,
            target,
        } => set::run(project, goal, comparison, target, ctx, flags).await,
        GoalsCommands::Unit {
            project,
            metric,
            unit,
        } => unit::run(project, metric, unit, ctx, flags).await,
    }
}
