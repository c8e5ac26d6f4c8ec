use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::System { action } => commands::system::handle(&action, ctx, flags).await,
        Commands::Hazards { action } => commands::hazards::handle(&action, ctx, flags).await,
        Commands::Goals { action } => commands::goals::handle(&action, ctx, flags).await,
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
        Commands::Results(args) => commands::results::handle(&args, ctx, flags).await,
        Commands::Changes(args) => commands::changes::handle(&args, ctx, flags).await,
        Commands::Template { .. } | Commands::Config => {
            unreachable!("template/config are pre-dispatched in main")
        }
    }
}
