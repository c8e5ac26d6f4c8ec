use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::project::types::ProjectSummary;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx
        .coordinator
        .build(name, &ctx.user)
        .await
        .with_context(|| format!("failed to create project '{name}'"))?;
    output(&ProjectSummary::from(&project), flags.format)
}
