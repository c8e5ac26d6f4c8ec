use rd_core::entities::SpineObject;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::ProjectArgs;
use crate::commands::shared::rows::parameter_list;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ChangeRow {
    change: &'static str,
    class: String,
    name: String,
    parameters: String,
}

impl ChangeRow {
    fn new(change: &'static str, object: &SpineObject) -> Self {
        Self {
            change,
            class: object.class_name.clone(),
            name: object.name.clone(),
            parameters: parameter_list(&object.parameters),
        }
    }
}

/// Handle `resdeeds changes`.
pub async fn handle(args: &ProjectArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.project(&args.project).await?;
    let diff = ctx.coordinator.calculate_proposed_changes(&project).await?;

    if flags.format == OutputFormat::Table {
        let rows = diff
            .added
            .iter()
            .map(|object| ChangeRow::new("added", object))
            .chain(diff.removed.iter().map(|object| ChangeRow::new("removed", object)))
            .chain(diff.changed.iter().map(|object| ChangeRow::new("changed", object)))
            .collect::<Vec<_>>();
        return output(&rows, flags.format);
    }
    output(&diff, flags.format)
}
