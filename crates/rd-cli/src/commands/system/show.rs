use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::rows::{ObjectRow, RelationshipRow};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SystemTable {
    objects: Vec<ObjectRow>,
    relationships: Vec<RelationshipRow>,
}

pub async fn run(
    project_id: &str,
    baseline: bool,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;
    let system = ctx.coordinator.get_system(&project, baseline).await?;

    if flags.format == OutputFormat::Table {
        let table = SystemTable {
            objects: system.objects.iter().map(ObjectRow::from).collect(),
            relationships: system.relationships.iter().map(RelationshipRow::from).collect(),
        };
        return output(&table, flags.format);
    }
    output(&system, flags.format)
}
