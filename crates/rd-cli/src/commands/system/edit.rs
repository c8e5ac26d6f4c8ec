use rd_project::{BatchReport, SystemEdit};

use crate::cli::GlobalFlags;
use crate::commands::shared::batch;
use crate::context::AppContext;

pub async fn run(
    project_id: &str,
    assignments: &[String],
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;

    let mut report = BatchReport::default();
    let mut edits = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        match SystemEdit::parse_assignment(assignment) {
            Ok(edit) => edits.push(edit),
            Err(error) => {
                tracing::warn!(%error, "skipping edit");
                report.record_failure(assignment.clone(), error.to_string());
            }
        }
    }

    report.merge(ctx.coordinator.apply_system_edits(&project, &edits).await?);
    // Applied edits stay even when others failed.
    ctx.coordinator.commit().await?;
    batch::finish(&report, flags)
}
