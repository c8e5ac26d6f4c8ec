use rd_project::{BatchReport, GoalEdit};

use crate::cli::GlobalFlags;
use crate::commands::shared::batch;
use crate::context::AppContext;

pub async fn run(
    project_id: &str,
    goal: &str,
    comparison: &str,
    target: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;
    let report = match GoalEdit::parse(goal, comparison, target) {
        Ok(edit) => ctx.coordinator.apply_goal_edits(&project, &[edit]).await?,
        Err(error) => {
            let mut report = BatchReport::default();
            report.record_failure(goal, error.to_string());
            report
        }
    };
    batch::finish(&report, flags)
}
