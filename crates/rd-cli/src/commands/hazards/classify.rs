use std::str::FromStr;

use rd_core::enums::{HazardImpact, HazardLikelihood};
use rd_project::BatchReport;

use crate::cli::GlobalFlags;
use crate::commands::shared::batch;
use crate::context::AppContext;

type Assignment = (String, HazardImpact, HazardLikelihood);

/// Parse `<hazard>=<impact>_<likelihood>`.
fn parse_assignment(raw: &str) -> anyhow::Result<Assignment> {
    let (hazard, classification) = raw
        .rsplit_once('=')
        .filter(|(hazard, _)| !hazard.is_empty())
        .ok_or_else(|| anyhow::anyhow!("expected <hazard>=<impact>_<likelihood>, got '{raw}'"))?;
    let (impact, likelihood) = classification
        .split_once('_')
        .ok_or_else(|| anyhow::anyhow!("expected <impact>_<likelihood>, got '{classification}'"))?;
    Ok((
        hazard.to_string(),
        HazardImpact::from_str(impact)?,
        HazardLikelihood::from_str(likelihood)?,
    ))
}

pub async fn run(
    project_id: &str,
    raw: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.project(project_id).await?;

    let mut report = BatchReport::default();
    let mut assignments = Vec::with_capacity(raw.len());
    for item in raw {
        match parse_assignment(item) {
            Ok(assignment) => assignments.push(assignment),
            Err(error) => {
                tracing::warn!(%error, "skipping classification");
                report.record_failure(item.clone(), error.to_string());
            }
        }
    }

    report.merge(ctx.coordinator.classify_hazards(&project, &assignments).await?);
    batch::finish(&report, flags)
}
