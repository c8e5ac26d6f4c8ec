use std::str::FromStr;

use rd_core::enums::MetricUnit;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct UnitResponse<'a> {
    metric: &'a str,
    unit: MetricUnit,
}

pub async fn run(
    project_id: &str,
    metric_name: &str,
    unit: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let unit = MetricUnit::from_str(unit)?;
    let project = ctx.project(project_id).await?;
    let metric = project
        .metric_by_name(metric_name)
        .ok_or_else(|| anyhow::anyhow!("project {project_id} has no metric '{metric_name}'"))?;
    if !ctx.coordinator.service().set_metric_unit(&metric.id, unit).await? {
        anyhow::bail!("metric '{metric_name}' disappeared while updating its unit");
    }
    output(
        &UnitResponse {
            metric: metric_name,
            unit,
        },
        flags.format,
    )
}
