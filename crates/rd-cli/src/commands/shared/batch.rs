use rd_project::BatchReport;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Print a batch report, then fail the command if any item failed.
pub fn finish(report: &BatchReport, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(report, flags.format)?;
    if report.has_failures() {
        anyhow::bail!(
            "{} of {} items failed",
            report.failures.len(),
            report.failures.len() + report.applied
        );
    }
    Ok(())
}
