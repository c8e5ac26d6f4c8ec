use std::path::PathBuf;

use rd_config::RdConfig;
use rd_core::enums::DatastoreKind;
use rd_core::naming::{BASE_HAZARD_NAME, METRIC_CLASS_NAME, RESULT_VALUE_PARAMETER};
use rd_project::WorkspaceLayout;
use rd_spine::SeedWriter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TemplateCommands;
use crate::output::output;

const SCENARIO_CLASS: &str = "scenario";

#[derive(Serialize)]
struct TemplatePath {
    spreadsheet: PathBuf,
    exists: bool,
}

#[derive(Serialize)]
struct InitResponse {
    created: Vec<PathBuf>,
    existing: Vec<PathBuf>,
}

/// Handle `resdeeds template`. Needs configuration only, not the database.
pub async fn handle(action: &TemplateCommands, config: &RdConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let layout = WorkspaceLayout::from(&config.workspace);
    match action {
        TemplateCommands::Path => {
            let spreadsheet = layout.template_spreadsheet_path();
            let exists = spreadsheet.is_file();
            output(&TemplatePath { spreadsheet, exists }, flags.format)
        }
        TemplateCommands::Init => init(&layout, flags).await,
    }
}

async fn init(layout: &WorkspaceLayout, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut response = InitResponse {
        created: Vec::new(),
        existing: Vec::new(),
    };

    let current = layout.location(layout.template_dir(), DatastoreKind::Current).path();
    if current.exists() {
        response.existing.push(current);
    } else {
        let seed = SeedWriter::open(&current, "Empty template system").await?;
        seed.alternative(BASE_HAZARD_NAME).await?;
        tracing::info!(path = %current.display(), "created template system datastore");
        response.created.push(current);
    }

    let results = layout.location(layout.template_dir(), DatastoreKind::Results).path();
    if results.exists() {
        response.existing.push(results);
    } else {
        let seed = SeedWriter::open(&results, "Empty template results").await?;
        let scenario = seed.object_class(SCENARIO_CLASS).await?;
        let metrics = seed.object_class(METRIC_CLASS_NAME).await?;
        let pairs = seed
            .relationship_class(&format!("{SCENARIO_CLASS}__{METRIC_CLASS_NAME}"), &[scenario, metrics])
            .await?;
        seed.parameter_definition(pairs, RESULT_VALUE_PARAMETER).await?;
        tracing::info!(path = %results.display(), "created template results datastore");
        response.created.push(results);
    }

    output(&response, flags.format)
}
