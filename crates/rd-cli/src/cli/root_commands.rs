use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    GoalsCommands, HazardsCommands, ProjectCommands, SystemCommands, TemplateCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// System description of a project.
    System {
        #[command(subcommand)]
        action: SystemCommands,
    },
    /// Hazards derived from the project's scenarios.
    Hazards {
        #[command(subcommand)]
        action: HazardsCommands,
    },
    /// Goals per hazard and metric.
    Goals {
        #[command(subcommand)]
        action: GoalsCommands,
    },
    /// Run the optimization workflow and load the results.
    Run(ProjectArgs),
    /// Reload metric values from the results datastore.
    Results(ProjectArgs),
    /// Objects added, removed and changed relative to the baseline.
    Changes(ProjectArgs),
    /// Template workspace.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectArgs {
    /// Project ID.
    pub project: String,
}
