use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project from the template workspace.
    Create { name: String },
    /// List projects of the current user.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a project with its hazards and metrics.
    Show { id: String },
    /// Delete a project and its workspace.
    Delete { id: String },
}
