use clap::Subcommand;

/// Template workspace commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// Print the path of the template input spreadsheet.
    Path,
    /// Create empty template datastores where none exist.
    Init,
}
