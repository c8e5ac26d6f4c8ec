use clap::Subcommand;

/// System description commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SystemCommands {
    /// Import a system spreadsheet (xlsx, xls or csv).
    ///
    /// Without `--proposed` the import becomes the baseline: hazards are
    /// rebuilt and baseline metric values loaded.
    Import {
        project: String,
        file: String,
        /// Import a proposed design instead of the baseline.
        #[arg(long)]
        proposed: bool,
    },
    /// Show objects and relationships.
    Show {
        project: String,
        /// Show the baseline snapshot instead of the current system.
        #[arg(long)]
        baseline: bool,
    },
    /// Edit the current system.
    ///
    /// Each edit is `obj.<id>.<parameter>=<value>` or
    /// `rel.obj.<relationship id>.<member index>=<object name>`.
    Edit {
        project: String,
        #[arg(required = true)]
        edits: Vec<String>,
    },
}
