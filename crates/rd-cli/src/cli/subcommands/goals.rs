use clap::Subcommand;

/// Goal commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GoalsCommands {
    /// List goals with inherited values resolved.
    List {
        project: String,
        /// Include the Base hazard's goals.
        #[arg(long)]
        base: bool,
    },
    /// Set a goal's comparison and target.
    ///
    /// An empty comparison or target clears the field so it is inherited
    /// from the Base hazard.
    Set {
        project: String,
        /// `<hazard>.<metric>`
        goal: String,
        #[arg(long, default_value = "")]
        comparison: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        target: String,
    },
    /// Set the unit of a metric (none, kw, kwh).
    Unit {
        project: String,
        metric: String,
        unit: String,
    },
}
