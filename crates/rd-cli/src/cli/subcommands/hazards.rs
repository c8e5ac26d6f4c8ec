use clap::Subcommand;

/// Hazard commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HazardsCommands {
    /// List hazards, highest risk first.
    List { project: String },
    /// Classify hazards. Hazards not named are reset to unknown.
    Classify {
        project: String,
        /// `<hazard>=<impact>_<likelihood>`, e.g. `Hurricane=intolerable_probable`.
        #[arg(long = "set", value_name = "ASSIGNMENT")]
        assignments: Vec<String>,
    },
}
