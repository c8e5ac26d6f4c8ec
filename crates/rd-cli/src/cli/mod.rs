use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `resdeeds` binary.
#[derive(Debug, Parser)]
#[command(name = "resdeeds", version, about = "ResDEEDS - resilience planning for energy systems")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User owning the projects (defaults to general.default_user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            user: self.user.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{GoalsCommands, HazardsCommands, SystemCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "resdeeds", "--format", "table", "--limit", "10", "--verbose", "config",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["resdeeds", "run", "prj-1a2b3c4d", "--format", "raw", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Run(ref args) if args.project == "prj-1a2b3c4d"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["resdeeds", "--format", "xml", "config"]).is_err());
    }

    #[test]
    fn import_defaults_to_baseline() {
        let cli = Cli::try_parse_from(["resdeeds", "system", "import", "prj-1", "grid.xlsx"])
            .expect("cli should parse");
        let Commands::System {
            action: SystemCommands::Import { proposed, file, .. },
        } = cli.command
        else {
            panic!("expected system import");
        };
        assert!(!proposed);
        assert_eq!(file, "grid.xlsx");
    }

    #[test]
    fn system_edit_requires_edits() {
        assert!(Cli::try_parse_from(["resdeeds", "system", "edit", "prj-1"]).is_err());
        let cli = Cli::try_parse_from([
            "resdeeds",
            "system",
            "edit",
            "prj-1",
            "obj.3.unit_capacity=250",
            "rel.obj.7.1=bus2",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::System { action: SystemCommands::Edit { ref edits, .. } } if edits.len() == 2
        ));
    }

    #[test]
    fn repeated_classification_flags() {
        let cli = Cli::try_parse_from([
            "resdeeds",
            "hazards",
            "classify",
            "prj-1",
            "--set",
            "Hurricane=intolerable_probable",
            "--set",
            "Flood=tolerable_possible",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Hazards { action: HazardsCommands::Classify { ref assignments, .. } }
                if assignments.len() == 2
        ));
    }

    #[test]
    fn goal_set_fields_default_to_empty() {
        let cli = Cli::try_parse_from(["resdeeds", "goals", "set", "prj-1", "Hurricane.ENS"])
            .expect("cli should parse");
        let Commands::Goals {
            action: GoalsCommands::Set {
                comparison, target, ..
            },
        } = cli.command
        else {
            panic!("expected goals set");
        };
        assert!(comparison.is_empty());
        assert!(target.is_empty());
    }

    #[test]
    fn user_flag_is_global() {
        let cli = Cli::try_parse_from(["resdeeds", "project", "list", "--user", "alice"])
            .expect("cli should parse");
        assert_eq!(cli.global_flags().user.as_deref(), Some("alice"));
    }
}
