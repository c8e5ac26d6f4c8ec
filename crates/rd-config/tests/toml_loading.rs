//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use rd_config::RdConfig;

#[test]
fn loads_workspace_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[workspace]
template_dir = "/opt/resdeeds/template"
projects_dir = "/srv/projects"
results_db_path = "out/results.sqlite"
"#,
        )?;

        let config: RdConfig = Figment::from(Serialized::defaults(RdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.workspace.template_dir, PathBuf::from("/opt/resdeeds/template"));
        assert_eq!(config.workspace.projects_dir, PathBuf::from("/srv/projects"));
        assert_eq!(config.workspace.results_db_path, PathBuf::from("out/results.sqlite"));
        // Untouched keys keep their defaults.
        assert!(config.workspace.current_db_path.ends_with("miracl_db.sqlite"));
        Ok(())
    });
}

#[test]
fn loads_engine_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[engine]
program = "/usr/local/bin/spinetoolbox"
import_items = ["import_system"]
extra_args = ["--verbose"]
fail_on_nonzero_exit = true
"#,
        )?;

        let config: RdConfig = Figment::from(Serialized::defaults(RdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.engine.program, "/usr/local/bin/spinetoolbox");
        assert_eq!(config.engine.import_items, vec!["import_system"]);
        assert_eq!(config.engine.extra_args, vec!["--verbose"]);
        assert!(config.engine.fail_on_nonzero_exit);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".resdeeds")?;
        jail.create_file(
            ".resdeeds/config.toml",
            r#"
[general]
default_user = "planner"

[database]
path = "state/app.db"
drop_and_recreate = true
"#,
        )?;

        let config = RdConfig::load().expect("config loads");
        assert_eq!(config.general.default_user, "planner");
        assert_eq!(config.database.path, PathBuf::from("state/app.db"));
        assert!(config.database.drop_and_recreate);
        Ok(())
    });
}

#[test]
fn invalid_layout_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".resdeeds")?;
        jail.create_file(
            ".resdeeds/config.toml",
            r#"
[workspace]
current_db_path = "/abs/current.sqlite"
"#,
        )?;

        let err = RdConfig::load().unwrap_err();
        assert!(err.to_string().contains("workspace.current_db_path"));
        Ok(())
    });
}
