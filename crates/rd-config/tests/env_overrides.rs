use figment::Jail;
use pretty_assertions::assert_eq;
use rd_config::RdConfig;

#[test]
fn env_overrides_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("RESDEEDS_ENGINE__PROGRAM", "fake-toolbox");
        jail.set_env("RESDEEDS_GENERAL__DEFAULT_LIMIT", "5");
        jail.set_env("RESDEEDS_ENGINE__FAIL_ON_NONZERO_EXIT", "true");

        let config = RdConfig::load().expect("config loads");
        assert_eq!(config.engine.program, "fake-toolbox");
        assert_eq!(config.general.default_limit, 5);
        assert!(config.engine.fail_on_nonzero_exit);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".resdeeds")?;
        jail.create_file(
            ".resdeeds/config.toml",
            r#"
[general]
default_user = "from-file"
"#,
        )?;
        jail.set_env("RESDEEDS_GENERAL__DEFAULT_USER", "from-env");

        let config = RdConfig::load().expect("config loads");
        assert_eq!(config.general.default_user, "from-env");
        Ok(())
    });
}

#[test]
fn single_underscore_is_not_a_section_separator() {
    Jail::expect_with(|jail| {
        jail.set_env("RESDEEDS_ENGINE_PROGRAM", "ignored");

        let config = RdConfig::load().expect("config loads");
        assert_eq!(config.engine.program, "spinetoolbox");
        Ok(())
    });
}
