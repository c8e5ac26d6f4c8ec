use rd_config::RdConfig;

/// Handle `resdeeds config`.
pub fn handle(config: &RdConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
