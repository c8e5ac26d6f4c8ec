//! # rd-config
//!
//! Layered configuration loading for ResDEEDS using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RESDEEDS_*` prefix, `__` as separator)
//! 2. Project-level `.resdeeds/config.toml`
//! 3. User-level `~/.config/resdeeds/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `RESDEEDS_ENGINE__PROGRAM` -> `engine.program`,
//! `RESDEEDS_WORKSPACE__TEMPLATE_DIR` -> `workspace.template_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rd_config::RdConfig;
//!
//! let config = RdConfig::load_with_dotenv().expect("config");
//! println!("engine: {}", config.engine.program);
//! ```

mod database;
mod engine;
mod error;
mod general;
mod workspace;

pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use workspace::WorkspaceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all configuration keys.
pub const ENV_PREFIX: &str = "RESDEEDS_";

/// Sections that may appear after [`ENV_PREFIX`].
pub const SECTIONS: &[&str] = &["general", "workspace", "engine", "database"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RdConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl RdConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`RdConfig::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory or the nearest ancestor that has one.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".resdeeds/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the workspace layout unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.workspace.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "workspace".into(),
            });
        }
        if !self.engine.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "engine".into(),
            });
        }
        self.workspace.validate()
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("resdeeds").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RdConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.general.default_user, "default");
        assert!(!config.database.drop_and_recreate);
    }

    #[test]
    fn empty_engine_program_is_not_configured() {
        let mut config = RdConfig::default();
        config.engine.program = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { section }) if section == "engine"
        ));
    }

    #[test]
    fn renders_all_sections_as_toml() {
        let rendered = RdConfig::default().to_toml().expect("renders");
        for section in SECTIONS {
            assert!(
                rendered.contains(&format!("[{section}]")),
                "missing [{section}] in:\n{rendered}"
            );
        }
    }
}
