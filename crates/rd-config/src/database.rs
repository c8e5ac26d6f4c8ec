//! Application database settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from(".resdeeds/resdeeds.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local libSQL file holding projects, hazards, goals and metrics.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Drop all application tables before migrating on open.
    #[serde(default)]
    pub drop_and_recreate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            drop_and_recreate: false,
        }
    }
}
