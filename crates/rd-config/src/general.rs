//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_user() -> String {
    "default".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// User id that owns projects when no `--user` is given.
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            default_limit: default_limit(),
        }
    }
}
