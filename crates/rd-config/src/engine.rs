//! Optimization engine invocation settings.

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "spinetoolbox".to_string()
}

fn default_import_items() -> Vec<String> {
    ["import_system", "merge_miracl", "apply_hazards"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Executable run with `--execute-only <workspace>`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Workflow items selected in import mode.
    #[serde(default = "default_import_items")]
    pub import_items: Vec<String>,

    /// Extra arguments appended to every invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Treat a non-zero exit status as a failed run.
    #[serde(default)]
    pub fail_on_nonzero_exit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            import_items: default_import_items(),
            extra_args: Vec::new(),
            fail_on_nonzero_exit: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.program.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = EngineConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.program, "spinetoolbox");
        assert_eq!(
            config.import_items,
            vec!["import_system", "merge_miracl", "apply_hazards"]
        );
        assert!(!config.fail_on_nonzero_exit);
    }
}
