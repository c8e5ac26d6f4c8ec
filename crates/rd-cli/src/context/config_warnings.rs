use rd_config::{ENV_PREFIX, RdConfig, SECTIONS};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RdConfig) {
    for warning in collect_unconfigured_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
    if !config.workspace.template_dir.is_dir() {
        tracing::warn!(
            template_dir = %config.workspace.template_dir.display(),
            "template workspace not found; project creation will fail until it exists"
        );
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let section_prefix = format!("{ENV_PREFIX}{}", section.to_ascii_uppercase());
        let mistyped = env_keys
            .iter()
            .filter(|key| {
                key.strip_prefix(&section_prefix)
                    .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
            })
            .collect::<Vec<_>>();
        if let Some(example) = mistyped.first() {
            let fixed = example.replacen(&format!("{section_prefix}_"), &format!("{section_prefix}__"), 1);
            warnings.push(format!(
                "{example} is ignored. Use double underscores between section and key (example: {fixed})."
            ));
        }
    }

    warnings
}
