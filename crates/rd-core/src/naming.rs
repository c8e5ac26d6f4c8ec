//! Reserved names shared between the scenario datastores and the hazard model.
//!
//! The optimization workflow encodes meaning in names: alternatives carry an
//! `_alt` suffix, the unmodified system is the `Base` scenario, and scenarios
//! that run a hazard's counterfactual ("the system without the hazard") are
//! prefixed with `no_`.

/// Name of the hazard representing the unmodified system.
pub const BASE_HAZARD_NAME: &str = "Base";

/// Prefix marking counterfactual baseline scenarios.
pub const BASELINE_HAZARD_PREFIX: &str = "no_";

/// Suffix stripped from alternative names to obtain scenario names.
pub const ALTERNATIVE_SUFFIX: &str = "_alt";

/// Object class in the results datastore whose entities are metrics.
pub const METRIC_CLASS_NAME: &str = "metrics";

/// Relationship parameter holding a metric result value.
pub const RESULT_VALUE_PARAMETER: &str = "value";

/// Commit message recorded for every datastore commit.
pub const COMMIT_MESSAGE: &str = "Handled request.";

/// Scenario name for an alternative record.
#[must_use]
pub fn scenario_name(alternative: &str) -> &str {
    alternative
        .strip_suffix(ALTERNATIVE_SUFFIX)
        .unwrap_or(alternative)
}

/// Whether a scenario or hazard name denotes a counterfactual baseline run.
#[must_use]
pub fn is_baseline_name(name: &str) -> bool {
    name.starts_with(BASELINE_HAZARD_PREFIX)
}

/// Whether a hazard should be hidden from user-facing hazard lists.
#[must_use]
pub fn is_hidden_hazard(name: &str) -> bool {
    name == BASE_HAZARD_NAME || is_baseline_name(name)
}

/// Hazard a results relationship belongs to, given the scenario object name.
///
/// Counterfactual scenarios all report against the `Base` hazard.
#[must_use]
pub fn result_hazard_name(scenario_object: &str) -> &str {
    if is_baseline_name(scenario_object) {
        BASE_HAZARD_NAME
    } else {
        scenario_object
    }
}

/// Turn a free-form project name into a directory-safe stem.
///
/// Whitespace becomes `_`; path separators and other characters outside
/// `[A-Za-z0-9_.-]` are dropped. Returns `"project"` when nothing survives.
#[must_use]
pub fn sanitize_project_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.').to_string();
    if sanitized.is_empty() {
        "project".to_string()
    } else {
        sanitized
    }
}
