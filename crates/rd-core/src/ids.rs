//! ID prefixes for application records.
//!
//! IDs are generated in SQL as `{prefix}-{8 hex chars}`, e.g. `haz-a3f8b2c1`.
//! Scenario datastore records keep the integer row ids of their own database.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_HAZARD: &str = "haz";
pub const PREFIX_GOAL: &str = "gol";
pub const PREFIX_METRIC: &str = "met";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_PROJECT, PREFIX_HAZARD, PREFIX_GOAL, PREFIX_METRIC];

/// Check whether `id` looks like an application ID with the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for prefix in ALL_PREFIXES {
            assert!(seen.insert(*prefix), "duplicate prefix {prefix}");
        }
    }

    #[test]
    fn has_prefix_checks_shape() {
        assert!(has_prefix("haz-a3f8b2c1", PREFIX_HAZARD));
        assert!(!has_prefix("haz-a3f8", PREFIX_HAZARD));
        assert!(!has_prefix("gol-a3f8b2c1", PREFIX_HAZARD));
        assert!(!has_prefix("haz-zzzzzzzz", PREFIX_HAZARD));
    }
}
