//! Baseline vs. proposed snapshot comparison.
//!
//! Objects are matched by name. Names are only unique within a class, so a
//! proposed object is compared against the baseline object of the same class
//! and name, falling back to the first baseline object with that name. Both
//! sides are indexed first, so a diff is linear in the size of the two
//! snapshots.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ParameterMap, ParameterValue, SpineObject};

/// Result of comparing a proposed snapshot against a baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Proposed objects with no baseline counterpart.
    pub added: Vec<SpineObject>,
    /// Baseline objects with no proposed counterpart.
    pub removed: Vec<SpineObject>,
    /// Projections of proposed objects holding only the differing parameters.
    /// Values carry id `0`; unset means the proposed side holds no value.
    pub changed: Vec<SpineObject>,
}

impl SnapshotDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

fn index_by_name(objects: &[SpineObject]) -> HashMap<&str, &SpineObject> {
    let mut index = HashMap::with_capacity(objects.len());
    for object in objects {
        index.entry(object.name.as_str()).or_insert(object);
    }
    index
}

fn index_by_class_and_name(objects: &[SpineObject]) -> HashMap<(&str, &str), &SpineObject> {
    let mut index = HashMap::with_capacity(objects.len());
    for object in objects {
        index
            .entry((object.class_name.as_str(), object.name.as_str()))
            .or_insert(object);
    }
    index
}

/// Compare `proposed` against `baseline`.
#[must_use]
pub fn diff(proposed: &[SpineObject], baseline: &[SpineObject]) -> SnapshotDiff {
    let proposed_index = index_by_name(proposed);
    let baseline_index = index_by_name(baseline);
    let baseline_by_class = index_by_class_and_name(baseline);

    let added = proposed
        .iter()
        .filter(|object| !baseline_index.contains_key(object.name.as_str()))
        .cloned()
        .collect();
    let removed = baseline
        .iter()
        .filter(|object| !proposed_index.contains_key(object.name.as_str()))
        .cloned()
        .collect();

    let mut changed = Vec::new();
    for object in proposed {
        let Some(base) = baseline_by_class
            .get(&(object.class_name.as_str(), object.name.as_str()))
            .or_else(|| baseline_index.get(object.name.as_str()))
        else {
            continue;
        };
        let parameters = changed_parameters(object, base);
        if !parameters.is_empty() {
            changed.push(SpineObject {
                id: object.id,
                class_id: object.class_id,
                class_name: object.class_name.clone(),
                name: object.name.clone(),
                parameters,
            });
        }
    }

    SnapshotDiff {
        added,
        removed,
        changed,
    }
}

fn changed_parameters(proposed: &SpineObject, baseline: &SpineObject) -> ParameterMap {
    let mut out = ParameterMap::new();
    let baseline_only = baseline
        .parameters
        .keys()
        .filter(|name| !proposed.parameters.contains_key(*name));
    let names = proposed.parameters.keys().chain(baseline_only);
    for name in names {
        let new = proposed.value(name);
        if new != baseline.value(name) {
            out.insert(name.clone(), new.map(|value| ParameterValue::new(0, value)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn object(id: i64, name: &str, params: &[(&str, Option<&str>)]) -> SpineObject {
        object_of("unit", id, name, params)
    }

    fn object_of(class: &str, id: i64, name: &str, params: &[(&str, Option<&str>)]) -> SpineObject {
        SpineObject {
            id,
            class_id: if class == "unit" { 1 } else { 2 },
            class_name: class.into(),
            name: name.into(),
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, (param, value))| {
                    (
                        (*param).to_string(),
                        value.map(|v| ParameterValue::new(i64::try_from(i).unwrap() + 100, v)),
                    )
                })
                .collect(),
        }
    }

    fn names(objects: &[SpineObject]) -> Vec<&str> {
        objects.iter().map(|o| o.name.as_str()).collect()
    }

    fn sample_a() -> Vec<SpineObject> {
        vec![
            object(1, "gen1", &[("capacity", Some("100")), ("cost", Some("5"))]),
            object(2, "gen2", &[("capacity", Some("50"))]),
            object(3, "line1", &[("rating", None)]),
        ]
    }

    fn sample_b() -> Vec<SpineObject> {
        vec![
            object(7, "gen1", &[("capacity", Some("120")), ("cost", Some("5"))]),
            object(8, "line1", &[("rating", None)]),
            object(9, "battery", &[("capacity", Some("10"))]),
        ]
    }

    #[test]
    fn diff_with_itself_is_empty() {
        let a = sample_a();
        let result = diff(&a, &a);
        assert!(result.is_empty());
    }

    #[test]
    fn added_and_removed_are_mirror_images() {
        let (a, b) = (sample_a(), sample_b());
        let ab = diff(&a, &b);
        let ba = diff(&b, &a);
        assert_eq!(ab.added, ba.removed);
        assert_eq!(ab.removed, ba.added);
        assert_eq!(names(&ab.added), vec!["gen2"]);
        assert_eq!(names(&ab.removed), vec!["battery"]);
    }

    #[test]
    fn changed_holds_only_differing_parameters() {
        let result = diff(&sample_a(), &sample_b());
        assert_eq!(result.changed.len(), 1);
        let gen1 = &result.changed[0];
        assert_eq!(gen1.id, 1);
        assert_eq!(gen1.name, "gen1");
        assert_eq!(gen1.parameters.len(), 1);
        assert_eq!(
            gen1.parameters.get("capacity"),
            Some(&Some(ParameterValue::new(0, "100")))
        );
    }

    #[test]
    fn unset_versus_set_is_a_change() {
        let proposed = vec![object(1, "line1", &[("rating", None)])];
        let baseline = vec![object(2, "line1", &[("rating", Some("30"))])];
        let result = diff(&proposed, &baseline);
        assert_eq!(result.changed[0].parameters.get("rating"), Some(&None));
    }

    #[test]
    fn parameter_missing_from_baseline_counts_as_unset() {
        let proposed = vec![object(1, "gen1", &[("capacity", Some("1")), ("extra", None)])];
        let baseline = vec![object(2, "gen1", &[("capacity", Some("1"))])];
        assert!(diff(&proposed, &baseline).is_empty());

        let proposed = vec![object(1, "gen1", &[("extra", Some("x"))])];
        let result = diff(&proposed, &baseline);
        let keys: Vec<_> = result.changed[0].parameters.keys().cloned().collect();
        assert_eq!(keys, vec!["capacity".to_string(), "extra".to_string()]);
    }

    #[test]
    fn every_proposed_duplicate_is_compared() {
        let proposed = vec![
            object(1, "gen1", &[("capacity", Some("1"))]),
            object(2, "gen1", &[("capacity", Some("2"))]),
        ];
        let baseline = vec![object(3, "gen1", &[("capacity", Some("1"))])];
        let result = diff(&proposed, &baseline);
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].id, 2);
    }

    #[test]
    fn same_name_in_another_class_is_matched_by_class() {
        let proposed = vec![
            object_of("unit", 1, "battery", &[("capacity", Some("1"))]),
            object_of("node", 2, "battery", &[("capacity", Some("5"))]),
        ];
        let baseline = vec![
            object_of("unit", 11, "battery", &[("capacity", Some("1"))]),
            object_of("node", 12, "battery", &[("capacity", Some("3"))]),
        ];
        let result = diff(&proposed, &baseline);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert_eq!(result.changed.len(), 1);
        let node = &result.changed[0];
        assert_eq!((node.id, node.class_name.as_str()), (2, "node"));
        assert_eq!(
            node.parameters.get("capacity"),
            Some(&Some(ParameterValue::new(0, "5")))
        );
    }

    #[test]
    fn class_mismatch_falls_back_to_name() {
        let proposed = vec![object_of("node", 1, "bus1", &[("demand", Some("7"))])];
        let baseline = vec![object_of("unit", 2, "bus1", &[("demand", Some("6"))])];
        let result = diff(&proposed, &baseline);
        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[0].class_name, "node");
    }
}
