use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A stored parameter value: the row id of the value record and its text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParameterValue {
    pub id: i64,
    pub value: String,
}

impl ParameterValue {
    #[must_use]
    pub fn new(id: i64, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// Parameter slots keyed by parameter name. `None` means the slot is defined
/// for the class but holds no stored value.
pub type ParameterMap = BTreeMap<String, Option<ParameterValue>>;

/// One named component instance in a scenario datastore.
///
/// `id` is the entity row id and only meaningful within the datastore that
/// produced it. `name` is unique within `class_name` and is the diff key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpineObject {
    pub id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub name: String,
    pub parameters: ParameterMap,
}

impl SpineObject {
    /// Resolved text of a parameter, `None` when unset or undefined.
    #[must_use]
    pub fn value(&self, parameter: &str) -> Option<&str> {
        self.parameters
            .get(parameter)
            .and_then(Option::as_ref)
            .map(|pv| pv.value.as_str())
    }
}

/// An ordered association between objects of the same datastore.
///
/// `members` holds entity ids that resolve against the owning datastore's
/// object cache.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpineRelationship {
    pub id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub name: String,
    pub members: Vec<i64>,
    pub parameters: ParameterMap,
}

impl SpineRelationship {
    #[must_use]
    pub fn value(&self, parameter: &str) -> Option<&str> {
        self.parameters
            .get(parameter)
            .and_then(Option::as_ref)
            .map(|pv| pv.value.as_str())
    }
}

/// A named alternative of a datastore, with the `_alt` suffix stripped.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Owned views handed out of a session
// ---------------------------------------------------------------------------

/// A relationship member with its name resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberRef {
    pub id: i64,
    pub class_name: String,
    pub name: String,
}

/// A relationship with its members resolved to names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RelationshipView {
    pub id: i64,
    pub class_name: String,
    pub name: String,
    pub members: Vec<MemberRef>,
    pub parameters: ParameterMap,
}

/// Objects and relationships of one system snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SystemView {
    pub objects: Vec<SpineObject>,
    pub relationships: Vec<RelationshipView>,
}
