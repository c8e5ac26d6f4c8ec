//! Edits submitted as flat key/value pairs.
//!
//! System edits address the current datastore by record id:
//!
//! - `obj.<entity_id>.<parameter>` sets an object parameter.
//! - `rel.obj.<relationship_id>.<member_index>` replaces a relationship member
//!   by object name.
//!
//! Goal edits name a goal as `<hazard>.<metric>`; an empty comparison or
//! target clears the field so it is inherited from the `Base` hazard.

use std::fmt;
use std::str::FromStr;

use rd_core::enums::GoalComparison;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid edit key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("Expected <key>=<value>, got '{0}'")]
    MissingValue(String),

    #[error("Invalid goal '{0}': expected <hazard>.<metric>")]
    InvalidGoalName(String),

    #[error("Invalid comparison '{value}' for goal {goal}")]
    InvalidComparison { goal: String, value: String },

    #[error("Invalid target value '{value}' for goal {goal}")]
    InvalidTarget { goal: String, value: String },
}

fn invalid_key(key: &str, reason: &'static str) -> EditError {
    EditError::InvalidKey {
        key: key.to_string(),
        reason,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SystemEdit {
    ObjectParameter {
        entity_id: i64,
        parameter: String,
        value: String,
    },
    RelationshipMember {
        relationship_id: i64,
        member_index: usize,
        name: String,
    },
}

impl SystemEdit {
    /// Parse a form key and its submitted value.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidKey` for unknown prefixes, non-numeric ids
    /// and missing key segments.
    pub fn parse(key: &str, value: &str) -> Result<Self, EditError> {
        let words: Vec<&str> = key.split('.').collect();
        match words.as_slice() {
            ["obj", id, parameter @ ..] => {
                let entity_id = id
                    .parse()
                    .map_err(|_| invalid_key(key, "entity id is not an integer"))?;
                // Parameter names may themselves contain dots.
                let parameter = parameter.join(".");
                if parameter.is_empty() {
                    return Err(invalid_key(key, "missing parameter name"));
                }
                Ok(Self::ObjectParameter {
                    entity_id,
                    parameter,
                    value: value.to_string(),
                })
            }
            ["rel", "obj", id, index] => Ok(Self::RelationshipMember {
                relationship_id: id
                    .parse()
                    .map_err(|_| invalid_key(key, "relationship id is not an integer"))?,
                member_index: index
                    .parse()
                    .map_err(|_| invalid_key(key, "member index is not a non-negative integer"))?,
                name: value.to_string(),
            }),
            ["rel", ..] => Err(invalid_key(key, "expected rel.obj.<id>.<index>")),
            _ => Err(invalid_key(key, "expected obj.<id>.<parameter> or rel.obj.<id>.<index>")),
        }
    }

    /// Parse `key=value`. Only the first `=` separates key from value.
    ///
    /// # Errors
    ///
    /// Returns `EditError::MissingValue` when there is no `=`, otherwise as
    /// [`SystemEdit::parse`].
    pub fn parse_assignment(assignment: &str) -> Result<Self, EditError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| EditError::MissingValue(assignment.to_string()))?;
        Self::parse(key.trim(), value)
    }
}

impl fmt::Display for SystemEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectParameter {
                entity_id,
                parameter,
                value,
            } => write!(f, "obj.{entity_id}.{parameter}={value}"),
            Self::RelationshipMember {
                relationship_id,
                member_index,
                name,
            } => write!(f, "rel.obj.{relationship_id}.{member_index}={name}"),
        }
    }
}

/// New raw comparison and target for one goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalEdit {
    pub hazard: String,
    pub metric: String,
    pub comparison: Option<GoalComparison>,
    pub target_value: Option<f64>,
}

impl GoalEdit {
    /// Parse a goal name `<hazard>.<metric>` with its submitted comparison
    /// and target value.
    ///
    /// # Errors
    ///
    /// Returns `EditError` when the name has no `.`, the comparison is not a
    /// known operator or the target is not a number.
    pub fn parse(goal: &str, comparison: &str, target_value: &str) -> Result<Self, EditError> {
        let (hazard, metric) = goal
            .split_once('.')
            .filter(|(hazard, metric)| !hazard.is_empty() && !metric.is_empty())
            .ok_or_else(|| EditError::InvalidGoalName(goal.to_string()))?;

        let comparison = match comparison.trim() {
            "" => None,
            text => Some(GoalComparison::from_str(text).map_err(|_| {
                EditError::InvalidComparison {
                    goal: goal.to_string(),
                    value: text.to_string(),
                }
            })?),
        };
        let target_value = match target_value.trim() {
            "" => None,
            text => Some(
                text.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| EditError::InvalidTarget {
                        goal: goal.to_string(),
                        value: text.to_string(),
                    })?,
            ),
        };

        Ok(Self {
            hazard: hazard.to_string(),
            metric: metric.to_string(),
            comparison,
            target_value,
        })
    }

    #[must_use]
    pub fn goal_name(&self) -> String {
        format!("{}.{}", self.hazard, self.metric)
    }
}
