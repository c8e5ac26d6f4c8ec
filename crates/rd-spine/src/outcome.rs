//! Results of datastore writes.
//!
//! A write that cannot be applied is reported as a [`Rejection`] value so
//! callers applying many edits can record it and keep going.

use serde::Serialize;
use thiserror::Error;

/// Why a write was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("no object with id {id}")]
    UnknownEntity { id: i64 },

    #[error("class '{class_name}' has no parameter '{parameter}'")]
    MissingParameterDefinition {
        class_name: String,
        parameter: String,
    },

    #[error("datastore has no alternative to attach a new value to")]
    NoAlternative,

    #[error("no relationship with id {id}")]
    UnknownRelationship { id: i64 },

    #[error("relationship {id} has {len} members, index {index} is out of range")]
    MemberIndexOutOfRange { id: i64, index: usize, len: usize },

    #[error("no '{class_name}' object named '{name}'")]
    MemberNotFound { class_name: String, name: String },

    #[error("{count} '{class_name}' objects are named '{name}'")]
    AmbiguousMember {
        class_name: String,
        name: String,
        count: usize,
    },

    #[error("datastore refused the write: {message}")]
    StoreFailed { message: String },
}

/// Outcome of a single write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "rejection", rename_all = "snake_case")]
pub enum WriteOutcome {
    Applied,
    Rejected(Rejection),
}

impl WriteOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl From<Rejection> for WriteOutcome {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}
