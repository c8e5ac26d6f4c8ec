//! Error types for rd-spine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading a datastore or talking to its connection.
///
/// Rejected writes are not errors; see [`crate::WriteOutcome`].
#[derive(Debug, Error)]
pub enum SpineError {
    /// The datastore file does not exist.
    #[error("Datastore not found: {}", path.display())]
    MissingDatastore { path: PathBuf },

    /// A stored parameter value is not valid UTF-8.
    #[error("Parameter value {value_id} is not valid UTF-8")]
    Decode { value_id: i64 },

    /// A relationship references an entity that is not an object of the same datastore.
    #[error("Relationship {relationship_id} references unknown entity {member_id}")]
    DanglingMember {
        relationship_id: i64,
        member_id: i64,
    },

    /// Lookup of a relationship by id failed.
    #[error("Relationship not found: {0}")]
    UnknownRelationship(i64),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Filesystem error while preparing a datastore.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
