//! Spine table layout.

use crate::error::SpineError;

/// `entity_class.type_id` of object classes.
pub const OBJECT_CLASS_TYPE: i64 = 1;

/// `entity_class.type_id` of relationship classes.
pub const RELATIONSHIP_CLASS_TYPE: i64 = 2;

/// Tables whose rows carry the id of the commit that made them durable.
pub(crate) const COMMIT_STAMPED_TABLES: &[&str] = &[
    "entity_class",
    "entity",
    "parameter_definition",
    "alternative",
    "scenario",
    "scenario_alternative",
    "parameter_value",
];

const SCHEMA_SQL: &str = include_str!("../sql/spine_schema.sql");

/// Create the Spine tables on `conn` if they do not exist yet.
///
/// # Errors
///
/// Returns `SpineError::LibSql` if a statement fails.
pub async fn initialize(conn: &libsql::Connection) -> Result<(), SpineError> {
    conn.execute_batch(SCHEMA_SQL).await?;
    Ok(())
}
