//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::RdDb;
use crate::error::DatabaseError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Dependent tables first.
const TABLES: &[&str] = &["goals", "hazards", "metrics", "projects"];

impl RdDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }

    /// Drop every application table and migrate again.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` if a drop or the migration fails.
    pub async fn reset(&self) -> Result<(), DatabaseError> {
        for table in TABLES {
            self.conn
                .execute(&format!("DROP TABLE IF EXISTS {table}"), ())
                .await
                .map_err(|e| DatabaseError::Migration(format!("drop {table}: {e}")))?;
        }
        tracing::info!("application tables dropped");
        self.run_migrations().await
    }
}
