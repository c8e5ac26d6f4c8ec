//! # rd-db
//!
//! libSQL persistence for ResDEEDS application state: projects, the metrics
//! discovered in their results datastores, and the hazards and goals derived
//! from their scenarios.
//!
//! Scenario datastores themselves are handled by `rd-spine`; this crate only
//! stores what the application derives from them.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for application state.
pub struct RdDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RdDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Cascading deletes need foreign keys, which are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let rd_db = Self { db, conn };
        rd_db.run_migrations().await?;
        Ok(rd_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"haz-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::ids::{PREFIX_HAZARD, has_prefix};

    #[tokio::test]
    async fn generated_ids_are_prefixed_and_distinct() {
        let db = RdDb::open_local(":memory:").await.unwrap();
        let a = db.generate_id(PREFIX_HAZARD).await.unwrap();
        let b = db.generate_id(PREFIX_HAZARD).await.unwrap();
        assert!(has_prefix(&a, PREFIX_HAZARD), "{a}");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = RdDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();
        db.reset().await.unwrap();
        let mut rows = db
            .conn()
            .query(
                "SELECT count(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('projects', 'hazards', 'goals', 'metrics')",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 4);
    }
}
