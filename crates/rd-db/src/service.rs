//! Service layer for application state.
//!
//! `RdService` wraps `RdDb`. All repo methods are implemented as
//! `impl RdService` blocks in `crate::repos`.

use crate::RdDb;
use crate::error::DatabaseError;

pub struct RdService {
    db: RdDb,
}

impl RdService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// With `drop_and_recreate` every application table is dropped and
    /// recreated first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, drop_and_recreate: bool) -> Result<Self, DatabaseError> {
        let db = RdDb::open_local(db_path).await?;
        if drop_and_recreate {
            db.reset().await?;
        }
        Ok(Self { db })
    }

    #[must_use]
    pub const fn from_db(db: RdDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RdDb {
        &self.db
    }
}
