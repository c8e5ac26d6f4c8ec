use std::path::Path;

use libsql::{Builder, Connection, params};

use crate::error::SpineError;
use crate::schema::{self, OBJECT_CLASS_TYPE, RELATIONSHIP_CLASS_TYPE};

/// Writes records straight into a datastore, creating file and tables as
/// needed. Every record is stamped with one commit created on open.
///
/// Used to build template datastores and test fixtures; it bypasses the
/// session cache entirely.
pub struct SeedWriter {
    _db: libsql::Database,
    conn: Connection,
    commit_id: i64,
}

impl SeedWriter {
    /// Open (or create) the datastore at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the parent directory cannot be created or the
    /// schema cannot be applied.
    pub async fn open(path: impl AsRef<Path>, comment: &str) -> Result<Self, SpineError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        schema::initialize(&conn).await?;
        conn.execute(
            "INSERT INTO \"commit\" (comment, date, user) VALUES (?1, datetime('now'), 'seed')",
            params![comment],
        )
        .await?;
        let commit_id = conn.last_insert_rowid();
        Ok(Self {
            _db: db,
            conn,
            commit_id,
        })
    }

    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    async fn insert(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<i64, SpineError> {
        self.conn.execute(sql, params).await?;
        Ok(self.conn.last_insert_rowid())
    }

    async fn class_of(&self, entity_id: i64) -> Result<i64, SpineError> {
        let mut rows = self
            .conn
            .query("SELECT class_id FROM entity WHERE id = ?1", params![entity_id])
            .await?;
        let row = rows.next().await?.ok_or(SpineError::NoResult)?;
        Ok(row.get(0)?)
    }

    pub async fn object_class(&self, name: &str) -> Result<i64, SpineError> {
        self.insert(
            "INSERT INTO entity_class (type_id, name, commit_id) VALUES (?1, ?2, ?3)",
            params![OBJECT_CLASS_TYPE, name, self.commit_id],
        )
        .await
    }

    /// Relationship class whose dimensions are the given object classes.
    pub async fn relationship_class(
        &self,
        name: &str,
        member_classes: &[i64],
    ) -> Result<i64, SpineError> {
        let class_id = self
            .insert(
                "INSERT INTO entity_class (type_id, name, commit_id) VALUES (?1, ?2, ?3)",
                params![RELATIONSHIP_CLASS_TYPE, name, self.commit_id],
            )
            .await?;
        for (dimension, &member_class_id) in (0_i64..).zip(member_classes) {
            self.conn
                .execute(
                    "INSERT INTO relationship_entity_class (entity_class_id, dimension, member_class_id)
                     VALUES (?1, ?2, ?3)",
                    params![class_id, dimension, member_class_id],
                )
                .await?;
        }
        Ok(class_id)
    }

    pub async fn object(&self, class_id: i64, name: &str) -> Result<i64, SpineError> {
        self.insert(
            "INSERT INTO entity (type_id, class_id, name, commit_id) VALUES (?1, ?2, ?3, ?4)",
            params![OBJECT_CLASS_TYPE, class_id, name, self.commit_id],
        )
        .await
    }

    pub async fn relationship(
        &self,
        class_id: i64,
        name: &str,
        members: &[i64],
    ) -> Result<i64, SpineError> {
        let entity_id = self
            .insert(
                "INSERT INTO entity (type_id, class_id, name, commit_id) VALUES (?1, ?2, ?3, ?4)",
                params![RELATIONSHIP_CLASS_TYPE, class_id, name, self.commit_id],
            )
            .await?;
        for (dimension, &member_id) in (0_i64..).zip(members) {
            let member_class_id = self.class_of(member_id).await?;
            self.conn
                .execute(
                    "INSERT INTO relationship_entity
                        (entity_id, entity_class_id, dimension, member_id, member_class_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![entity_id, class_id, dimension, member_id, member_class_id],
                )
                .await?;
        }
        Ok(entity_id)
    }

    pub async fn parameter_definition(&self, class_id: i64, name: &str) -> Result<i64, SpineError> {
        self.insert(
            "INSERT INTO parameter_definition (entity_class_id, name, commit_id) VALUES (?1, ?2, ?3)",
            params![class_id, name, self.commit_id],
        )
        .await
    }

    pub async fn alternative(&self, name: &str) -> Result<i64, SpineError> {
        self.insert(
            "INSERT INTO alternative (name, commit_id) VALUES (?1, ?2)",
            params![name, self.commit_id],
        )
        .await
    }

    /// Store `value` as UTF-8 text.
    pub async fn value(
        &self,
        entity_id: i64,
        definition_id: i64,
        alternative_id: i64,
        value: &str,
    ) -> Result<i64, SpineError> {
        self.value_bytes(entity_id, definition_id, alternative_id, value.as_bytes())
            .await
    }

    /// Store raw bytes as a value.
    pub async fn value_bytes(
        &self,
        entity_id: i64,
        definition_id: i64,
        alternative_id: i64,
        bytes: &[u8],
    ) -> Result<i64, SpineError> {
        let class_id = self.class_of(entity_id).await?;
        self.insert(
            "INSERT INTO parameter_value
                (parameter_definition_id, entity_class_id, entity_id, alternative_id, value, commit_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                definition_id,
                class_id,
                entity_id,
                alternative_id,
                bytes.to_vec(),
                self.commit_id
            ],
        )
        .await
    }
}
