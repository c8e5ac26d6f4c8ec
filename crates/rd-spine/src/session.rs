//! Cached, transactional view over several Spine datastores.

use std::collections::HashMap;

use libsql::{Builder, Connection, params};
use rd_core::entities::{
    MemberRef, ParameterValue, RelationshipView, Scenario, SpineObject, SpineRelationship,
    SystemView,
};
use rd_core::naming::COMMIT_MESSAGE;
use tracing::{debug, info, warn};

use crate::cache::LocationCache;
use crate::error::SpineError;
use crate::load;
use crate::location::DatastoreLocation;
use crate::outcome::{Rejection, WriteOutcome};
use crate::schema::COMMIT_STAMPED_TABLES;

const DEFAULT_COMMIT_USER: &str = "resdeeds";

struct Handle {
    _db: libsql::Database,
    conn: Connection,
    /// A `BEGIN` has been issued and not yet committed.
    pending: bool,
}

/// Session over any number of datastore locations.
///
/// Each location gets one connection, opened on first use. Reads are cached
/// per location: the first `get_objects` call loads everything and later
/// calls return the same objects. Writes update the cache in place and run
/// inside a transaction that stays open until [`SpineSession::commit`], so no
/// other connection observes them earlier. Dropping the session or calling
/// [`SpineSession::release`] rolls uncommitted writes back.
///
/// A session does not lock its locations. Callers must make sure no two
/// sessions write the same location at the same time.
pub struct SpineSession {
    user: String,
    handles: HashMap<DatastoreLocation, Handle>,
    caches: HashMap<DatastoreLocation, LocationCache>,
}

impl Default for SpineSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SpineSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_user(DEFAULT_COMMIT_USER)
    }

    /// Session whose commits are recorded under `user`.
    pub fn with_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            handles: HashMap::new(),
            caches: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    async fn connection(&mut self, location: &DatastoreLocation) -> Result<Connection, SpineError> {
        if let Some(handle) = self.handles.get(location) {
            return Ok(handle.conn.clone());
        }
        let path = location.path();
        if !path.exists() {
            return Err(SpineError::MissingDatastore { path });
        }
        let db = Builder::new_local(&path).build().await?;
        let conn = db.connect()?;
        debug!(location = %location, "opened datastore");
        self.handles.insert(
            location.clone(),
            Handle {
                _db: db,
                conn: conn.clone(),
                pending: false,
            },
        );
        Ok(conn)
    }

    /// Connection with a write transaction open.
    async fn begin(&mut self, location: &DatastoreLocation) -> Result<Connection, SpineError> {
        let conn = self.connection(location).await?;
        if let Some(handle) = self.handles.get_mut(location) {
            if !handle.pending {
                conn.execute("BEGIN", ()).await?;
                handle.pending = true;
            }
        }
        Ok(conn)
    }

    /// Whether `location` holds writes that are not committed yet.
    #[must_use]
    pub fn has_pending_changes(&self, location: &DatastoreLocation) -> bool {
        self.handles.get(location).is_some_and(|handle| handle.pending)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    fn cache(&self, location: &DatastoreLocation) -> Option<&LocationCache> {
        self.caches.get(location)
    }

    async fn ensure_objects(&mut self, location: &DatastoreLocation) -> Result<(), SpineError> {
        if self.cache(location).and_then(LocationCache::objects).is_some() {
            return Ok(());
        }
        let conn = self.connection(location).await?;
        let objects = load::objects(&conn).await?;
        debug!(location = %location, count = objects.len(), "loaded objects");
        self.caches
            .entry(location.clone())
            .or_default()
            .set_objects(objects);
        Ok(())
    }

    async fn ensure_relationships(
        &mut self,
        location: &DatastoreLocation,
    ) -> Result<(), SpineError> {
        self.ensure_objects(location).await?;
        if self.cache(location).and_then(LocationCache::relationships).is_some() {
            return Ok(());
        }
        let conn = self.connection(location).await?;
        let relationships = load::relationships(&conn).await?;
        let cache = self.caches.entry(location.clone()).or_default();
        for relationship in &relationships {
            if let Some(&member_id) = relationship
                .members
                .iter()
                .find(|&&member| cache.object(member).is_none())
            {
                return Err(SpineError::DanglingMember {
                    relationship_id: relationship.id,
                    member_id,
                });
            }
        }
        debug!(location = %location, count = relationships.len(), "loaded relationships");
        cache.set_relationships(relationships);
        Ok(())
    }

    /// Objects of `location` in id order. Loaded on first call, cached after.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the datastore cannot be opened or holds
    /// undecodable values.
    pub async fn get_objects(
        &mut self,
        location: &DatastoreLocation,
    ) -> Result<&[SpineObject], SpineError> {
        self.ensure_objects(location).await?;
        Ok(self
            .cache(location)
            .and_then(LocationCache::objects)
            .unwrap_or_default())
    }

    /// Relationships of `location` in id order. Loads objects first.
    ///
    /// # Errors
    ///
    /// Returns `SpineError::DanglingMember` if a member is not a cached object.
    pub async fn get_relationships(
        &mut self,
        location: &DatastoreLocation,
    ) -> Result<&[SpineRelationship], SpineError> {
        self.ensure_relationships(location).await?;
        Ok(self
            .cache(location)
            .and_then(LocationCache::relationships)
            .unwrap_or_default())
    }

    /// Scenarios named after the alternatives of `location`.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the datastore cannot be read.
    pub async fn get_scenarios(
        &mut self,
        location: &DatastoreLocation,
    ) -> Result<&[Scenario], SpineError> {
        if self.cache(location).and_then(LocationCache::scenarios).is_none() {
            let conn = self.connection(location).await?;
            let scenarios = load::scenarios(&conn).await?;
            self.caches
                .entry(location.clone())
                .or_default()
                .set_scenarios(scenarios);
        }
        Ok(self
            .cache(location)
            .and_then(LocationCache::scenarios)
            .unwrap_or_default())
    }

    /// Object by id.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the objects cannot be loaded.
    pub async fn object(
        &mut self,
        location: &DatastoreLocation,
        id: i64,
    ) -> Result<Option<&SpineObject>, SpineError> {
        self.ensure_objects(location).await?;
        Ok(self.cache(location).and_then(|cache| cache.object(id)))
    }

    /// First object named `name`, in id order.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the objects cannot be loaded.
    pub async fn find_object_by_name(
        &mut self,
        location: &DatastoreLocation,
        name: &str,
    ) -> Result<Option<&SpineObject>, SpineError> {
        let objects = self.get_objects(location).await?;
        Ok(objects.iter().find(|object| object.name == name))
    }

    /// Member objects of a relationship, in dimension order.
    ///
    /// # Errors
    ///
    /// Returns `SpineError::UnknownRelationship` if `relationship_id` is not
    /// a relationship of `location`.
    pub async fn members(
        &mut self,
        location: &DatastoreLocation,
        relationship_id: i64,
    ) -> Result<Vec<&SpineObject>, SpineError> {
        self.ensure_relationships(location).await?;
        let cache = self
            .cache(location)
            .ok_or(SpineError::UnknownRelationship(relationship_id))?;
        let relationship = cache
            .relationship(relationship_id)
            .ok_or(SpineError::UnknownRelationship(relationship_id))?;
        relationship
            .members
            .iter()
            .map(|&member_id| {
                cache.object(member_id).ok_or(SpineError::DanglingMember {
                    relationship_id,
                    member_id,
                })
            })
            .collect()
    }

    /// Owned copy of the objects and relationships of `location`, with
    /// relationship members resolved to names.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` if the datastore cannot be loaded.
    pub async fn snapshot(&mut self, location: &DatastoreLocation) -> Result<SystemView, SpineError> {
        self.ensure_relationships(location).await?;
        let Some(cache) = self.cache(location) else {
            return Ok(SystemView::default());
        };
        let objects = cache.objects().unwrap_or_default().to_vec();
        let mut relationships = Vec::new();
        for relationship in cache.relationships().unwrap_or_default() {
            let mut members = Vec::with_capacity(relationship.members.len());
            for &member_id in &relationship.members {
                let member = cache.object(member_id).ok_or(SpineError::DanglingMember {
                    relationship_id: relationship.id,
                    member_id,
                })?;
                members.push(MemberRef {
                    id: member.id,
                    class_name: member.class_name.clone(),
                    name: member.name.clone(),
                });
            }
            relationships.push(RelationshipView {
                id: relationship.id,
                class_name: relationship.class_name.clone(),
                name: relationship.name.clone(),
                members,
                parameters: relationship.parameters.clone(),
            });
        }
        Ok(SystemView {
            objects,
            relationships,
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    fn set_slot(
        &mut self,
        location: &DatastoreLocation,
        entity_id: i64,
        parameter: &str,
        value: Option<ParameterValue>,
    ) {
        if let Some(object) = self
            .caches
            .get_mut(location)
            .and_then(|cache| cache.object_mut(entity_id))
        {
            object.parameters.insert(parameter.to_string(), value);
        }
    }

    /// Set, replace or clear one parameter value of an object.
    ///
    /// An empty `value` clears the slot. A slot without a stored value gets a
    /// new value record attached to the alternative of the lowest-id value in
    /// the datastore (or the first alternative if there are no values yet).
    ///
    /// # Errors
    ///
    /// Returns `SpineError` only when the datastore cannot be opened or read.
    /// Writes that cannot be applied come back as [`WriteOutcome::Rejected`].
    pub async fn update_object_parameter(
        &mut self,
        location: &DatastoreLocation,
        entity_id: i64,
        parameter: &str,
        value: &str,
    ) -> Result<WriteOutcome, SpineError> {
        self.ensure_objects(location).await?;
        let Some(object) = self.cache(location).and_then(|cache| cache.object(entity_id)) else {
            warn!(location = %location, entity_id, "update of unknown object");
            return Ok(Rejection::UnknownEntity { id: entity_id }.into());
        };
        let class_id = object.class_id;
        let class_name = object.class_name.clone();
        let current = object.parameters.get(parameter).cloned().flatten();

        match current {
            Some(existing) if value.is_empty() => {
                let conn = self.begin(location).await?;
                if let Err(error) = conn
                    .execute(
                        "DELETE FROM parameter_value WHERE id = ?1",
                        params![existing.id],
                    )
                    .await
                {
                    return Ok(store_failed(location, &error));
                }
                self.set_slot(location, entity_id, parameter, None);
                debug!(location = %location, entity_id, parameter, "cleared parameter");
            }
            None if value.is_empty() => {
                debug!(location = %location, entity_id, parameter, "parameter already unset");
            }
            Some(existing) => {
                let conn = self.begin(location).await?;
                if let Err(error) = conn
                    .execute(
                        "UPDATE parameter_value SET value = ?1, commit_id = NULL WHERE id = ?2",
                        params![value.as_bytes().to_vec(), existing.id],
                    )
                    .await
                {
                    return Ok(store_failed(location, &error));
                }
                self.set_slot(
                    location,
                    entity_id,
                    parameter,
                    Some(ParameterValue::new(existing.id, value)),
                );
                debug!(location = %location, entity_id, parameter, "updated parameter");
            }
            None => {
                let conn = self.connection(location).await?;
                let Some(definition_id) = load::definition_id(&conn, class_id, parameter).await?
                else {
                    warn!(location = %location, class = %class_name, parameter, "no parameter definition");
                    return Ok(Rejection::MissingParameterDefinition {
                        class_name,
                        parameter: parameter.to_string(),
                    }
                    .into());
                };
                let Some(alternative_id) = load::any_alternative(&conn).await? else {
                    warn!(location = %location, "datastore has no alternatives");
                    return Ok(Rejection::NoAlternative.into());
                };
                let conn = self.begin(location).await?;
                if let Err(error) = conn
                    .execute(
                        "INSERT INTO parameter_value
                            (parameter_definition_id, entity_class_id, entity_id, alternative_id, value)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            definition_id,
                            class_id,
                            entity_id,
                            alternative_id,
                            value.as_bytes().to_vec()
                        ],
                    )
                    .await
                {
                    return Ok(store_failed(location, &error));
                }
                let value_id = conn.last_insert_rowid();
                self.set_slot(
                    location,
                    entity_id,
                    parameter,
                    Some(ParameterValue::new(value_id, value)),
                );
                debug!(location = %location, entity_id, parameter, value_id, "inserted parameter");
            }
        }
        Ok(WriteOutcome::Applied)
    }

    /// Replace the member at `member_index` of a relationship with the object
    /// named `new_name`.
    ///
    /// Candidates are restricted to the class of the member being replaced.
    /// The whole membership is rewritten in the datastore.
    ///
    /// # Errors
    ///
    /// Returns `SpineError` only when the datastore cannot be opened or read.
    pub async fn update_relationship_object(
        &mut self,
        location: &DatastoreLocation,
        relationship_id: i64,
        member_index: usize,
        new_name: &str,
    ) -> Result<WriteOutcome, SpineError> {
        self.ensure_relationships(location).await?;
        let Some(cache) = self.cache(location) else {
            return Ok(Rejection::UnknownRelationship {
                id: relationship_id,
            }
            .into());
        };
        let plan = match plan_member_change(cache, relationship_id, member_index, new_name)? {
            Ok(plan) => plan,
            Err(rejection) => {
                warn!(location = %location, relationship_id, %rejection, "relationship update rejected");
                return Ok(rejection.into());
            }
        };

        let conn = self.begin(location).await?;
        if let Err(error) = push_membership(&conn, relationship_id, &plan).await {
            return Ok(store_failed(location, &error));
        }
        if let Some(relationship) = self
            .caches
            .get_mut(location)
            .and_then(|cache| cache.relationship_mut(relationship_id))
        {
            relationship.members = plan.members;
        }
        debug!(location = %location, relationship_id, member_index, new_name, "replaced member");
        Ok(WriteOutcome::Applied)
    }

    // -----------------------------------------------------------------------
    // Commit / release
    // -----------------------------------------------------------------------

    /// Make pending writes durable and release every connection.
    ///
    /// Each location with pending writes gets one commit record carrying the
    /// fixed commit message. Caches are kept. Returns the number of locations
    /// committed; zero when nothing was pending.
    ///
    /// # Errors
    ///
    /// Returns `SpineError::LibSql` if a commit fails. Locations not committed
    /// yet are rolled back when their connections are released.
    pub async fn commit(&mut self) -> Result<usize, SpineError> {
        let handles = std::mem::take(&mut self.handles);
        let mut committed = 0;
        for (location, handle) in handles {
            if !handle.pending {
                continue;
            }
            let commit_id = commit_location(&handle.conn, &self.user).await?;
            committed += 1;
            info!(location = %location, commit_id, "committed datastore");
        }
        Ok(committed)
    }

    /// Drop every connection and cache, rolling back uncommitted writes.
    pub async fn release(&mut self) {
        for (location, handle) in self.handles.drain() {
            if !handle.pending {
                continue;
            }
            match handle.conn.execute("ROLLBACK", ()).await {
                Ok(_) => warn!(location = %location, "discarded uncommitted writes"),
                Err(error) => warn!(location = %location, %error, "rollback failed"),
            }
        }
        self.caches.clear();
    }
}

impl Drop for SpineSession {
    fn drop(&mut self) {
        for (location, handle) in &self.handles {
            if handle.pending {
                warn!(location = %location, "session dropped with uncommitted writes");
            }
        }
    }
}

/// Record a commit row, stamp the rows written since the last commit and end
/// the transaction. Returns the commit id.
async fn commit_location(conn: &Connection, user: &str) -> Result<i64, SpineError> {
    conn.execute(
        "INSERT INTO \"commit\" (comment, date, user) VALUES (?1, datetime('now'), ?2)",
        params![COMMIT_MESSAGE, user],
    )
    .await?;
    let commit_id = conn.last_insert_rowid();
    for table in COMMIT_STAMPED_TABLES {
        conn.execute(
            &format!("UPDATE {table} SET commit_id = ?1 WHERE commit_id IS NULL"),
            params![commit_id],
        )
        .await?;
    }
    conn.execute("COMMIT", ()).await?;
    Ok(commit_id)
}

fn store_failed(location: &DatastoreLocation, error: &libsql::Error) -> WriteOutcome {
    warn!(location = %location, %error, "datastore write failed");
    Rejection::StoreFailed {
        message: error.to_string(),
    }
    .into()
}

/// New membership of a relationship, with each member's class.
struct MemberChange {
    class_id: i64,
    members: Vec<i64>,
    member_classes: Vec<i64>,
}

fn plan_member_change(
    cache: &LocationCache,
    relationship_id: i64,
    member_index: usize,
    new_name: &str,
) -> Result<Result<MemberChange, Rejection>, SpineError> {
    let Some(relationship) = cache.relationship(relationship_id) else {
        return Ok(Err(Rejection::UnknownRelationship {
            id: relationship_id,
        }));
    };
    let Some(&current) = relationship.members.get(member_index) else {
        return Ok(Err(Rejection::MemberIndexOutOfRange {
            id: relationship_id,
            index: member_index,
            len: relationship.members.len(),
        }));
    };
    let dangling = |member_id| SpineError::DanglingMember {
        relationship_id,
        member_id,
    };
    let current = cache.object(current).ok_or_else(|| dangling(current))?;

    let candidates: Vec<&SpineObject> = cache
        .objects()
        .unwrap_or_default()
        .iter()
        .filter(|object| object.class_id == current.class_id && object.name == new_name)
        .collect();
    let replacement = match candidates.as_slice() {
        [] => {
            return Ok(Err(Rejection::MemberNotFound {
                class_name: current.class_name.clone(),
                name: new_name.to_string(),
            }));
        }
        [only] => only.id,
        many => {
            return Ok(Err(Rejection::AmbiguousMember {
                class_name: current.class_name.clone(),
                name: new_name.to_string(),
                count: many.len(),
            }));
        }
    };

    let mut members = relationship.members.clone();
    members[member_index] = replacement;
    let member_classes = members
        .iter()
        .map(|&id| cache.object(id).map(|o| o.class_id).ok_or_else(|| dangling(id)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Ok(MemberChange {
        class_id: relationship.class_id,
        members,
        member_classes,
    }))
}

async fn push_membership(
    conn: &Connection,
    relationship_id: i64,
    change: &MemberChange,
) -> Result<(), libsql::Error> {
    conn.execute("SAVEPOINT membership", ()).await?;
    let result = async {
        conn.execute(
            "DELETE FROM relationship_entity WHERE entity_id = ?1",
            params![relationship_id],
        )
        .await?;
        for (dimension, (&member_id, &member_class_id)) in change
            .members
            .iter()
            .zip(&change.member_classes)
            .enumerate()
        {
            conn.execute(
                "INSERT INTO relationship_entity
                    (entity_id, entity_class_id, dimension, member_id, member_class_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    relationship_id,
                    change.class_id,
                    i64::try_from(dimension).unwrap_or(i64::MAX),
                    member_id,
                    member_class_id
                ],
            )
            .await?;
        }
        conn.execute(
            "UPDATE entity SET commit_id = NULL WHERE id = ?1",
            params![relationship_id],
        )
        .await?;
        Ok(())
    }
    .await;
    match result {
        Ok(()) => {
            conn.execute("RELEASE membership", ()).await?;
            Ok(())
        }
        Err(error) => {
            conn.execute("ROLLBACK TO membership", ()).await?;
            conn.execute("RELEASE membership", ()).await?;
            Err(error)
        }
    }
}
