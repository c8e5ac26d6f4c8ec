//! Full loads of a datastore's objects, relationships and scenarios.

use std::collections::HashMap;

use libsql::{Connection, Value, params};
use rd_core::entities::{ParameterMap, ParameterValue, Scenario, SpineObject, SpineRelationship};
use rd_core::naming;

use crate::cache::index_by_id;
use crate::error::SpineError;
use crate::schema::{OBJECT_CLASS_TYPE, RELATIONSHIP_CLASS_TYPE};

struct EntityRow {
    id: i64,
    class_id: i64,
    class_name: String,
    name: String,
}

async fn entities(conn: &Connection, class_type: i64) -> Result<Vec<EntityRow>, SpineError> {
    let mut rows = conn
        .query(
            "SELECT e.id, e.class_id, c.name, e.name
             FROM entity e JOIN entity_class c ON c.id = e.class_id
             WHERE c.type_id = ?1
             ORDER BY e.id",
            params![class_type],
        )
        .await?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(EntityRow {
            id: row.get(0)?,
            class_id: row.get(1)?,
            class_name: row.get(2)?,
            name: row.get(3)?,
        });
    }
    Ok(out)
}

/// Parameter names per class id, in definition order.
async fn definitions(
    conn: &Connection,
    class_type: i64,
) -> Result<HashMap<i64, Vec<String>>, SpineError> {
    let mut rows = conn
        .query(
            "SELECT d.entity_class_id, d.name
             FROM parameter_definition d JOIN entity_class c ON c.id = d.entity_class_id
             WHERE c.type_id = ?1
             ORDER BY d.id",
            params![class_type],
        )
        .await?;
    let mut out: HashMap<i64, Vec<String>> = HashMap::new();
    while let Some(row) = rows.next().await? {
        out.entry(row.get(0)?).or_default().push(row.get(1)?);
    }
    Ok(out)
}

struct ValueRow {
    id: i64,
    entity_id: i64,
    parameter: String,
    value: Option<String>,
}

/// Decode a stored value. Values are written as UTF-8 blobs; text and numeric
/// storage classes from other writers are accepted as well.
pub(crate) fn decode_value(value_id: i64, value: Value) -> Result<Option<String>, SpineError> {
    match value {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        Value::Integer(i) => Ok(Some(i.to_string())),
        Value::Real(r) => Ok(Some(r.to_string())),
        Value::Blob(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| SpineError::Decode { value_id }),
    }
}

async fn values(conn: &Connection, class_type: i64) -> Result<Vec<ValueRow>, SpineError> {
    let mut rows = conn
        .query(
            "SELECT v.id, v.entity_id, d.name, v.value
             FROM parameter_value v
             JOIN parameter_definition d ON d.id = v.parameter_definition_id
             JOIN entity_class c ON c.id = d.entity_class_id
             WHERE c.type_id = ?1
             ORDER BY v.id",
            params![class_type],
        )
        .await?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let id: i64 = row.get(0)?;
        out.push(ValueRow {
            id,
            entity_id: row.get(1)?,
            parameter: row.get(2)?,
            value: decode_value(id, row.get_value(3)?)?,
        });
    }
    Ok(out)
}

fn empty_slots(definitions: &HashMap<i64, Vec<String>>, class_id: i64) -> ParameterMap {
    definitions
        .get(&class_id)
        .map(|names| names.iter().map(|name| (name.clone(), None)).collect())
        .unwrap_or_default()
}

/// Fill slots from stored values. Values of entities missing from `index`
/// are ignored. When several alternatives hold a value, the highest id wins.
fn apply_values<T>(
    values: Vec<ValueRow>,
    items: &mut [T],
    index: &HashMap<i64, usize>,
    slots: fn(&mut T) -> &mut ParameterMap,
) {
    for row in values {
        let Some(value) = row.value else {
            continue;
        };
        if let Some(&position) = index.get(&row.entity_id) {
            slots(&mut items[position])
                .insert(row.parameter, Some(ParameterValue::new(row.id, value)));
        }
    }
}

/// Load every object with its parameter slots, ordered by id.
pub(crate) async fn objects(conn: &Connection) -> Result<Vec<SpineObject>, SpineError> {
    let definitions = definitions(conn, OBJECT_CLASS_TYPE).await?;
    let mut objects: Vec<SpineObject> = entities(conn, OBJECT_CLASS_TYPE)
        .await?
        .into_iter()
        .map(|row| SpineObject {
            parameters: empty_slots(&definitions, row.class_id),
            id: row.id,
            class_id: row.class_id,
            class_name: row.class_name,
            name: row.name,
        })
        .collect();

    let index = index_by_id(&objects, |o| o.id);
    let values = values(conn, OBJECT_CLASS_TYPE).await?;
    apply_values(values, &mut objects, &index, |o| &mut o.parameters);
    Ok(objects)
}

/// Load every relationship with its ordered members and parameter slots.
///
/// Member ids are not checked here; the caller validates them against the
/// object cache of the same datastore.
pub(crate) async fn relationships(conn: &Connection) -> Result<Vec<SpineRelationship>, SpineError> {
    let definitions = definitions(conn, RELATIONSHIP_CLASS_TYPE).await?;
    let mut relationships: Vec<SpineRelationship> = entities(conn, RELATIONSHIP_CLASS_TYPE)
        .await?
        .into_iter()
        .map(|row| SpineRelationship {
            parameters: empty_slots(&definitions, row.class_id),
            id: row.id,
            class_id: row.class_id,
            class_name: row.class_name,
            name: row.name,
            members: Vec::new(),
        })
        .collect();
    let index = index_by_id(&relationships, |r| r.id);

    let mut rows = conn
        .query(
            "SELECT entity_id, member_id FROM relationship_entity ORDER BY entity_id, dimension",
            (),
        )
        .await?;
    while let Some(row) = rows.next().await? {
        let entity_id: i64 = row.get(0)?;
        if let Some(&position) = index.get(&entity_id) {
            relationships[position].members.push(row.get(1)?);
        }
    }

    let values = values(conn, RELATIONSHIP_CLASS_TYPE).await?;
    apply_values(values, &mut relationships, &index, |r| &mut r.parameters);
    Ok(relationships)
}

/// Scenarios named after the datastore's alternatives, in id order.
pub(crate) async fn scenarios(conn: &Connection) -> Result<Vec<Scenario>, SpineError> {
    let mut rows = conn
        .query("SELECT name FROM alternative ORDER BY id", ())
        .await?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let name: String = row.get(0)?;
        out.push(Scenario {
            name: naming::scenario_name(&name).to_string(),
        });
    }
    Ok(out)
}

/// Id of the parameter definition `name` of class `class_id`.
pub(crate) async fn definition_id(
    conn: &Connection,
    class_id: i64,
    name: &str,
) -> Result<Option<i64>, SpineError> {
    let mut rows = conn
        .query(
            "SELECT id FROM parameter_definition WHERE entity_class_id = ?1 AND name = ?2",
            params![class_id, name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

/// Alternative for a new value: the one used by the lowest-id stored value,
/// or the lowest-id alternative when no value exists yet.
pub(crate) async fn any_alternative(conn: &Connection) -> Result<Option<i64>, SpineError> {
    let mut rows = conn
        .query(
            "SELECT alternative_id FROM parameter_value ORDER BY id LIMIT 1",
            (),
        )
        .await?;
    if let Some(row) = rows.next().await? {
        return Ok(Some(row.get(0)?));
    }
    let mut rows = conn
        .query("SELECT id FROM alternative ORDER BY id LIMIT 1", ())
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}
