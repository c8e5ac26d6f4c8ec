//! Session behaviour against real datastore files.

use libsql::Builder;
use pretty_assertions::assert_eq;
use rd_core::entities::ParameterValue;
use rd_spine::{DatastoreLocation, Rejection, SeedWriter, SpineError, SpineSession, WriteOutcome};
use tempfile::TempDir;

const CURRENT: &str = "items/db/current.sqlite";

/// Ids of the fixture records.
struct Fixture {
    _dir: TempDir,
    location: DatastoreLocation,
    gas: i64,
    wind: i64,
    bus1: i64,
    bus2: i64,
    link: i64,
}

/// Two units, two nodes, one unit__to_node relationship and a couple of
/// values under the Base alternative.
async fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let location = DatastoreLocation::new(dir.path(), CURRENT);
    let seed = SeedWriter::open(location.path(), "fixture").await.unwrap();

    let unit = seed.object_class("unit").await.unwrap();
    let node = seed.object_class("node").await.unwrap();
    let capacity = seed.parameter_definition(unit, "unit_capacity").await.unwrap();
    seed.parameter_definition(unit, "fom_cost").await.unwrap();
    let demand = seed.parameter_definition(node, "demand").await.unwrap();

    let base = seed.alternative("Base").await.unwrap();
    seed.alternative("Hurricane_alt").await.unwrap();

    let gas = seed.object(unit, "gas_turbine").await.unwrap();
    let wind = seed.object(unit, "wind_farm").await.unwrap();
    let bus1 = seed.object(node, "bus1").await.unwrap();
    let bus2 = seed.object(node, "bus2").await.unwrap();

    seed.value(gas, capacity, base, "250.0").await.unwrap();
    seed.value(bus1, demand, base, "80").await.unwrap();

    let unit_to_node = seed.relationship_class("unit__to_node", &[unit, node]).await.unwrap();
    let link = seed
        .relationship(unit_to_node, "gas_turbine__bus1", &[gas, bus1])
        .await
        .unwrap();

    Fixture {
        _dir: dir,
        location,
        gas,
        wind,
        bus1,
        bus2,
        link,
    }
}

async fn commit_messages(location: &DatastoreLocation) -> Vec<String> {
    let db = Builder::new_local(location.path()).build().await.unwrap();
    let conn = db.connect().unwrap();
    let mut rows = conn
        .query("SELECT comment FROM \"commit\" ORDER BY id", ())
        .await
        .unwrap();
    let mut out = Vec::new();
    while let Some(row) = rows.next().await.unwrap() {
        out.push(row.get::<String>(0).unwrap());
    }
    out
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn objects_load_with_all_parameter_slots() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let objects = session.get_objects(&f.location).await.unwrap();
    let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["gas_turbine", "wind_farm", "bus1", "bus2"]);

    let gas = &objects[0];
    assert_eq!(gas.class_name, "unit");
    assert_eq!(gas.value("unit_capacity"), Some("250.0"));
    assert_eq!(gas.parameters.get("fom_cost"), Some(&None));
    assert_eq!(objects[1].parameters.len(), 2);
    assert_eq!(objects[1].value("unit_capacity"), None);
}

#[tokio::test]
async fn repeated_reads_return_the_same_objects() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let first = session.get_objects(&f.location).await.unwrap().as_ptr();
    let second = session.get_objects(&f.location).await.unwrap().as_ptr();
    assert_eq!(first, second);

    let by_id: *const _ = session.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(by_id, first);
}

#[tokio::test]
async fn relationships_reference_cached_objects() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let relationships = session.get_relationships(&f.location).await.unwrap();
    assert_eq!(relationships.len(), 1);
    assert_eq!(relationships[0].members, vec![f.gas, f.bus1]);

    let members = session.members(&f.location, f.link).await.unwrap();
    let names: Vec<_> = members.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["gas_turbine", "bus1"]);
}

#[tokio::test]
async fn scenarios_strip_alternative_suffix() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let names: Vec<_> = session
        .get_scenarios(&f.location)
        .await
        .unwrap()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, vec!["Base", "Hurricane"]);
}

#[tokio::test]
async fn snapshot_resolves_member_names() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let view = session.snapshot(&f.location).await.unwrap();
    assert_eq!(view.objects.len(), 4);
    let members: Vec<_> = view.relationships[0]
        .members
        .iter()
        .map(|m| (m.class_name.as_str(), m.name.as_str()))
        .collect();
    assert_eq!(members, vec![("unit", "gas_turbine"), ("node", "bus1")]);
}

#[tokio::test]
async fn missing_datastore_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut session = SpineSession::new();
    let location = DatastoreLocation::new(dir.path(), "nope.sqlite");

    let err = session.get_objects(&location).await.unwrap_err();
    assert!(matches!(err, SpineError::MissingDatastore { .. }));
    assert!(!location.exists());
}

#[tokio::test]
async fn undecodable_value_fails_the_read() {
    let dir = TempDir::new().unwrap();
    let location = DatastoreLocation::new(dir.path(), "bad.sqlite");
    {
        let seed = SeedWriter::open(location.path(), "fixture").await.unwrap();
        let unit = seed.object_class("unit").await.unwrap();
        let capacity = seed.parameter_definition(unit, "unit_capacity").await.unwrap();
        let base = seed.alternative("Base").await.unwrap();
        let gas = seed.object(unit, "gas_turbine").await.unwrap();
        seed.value_bytes(gas, capacity, base, &[0xff, 0xfe, 0xfd])
            .await
            .unwrap();
    }

    let mut session = SpineSession::new();
    let err = session.get_objects(&location).await.unwrap_err();
    assert!(matches!(err, SpineError::Decode { .. }));
}

// ---------------------------------------------------------------------------
// Object parameter writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_existing_value_refreshes_cache() {
    let f = fixture().await;
    let mut session = SpineSession::new();
    let before = session.object(&f.location, f.gas).await.unwrap().unwrap();
    let value_id = before.parameters["unit_capacity"].as_ref().unwrap().id;

    let outcome = session
        .update_object_parameter(&f.location, f.gas, "unit_capacity", "300.0")
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Applied);

    let after = session.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(
        after.parameters["unit_capacity"],
        Some(ParameterValue::new(value_id, "300.0"))
    );
    assert!(session.has_pending_changes(&f.location));
}

#[tokio::test]
async fn empty_value_clears_slot() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_object_parameter(&f.location, f.gas, "unit_capacity", "")
        .await
        .unwrap();
    assert!(outcome.is_applied());
    let gas = session.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(gas.parameters.get("unit_capacity"), Some(&None));

    session.commit().await.unwrap();
    let mut fresh = SpineSession::new();
    let gas = fresh.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(gas.value("unit_capacity"), None);
}

#[tokio::test]
async fn empty_value_on_unset_slot_is_a_no_op() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_object_parameter(&f.location, f.wind, "fom_cost", "")
        .await
        .unwrap();
    assert!(outcome.is_applied());
    assert!(!session.has_pending_changes(&f.location));
}

#[tokio::test]
async fn unset_slot_gets_new_value_record() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_object_parameter(&f.location, f.wind, "unit_capacity", "40")
        .await
        .unwrap();
    assert!(outcome.is_applied());

    let wind = session.object(&f.location, f.wind).await.unwrap().unwrap();
    let stored = wind.parameters["unit_capacity"].clone().unwrap();
    assert_eq!(stored.value, "40");
    assert!(stored.id > 0);

    session.commit().await.unwrap();
    let mut fresh = SpineSession::new();
    let wind = fresh.object(&f.location, f.wind).await.unwrap().unwrap();
    assert_eq!(wind.parameters["unit_capacity"], Some(stored));
}

#[tokio::test]
async fn unknown_entity_and_parameter_are_rejected() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_object_parameter(&f.location, 9_999, "unit_capacity", "1")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        WriteOutcome::Rejected(Rejection::UnknownEntity { id: 9_999 })
    );

    let outcome = session
        .update_object_parameter(&f.location, f.bus2, "unit_capacity", "1")
        .await
        .unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::MissingParameterDefinition {
            class_name: "node".into(),
            parameter: "unit_capacity".into(),
        })
    );
    assert!(!session.has_pending_changes(&f.location));
}

#[tokio::test]
async fn datastore_without_alternatives_rejects_inserts() {
    let dir = TempDir::new().unwrap();
    let location = DatastoreLocation::new(dir.path(), "bare.sqlite");
    let gas = {
        let seed = SeedWriter::open(location.path(), "fixture").await.unwrap();
        let unit = seed.object_class("unit").await.unwrap();
        seed.parameter_definition(unit, "unit_capacity").await.unwrap();
        seed.object(unit, "gas_turbine").await.unwrap()
    };

    let mut session = SpineSession::new();
    let outcome = session
        .update_object_parameter(&location, gas, "unit_capacity", "1")
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Rejected(Rejection::NoAlternative));
}

// ---------------------------------------------------------------------------
// Relationship writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn relationship_member_is_replaced_and_persisted() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_relationship_object(&f.location, f.link, 1, "bus2")
        .await
        .unwrap();
    assert!(outcome.is_applied());
    let members = session.members(&f.location, f.link).await.unwrap();
    assert_eq!(members[1].id, f.bus2);

    session.commit().await.unwrap();
    let mut fresh = SpineSession::new();
    let relationships = fresh.get_relationships(&f.location).await.unwrap();
    assert_eq!(relationships[0].members, vec![f.gas, f.bus2]);
}

#[tokio::test]
async fn relationship_member_lookup_stays_within_class() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    // "wind_farm" exists, but as a unit, not a node.
    let outcome = session
        .update_relationship_object(&f.location, f.link, 1, "wind_farm")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        WriteOutcome::Rejected(Rejection::MemberNotFound {
            class_name: "node".into(),
            name: "wind_farm".into(),
        })
    );

    let outcome = session
        .update_relationship_object(&f.location, f.link, 0, "wind_farm")
        .await
        .unwrap();
    assert!(outcome.is_applied());
}

#[tokio::test]
async fn relationship_rejections() {
    let f = fixture().await;
    let mut session = SpineSession::new();

    let outcome = session
        .update_relationship_object(&f.location, f.link, 2, "bus2")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        WriteOutcome::Rejected(Rejection::MemberIndexOutOfRange {
            id: f.link,
            index: 2,
            len: 2,
        })
    );

    let outcome = session
        .update_relationship_object(&f.location, 4_242, 0, "bus2")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        WriteOutcome::Rejected(Rejection::UnknownRelationship { id: 4_242 })
    );
}

// ---------------------------------------------------------------------------
// Commit / visibility
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_are_invisible_to_other_sessions_until_commit() {
    let f = fixture().await;
    let mut writer = SpineSession::new();
    writer
        .update_object_parameter(&f.location, f.gas, "unit_capacity", "999")
        .await
        .unwrap();

    let mut reader = SpineSession::new();
    let gas = reader.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(gas.value("unit_capacity"), Some("250.0"));
    reader.release().await;

    assert_eq!(writer.commit().await.unwrap(), 1);
    assert!(!writer.has_pending_changes(&f.location));

    let mut reader = SpineSession::new();
    let gas = reader.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(gas.value("unit_capacity"), Some("999"));

    let messages = commit_messages(&f.location).await;
    assert_eq!(messages, vec!["fixture", "Handled request."]);
}

#[tokio::test]
async fn commit_without_writes_is_a_no_op() {
    let f = fixture().await;
    let mut session = SpineSession::new();
    session.get_objects(&f.location).await.unwrap();

    assert_eq!(session.commit().await.unwrap(), 0);
    assert_eq!(commit_messages(&f.location).await, vec!["fixture"]);

    // Caches survive the commit.
    assert_eq!(session.get_objects(&f.location).await.unwrap().len(), 4);
}

#[tokio::test]
async fn release_discards_uncommitted_writes() {
    let f = fixture().await;
    let mut session = SpineSession::new();
    session
        .update_object_parameter(&f.location, f.gas, "unit_capacity", "1")
        .await
        .unwrap();

    session.release().await;
    assert!(!session.has_pending_changes(&f.location));

    let gas = session.object(&f.location, f.gas).await.unwrap().unwrap();
    assert_eq!(gas.value("unit_capacity"), Some("250.0"));
}
