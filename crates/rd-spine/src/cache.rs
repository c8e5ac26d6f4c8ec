//! Per-datastore entity cache.

use std::collections::HashMap;

use rd_core::entities::{Scenario, SpineObject, SpineRelationship};

/// Loaded records of one datastore.
///
/// Each list is filled once and never grows afterwards, so references handed
/// out stay valid until the cache is dropped.
#[derive(Debug, Default)]
pub(crate) struct LocationCache {
    objects: Option<Vec<SpineObject>>,
    object_index: HashMap<i64, usize>,
    relationships: Option<Vec<SpineRelationship>>,
    relationship_index: HashMap<i64, usize>,
    scenarios: Option<Vec<Scenario>>,
}

pub(crate) fn index_by_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> HashMap<i64, usize> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| (id(item), position))
        .collect()
}

impl LocationCache {
    pub(crate) fn set_objects(&mut self, objects: Vec<SpineObject>) {
        self.object_index = index_by_id(&objects, |o| o.id);
        self.objects = Some(objects);
    }

    pub(crate) fn objects(&self) -> Option<&[SpineObject]> {
        self.objects.as_deref()
    }

    pub(crate) fn object(&self, id: i64) -> Option<&SpineObject> {
        let position = *self.object_index.get(&id)?;
        self.objects.as_ref()?.get(position)
    }

    pub(crate) fn object_mut(&mut self, id: i64) -> Option<&mut SpineObject> {
        let position = *self.object_index.get(&id)?;
        self.objects.as_mut()?.get_mut(position)
    }

    pub(crate) fn set_relationships(&mut self, relationships: Vec<SpineRelationship>) {
        self.relationship_index = index_by_id(&relationships, |r| r.id);
        self.relationships = Some(relationships);
    }

    pub(crate) fn relationships(&self) -> Option<&[SpineRelationship]> {
        self.relationships.as_deref()
    }

    pub(crate) fn relationship(&self, id: i64) -> Option<&SpineRelationship> {
        let position = *self.relationship_index.get(&id)?;
        self.relationships.as_ref()?.get(position)
    }

    pub(crate) fn relationship_mut(&mut self, id: i64) -> Option<&mut SpineRelationship> {
        let position = *self.relationship_index.get(&id)?;
        self.relationships.as_mut()?.get_mut(position)
    }

    pub(crate) fn set_scenarios(&mut self, scenarios: Vec<Scenario>) {
        self.scenarios = Some(scenarios);
    }

    pub(crate) fn scenarios(&self) -> Option<&[Scenario]> {
        self.scenarios.as_deref()
    }
}
