//! Entity structs for ResDEEDS.
//!
//! Two families live here: the project aggregate persisted in the application
//! database (projects, hazards, goals, metrics) and the records read from a
//! scenario datastore (objects, relationships, scenarios). All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema
//! validation.

mod goal;
mod hazard;
mod metric;
mod project;
mod spine;

pub use goal::{Goal, GoalView};
pub use hazard::Hazard;
pub use metric::Metric;
pub use project::Project;
pub use spine::{
    MemberRef, ParameterMap, ParameterValue, RelationshipView, Scenario, SpineObject, SpineRelationship,
    SystemView,
};
