//! Partial-update builders for repo methods.

pub mod goal;

pub use goal::{GoalUpdate, GoalUpdateBuilder};
