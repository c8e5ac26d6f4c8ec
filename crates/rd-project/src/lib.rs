//! # rd-project
//!
//! Project lifecycle for ResDEEDS.
//!
//! A project is a copy of the template Spine Toolbox workspace plus a record
//! in the application database. [`ProjectCoordinator`] ties the two together:
//! it imports system descriptions, drives the optimization engine, derives
//! hazards and goals from the scenario datastores and loads metric results
//! back into the database.
//!
//! Edits coming from the front-end arrive as flat key/value pairs; [`edits`]
//! parses them into typed [`SystemEdit`] and [`GoalEdit`] values.

mod coordinator;
pub mod edits;
pub mod engine;
pub mod error;
mod layout;
pub mod reports;
pub mod workspace;

pub use coordinator::ProjectCoordinator;
pub use edits::{EditError, GoalEdit, SystemEdit};
pub use engine::{EngineMode, EngineOutcome, OptimizationEngine, ToolboxEngine};
pub use error::ProjectError;
pub use layout::WorkspaceLayout;
pub use reports::{BatchFailure, BatchReport, ImportReport, ResultsReport, RunReport, SkipReason, SkippedResult};
