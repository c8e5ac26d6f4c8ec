//! Repository modules implementing persistence for ResDEEDS entities.
//!
//! Each module adds methods to `RdService` via `impl RdService` blocks.

pub mod goal;
pub mod hazard;
pub mod metric;
pub mod project;

pub use hazard::HazardClassification;
