//! # rd-core
//!
//! Core types, risk model and snapshot diffing for ResDEEDS.
//!
//! This crate provides the foundational types shared across all ResDEEDS crates:
//! - Entity structs for the project aggregate (projects, hazards, goals, metrics)
//! - Entity structs for scenario datastore records (objects, relationships, scenarios)
//! - Classification enums (impact, likelihood, risk level, goal comparison)
//! - ID prefix constants and reserved scenario naming rules
//! - The hazard risk matrix and the baseline/proposed snapshot diff
//! - Cross-cutting error types

pub mod diff;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod naming;
pub mod risk;
