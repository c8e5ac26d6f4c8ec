//! # rd-spine
//!
//! Read and write access to Spine scenario datastores.
//!
//! A project keeps several SQLite datastores in the Spine layout: the system
//! as currently edited, the baseline snapshot and the optimization results.
//! [`SpineSession`] opens them lazily, caches their objects and relationships,
//! holds writes in an open transaction per datastore and makes them durable on
//! [`SpineSession::commit`].
//!
//! [`SeedWriter`] creates datastores from scratch; it backs template
//! initialization and test fixtures.

mod cache;
pub mod error;
mod load;
mod location;
pub mod outcome;
pub mod schema;
mod seed;
mod session;

pub use error::SpineError;
pub use location::DatastoreLocation;
pub use outcome::{Rejection, WriteOutcome};
pub use seed::SeedWriter;
pub use session::SpineSession;
