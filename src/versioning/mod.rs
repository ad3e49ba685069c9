//! Specification versioning
//!
//! Provides the snapshot store and change detection between snapshots.

pub mod diff;
pub mod store;

pub use diff::changed_operations;
pub use store::{SpecStore, VersionRecord};
