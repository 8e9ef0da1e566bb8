//! Services - classification logic
//!
//! This module contains the core business logic services:
//! - `distance` - Haversine great-circle distance
//! - `classifier` - Inbound/outbound decision and per-run tally
//! - `fleet` - Parallel fan-out of independent per-entity runs

pub mod classifier;
pub mod distance;
pub mod fleet;

// Re-export commonly used types
pub use classifier::{classify, run_classification, ClassificationRun, RunOutcome};
pub use distance::distance;
pub use fleet::{run_entity, run_fleet, EntityBatch, EntityRun, FleetError, ZoneLookup};
