//! Domain models - core geofence types and validation errors
//!
//! This module contains the canonical data types used throughout the system:
//! - `GeoPoint` - latitude/longitude value
//! - `Zone` - circular geofence (center + radius)
//! - `Sample` - one position fix for a tracked entity
//! - `ClassificationResult` / `RunSummary` - classifier output
//! - `GeofenceError` - input validation failures

pub mod error;
pub mod types;

// Re-export commonly used types at module level
pub use error::GeofenceError;
pub use types::{
    Classification, ClassificationResult, EntityId, GeoPoint, RunSummary, Sample, Zone, ZoneId,
};
