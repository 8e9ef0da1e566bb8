//! Input validation errors for the classifier

use crate::domain::types::ZoneId;
use thiserror::Error;

/// Errors surfaced by `classify` / `run_classification`
///
/// Both are input-validation failures raised before any sample is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeofenceError {
    /// Zone radius is negative
    #[error("invalid zone {zone}: radius {radius_m} m is negative")]
    InvalidZone { zone: ZoneId, radius_m: i64 },

    /// Latitude/longitude outside [-90,90] / [-180,180], or not a number
    #[error("invalid point: latitude {latitude}, longitude {longitude} out of range")]
    InvalidPoint { latitude: f64, longitude: f64 },
}
