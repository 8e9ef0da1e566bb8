//! Shared types for geofence classification

use crate::domain::error::GeofenceError;
use serde::{Deserialize, Serialize};

/// Newtype wrapper for tracked entity IDs (tracker IMEI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(pub i64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for zone IDs. Opaque to the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        ZoneId(s.to_string())
    }
}

impl From<String> for ZoneId {
    fn from(s: String) -> Self {
        ZoneId(s)
    }
}

/// Latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting coordinates outside [-90,90] / [-180,180] or NaN
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeofenceError> {
        let point = Self { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    /// Check coordinate ranges
    pub fn validate(&self) -> Result<(), GeofenceError> {
        // Range checks are false for NaN, so non-finite values are rejected too
        if (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude) {
            Ok(())
        } else {
            Err(GeofenceError::InvalidPoint { latitude: self.latitude, longitude: self.longitude })
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Circular geofence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub center: GeoPoint,
    /// Radius in meters. Must be non-negative, checked when a run starts.
    pub radius_m: i64,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, center: GeoPoint, radius_m: i64) -> Self {
        Self { id: id.into(), center, radius_m }
    }

    /// Reject negative radius and out-of-range center
    pub fn validate(&self) -> Result<(), GeofenceError> {
        if self.radius_m < 0 {
            return Err(GeofenceError::InvalidZone {
                zone: self.id.clone(),
                radius_m: self.radius_m,
            });
        }
        self.center.validate()
    }
}

/// One reported position for a tracked entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub entity: EntityId,
    pub position: GeoPoint,
    /// Arrival order within the source feed
    pub seq: u64,
}

impl Sample {
    #[inline]
    pub fn new(entity: EntityId, position: GeoPoint, seq: u64) -> Self {
        Self { entity, position, seq }
    }
}

/// Inside/outside decision for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Inbound,
    Outbound,
}

impl Classification {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Inbound => "inbound",
            Classification::Outbound => "outbound",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-sample classifier output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub distance_m: f64,
    pub classification: Classification,
}

/// Inbound/outbound tally for one run
///
/// Counters only grow; a new run starts from `RunSummary::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub inbound: u64,
    pub outbound: u64,
}

impl RunSummary {
    #[inline]
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Inbound => self.inbound += 1,
            Classification::Outbound => self.outbound += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.inbound + self.outbound
    }
}
