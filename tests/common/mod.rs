//! Shared helpers for integration tests

use geofence_inout::domain::types::GeoPoint;
use geofence_inout::services::distance::{distance, EARTH_RADIUS_M};

/// Point due north of `origin` whose computed distance is the first
/// representable value not below `meters`
pub fn north_of(origin: GeoPoint, meters: f64) -> GeoPoint {
    let mut latitude = origin.latitude + (meters / EARTH_RADIUS_M).to_degrees();
    for _ in 0..10_000 {
        let p = GeoPoint { latitude, longitude: origin.longitude };
        if distance(&origin, &p) >= meters {
            return p;
        }
        latitude = f64::from_bits(latitude.to_bits() + 1);
    }
    panic!("could not place point {} m from {}", meters, origin);
}
