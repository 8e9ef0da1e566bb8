//! Fleet fan-out - one classification run per tracked entity
//!
//! Each entity's run is independent: it gets its own zone and its own
//! summary, so runs are spread over the rayon pool with no shared state.
//! Outcomes come back in the caller's entity order.

use crate::domain::error::GeofenceError;
use crate::domain::types::{EntityId, Sample, Zone, ZoneId};
use crate::services::classifier::{run_classification, RunOutcome};
use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;

/// Resolves the zone an entity is measured against
pub trait ZoneLookup: Sync {
    fn zone_for(&self, entity: EntityId) -> Result<&Zone, FleetError>;
}

/// Reasons an entity's run could not produce an outcome
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    #[error("vehicle not found: {0}")]
    VehicleNotFound(EntityId),

    #[error("zone {zone} not found for vehicle {entity}")]
    ZoneNotFound { entity: EntityId, zone: ZoneId },

    #[error(transparent)]
    Rejected(#[from] GeofenceError),
}

/// Samples collected for one entity
#[derive(Debug, Clone)]
pub struct EntityBatch {
    pub entity: EntityId,
    pub samples: Vec<Sample>,
}

/// Outcome of one entity's run
#[derive(Debug, Clone)]
pub struct EntityRun {
    pub entity: EntityId,
    pub outcome: Result<RunOutcome, FleetError>,
}

/// Resolve the zone for `entity` and classify its samples
pub fn run_entity<L: ZoneLookup + ?Sized>(
    lookup: &L,
    entity: EntityId,
    samples: &[Sample],
) -> Result<RunOutcome, FleetError> {
    let zone = lookup.zone_for(entity)?;
    Ok(run_classification(zone, samples)?)
}

/// Run every batch in parallel, preserving batch order in the output
pub fn run_fleet<L: ZoneLookup + ?Sized>(lookup: &L, batches: &[EntityBatch]) -> Vec<EntityRun> {
    batches
        .par_iter()
        .map(|batch| {
            let outcome = run_entity(lookup, batch.entity, &batch.samples);
            if let Err(e) = &outcome {
                warn!(entity = %batch.entity, error = %e, "entity_skipped");
            }
            EntityRun { entity: batch.entity, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{GeoPoint, RunSummary};
    use rustc_hash::FxHashMap;

    struct MapLookup {
        zones: FxHashMap<EntityId, Zone>,
    }

    impl ZoneLookup for MapLookup {
        fn zone_for(&self, entity: EntityId) -> Result<&Zone, FleetError> {
            self.zones.get(&entity).ok_or(FleetError::VehicleNotFound(entity))
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint { latitude: 0.0, longitude: 0.0 }
    }

    fn batch(entity: i64, longitudes: &[f64]) -> EntityBatch {
        let samples = longitudes
            .iter()
            .enumerate()
            .map(|(i, &lon)| {
                Sample::new(EntityId(entity), GeoPoint { latitude: 0.0, longitude: lon }, i as u64)
            })
            .collect();
        EntityBatch { entity: EntityId(entity), samples }
    }

    fn lookup() -> MapLookup {
        let mut zones = FxHashMap::default();
        // ~1.1 km and ~111 km radius around the origin
        zones.insert(EntityId(1), Zone::new("small", origin(), 1_200));
        zones.insert(EntityId(2), Zone::new("large", origin(), 120_000));
        zones.insert(EntityId(3), Zone::new("broken", origin(), -5));
        MapLookup { zones }
    }

    #[test]
    fn test_run_fleet_preserves_order_and_isolates_summaries() {
        let batches: Vec<_> = (0..32)
            .map(|i| if i % 2 == 0 { batch(1, &[0.005, 0.5, 1.0]) } else { batch(2, &[0.005, 0.5, 1.5]) })
            .collect();

        let runs = run_fleet(&lookup(), &batches);

        assert_eq!(runs.len(), batches.len());
        for (i, run) in runs.iter().enumerate() {
            let summary = run.outcome.as_ref().unwrap().summary;
            if i % 2 == 0 {
                assert_eq!(run.entity, EntityId(1));
                assert_eq!(summary, RunSummary { inbound: 1, outbound: 2 });
            } else {
                assert_eq!(run.entity, EntityId(2));
                assert_eq!(summary, RunSummary { inbound: 2, outbound: 1 });
            }
        }
    }

    #[test]
    fn test_run_fleet_unknown_entity_does_not_stop_others() {
        let batches = vec![batch(9, &[0.0]), batch(1, &[0.0])];
        let runs = run_fleet(&lookup(), &batches);

        assert_eq!(runs[0].outcome, Err(FleetError::VehicleNotFound(EntityId(9))));
        assert!(runs[1].outcome.is_ok());
    }

    #[test]
    fn test_run_entity_invalid_zone_rejected() {
        let result = run_entity(&lookup(), EntityId(3), &batch(3, &[0.0]).samples);
        assert!(matches!(
            result,
            Err(FleetError::Rejected(GeofenceError::InvalidZone { radius_m: -5, .. }))
        ));
    }
}
