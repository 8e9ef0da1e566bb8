//! Zone and vehicle registries
//!
//! `Directory` joins the two into the classifier's `ZoneLookup`:
//! IMEI -> vehicle -> zone id -> zone.

use crate::domain::types::{EntityId, Zone, ZoneId};
use crate::io::records::{read_jsonl, VehicleRecord, ZoneRecord};
use crate::services::fleet::{FleetError, ZoneLookup};
use rustc_hash::FxHashMap;
use std::path::Path;
use tracing::{info, warn};

/// Zone plus its display name
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredZone {
    pub zone: Zone,
    pub name: String,
}

/// Zones keyed by external id
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: FxHashMap<ZoneId, RegisteredZone>,
}

impl ZoneRegistry {
    pub fn from_records(records: Vec<ZoneRecord>) -> Self {
        let mut zones = FxHashMap::default();
        for record in records {
            let entry = RegisteredZone { zone: record.to_zone(), name: record.name };
            if let Some(prev) = zones.insert(entry.zone.id.clone(), entry) {
                warn!(zone = %prev.zone.id, "duplicate_zone_replaced");
            }
        }
        Self { zones }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let registry = Self::from_records(read_jsonl(path.as_ref())?);
        info!(file = %path.as_ref().display(), zones = registry.len(), "zones_loaded");
        Ok(registry)
    }

    pub fn get(&self, id: &ZoneId) -> Option<&RegisteredZone> {
        self.zones.get(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Tracked vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub entity: EntityId,
    pub registration: String,
    pub zone_id: ZoneId,
}

/// Vehicles keyed by IMEI, iterated in file order
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    index: FxHashMap<EntityId, usize>,
}

impl VehicleRegistry {
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let mut registry = Self::default();
        for record in records {
            let vehicle = Vehicle {
                entity: EntityId(record.imei),
                registration: record.registration_number,
                zone_id: record.zone_id,
            };
            match registry.index.get(&vehicle.entity) {
                Some(&idx) => {
                    warn!(entity = %vehicle.entity, "duplicate_vehicle_replaced");
                    registry.vehicles[idx] = vehicle;
                }
                None => {
                    registry.index.insert(vehicle.entity, registry.vehicles.len());
                    registry.vehicles.push(vehicle);
                }
            }
        }
        registry
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let registry = Self::from_records(read_jsonl(path.as_ref())?);
        info!(file = %path.as_ref().display(), vehicles = registry.len(), "vehicles_loaded");
        Ok(registry)
    }

    pub fn get(&self, entity: EntityId) -> Option<&Vehicle> {
        self.index.get(&entity).map(|&idx| &self.vehicles[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

/// Vehicle-to-zone association
#[derive(Debug, Default)]
pub struct Directory {
    pub zones: ZoneRegistry,
    pub vehicles: VehicleRegistry,
}

impl Directory {
    pub fn new(zones: ZoneRegistry, vehicles: VehicleRegistry) -> Self {
        Self { zones, vehicles }
    }

    /// Vehicle and its zone, or why either is missing
    pub fn resolve(&self, entity: EntityId) -> Result<(&Vehicle, &RegisteredZone), FleetError> {
        let vehicle = self.vehicles.get(entity).ok_or(FleetError::VehicleNotFound(entity))?;
        let zone = self.zones.get(&vehicle.zone_id).ok_or_else(|| FleetError::ZoneNotFound {
            entity,
            zone: vehicle.zone_id.clone(),
        })?;
        Ok((vehicle, zone))
    }
}

impl ZoneLookup for Directory {
    fn zone_for(&self, entity: EntityId) -> Result<&Zone, FleetError> {
        self.resolve(entity).map(|(_, registered)| &registered.zone)
    }
}
