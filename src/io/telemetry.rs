//! Telemetry log - ordered GPS fixes per tracker
//!
//! Arrival order is the record order in the source file. Sequence numbers are
//! assigned per entity, starting at 0. Coordinates are passed through as-is;
//! range checks happen in the classifier.

use crate::domain::types::{EntityId, Sample};
use crate::io::records::{read_jsonl, TelemetryRecord};
use crate::services::fleet::EntityBatch;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default)]
pub struct TelemetryLog {
    records: Vec<TelemetryRecord>,
}

impl TelemetryLog {
    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        Self { records }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let log = Self::from_records(read_jsonl(path.as_ref())?);
        info!(file = %path.as_ref().display(), records = log.len(), "telemetry_loaded");
        Ok(log)
    }

    /// Samples reported by `entity`, in arrival order
    pub fn samples_for(&self, entity: EntityId) -> Vec<Sample> {
        self.records
            .iter()
            .filter(|r| r.imei == entity.0)
            .enumerate()
            .map(|(seq, r)| r.to_sample(seq as u64))
            .collect()
    }

    /// One batch per requested entity, in the order given
    pub fn batches_for<I>(&self, entities: I) -> Vec<EntityBatch>
    where
        I: IntoIterator<Item = EntityId>,
    {
        entities
            .into_iter()
            .map(|entity| EntityBatch { entity, samples: self.samples_for(entity) })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
