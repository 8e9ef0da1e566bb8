//! Source documents for zones, vehicles and telemetry
//!
//! Each source is a JSONL file (one document per line). Field names follow the
//! upstream documents (`registrationNumber`, `zoneID`), so records are decoded
//! straight into typed structs rather than picked out of untyped maps.

use crate::domain::types::{EntityId, GeoPoint, Sample, Zone, ZoneId};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Zone document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i64,
}

impl ZoneRecord {
    pub fn to_zone(&self) -> Zone {
        Zone::new(
            self.id.clone(),
            GeoPoint { latitude: self.latitude, longitude: self.longitude },
            self.radius,
        )
    }
}

/// Vehicle document linking a tracker IMEI to its zone
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub imei: i64,
    pub registration_number: String,
    #[serde(rename = "zoneID")]
    pub zone_id: ZoneId,
}

/// GPS fix inside a telemetry document
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Telemetry document as reported by a tracker
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetryRecord {
    pub imei: i64,
    pub gps: GpsFix,
}

impl TelemetryRecord {
    #[inline]
    pub fn to_sample(&self, seq: u64) -> Sample {
        Sample::new(
            EntityId(self.imei),
            GeoPoint { latitude: self.gps.latitude, longitude: self.gps.longitude },
            seq,
        )
    }
}

/// Read a JSONL file into typed records
///
/// Blank lines are skipped. A malformed line fails the whole read with the
/// file and line number in the error.
pub fn read_jsonl<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<T>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed)
            .with_context(|| format!("Failed to parse {}:{}", path.display(), idx + 1))?;
        records.push(record);
    }

    debug!(file = %path.display(), records = records.len(), "jsonl_loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_vehicle_record_field_names() {
        let json = r#"{"imei": 350317173261953, "registrationNumber": "KA01AB1234", "zoneID": "65f0c1"}"#;
        let record: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.imei, 350317173261953);
        assert_eq!(record.registration_number, "KA01AB1234");
        assert_eq!(record.zone_id, ZoneId::from("65f0c1"));
    }

    #[test]
    fn test_zone_record_to_zone() {
        let json = r#"{"id": "z1", "name": "Depot", "latitude": 12.9716, "longitude": 77.5946, "radius": 500}"#;
        let record: ZoneRecord = serde_json::from_str(json).unwrap();
        let zone = record.to_zone();
        assert_eq!(zone.id, ZoneId::from("z1"));
        assert_eq!(zone.radius_m, 500);
        assert_eq!(zone.center.latitude, 12.9716);
    }

    #[test]
    fn test_telemetry_record_to_sample() {
        let json = r#"{"imei": 42, "gps": {"latitude": 1.5, "longitude": -2.5}, "speed": 30}"#;
        let record: TelemetryRecord = serde_json::from_str(json).unwrap();
        let sample = record.to_sample(7);
        assert_eq!(sample.entity, EntityId(42));
        assert_eq!(sample.position, GeoPoint { latitude: 1.5, longitude: -2.5 });
        assert_eq!(sample.seq, 7);
    }

    #[test]
    fn test_read_jsonl_skips_blank_lines() {
        let file = write_temp(
            "{\"imei\": 1, \"gps\": {\"latitude\": 0.0, \"longitude\": 0.0}}\n\n   \n\
             {\"imei\": 2, \"gps\": {\"latitude\": 1.0, \"longitude\": 1.0}}\n",
        );
        let records: Vec<TelemetryRecord> = read_jsonl(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].imei, 2);
    }

    #[test]
    fn test_read_jsonl_reports_line_number() {
        let file = write_temp(
            "{\"imei\": 1, \"gps\": {\"latitude\": 0.0, \"longitude\": 0.0}}\n\
             {\"imei\": \"oops\"}\n",
        );
        let err = read_jsonl::<TelemetryRecord, _>(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(":2"), "{:#}", err);
    }

    #[test]
    fn test_read_jsonl_missing_file() {
        let err = read_jsonl::<ZoneRecord, _>("/nonexistent/zones.jsonl").unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
