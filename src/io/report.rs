//! Run reports - per-sample decisions and inbound/outbound totals
//!
//! Text output is meant for a terminal; JSON output is one document per run
//! (JSONL) for downstream tooling.

use crate::domain::types::{Classification, RunSummary, Sample, ZoneId};
use crate::infra::config::ReportFormat;
use crate::io::registry::{RegisteredZone, Vehicle};
use crate::services::classifier::RunOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::debug;
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable)
pub fn new_run_id() -> String {
    Uuid::now_v7().to_string()
}

#[derive(Debug, Serialize)]
struct SampleLine {
    seq: u64,
    latitude: f64,
    longitude: f64,
    distance_m: f64,
    classification: Classification,
}

#[derive(Debug, Serialize)]
struct RunDocument<'a> {
    run_id: String,
    generated_at: DateTime<Utc>,
    imei: i64,
    registration: &'a str,
    zone_id: &'a ZoneId,
    zone_name: &'a str,
    radius_m: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    samples: Vec<SampleLine>,
    summary: RunSummary,
}

/// Writes run reports to any `Write` sink
pub struct ReportWriter<W: Write> {
    out: W,
    format: ReportFormat,
    per_sample: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: ReportFormat, per_sample: bool) -> Self {
        Self { out, format, per_sample }
    }

    /// Write one entity's run
    ///
    /// `samples` and `outcome.results` are zipped in order; they come from the
    /// same run so their lengths match.
    pub fn write_run(
        &mut self,
        vehicle: &Vehicle,
        zone: &RegisteredZone,
        samples: &[Sample],
        outcome: &RunOutcome,
    ) -> std::io::Result<()> {
        match self.format {
            ReportFormat::Text => self.write_text(vehicle, zone, samples, outcome)?,
            ReportFormat::Json => self.write_json(vehicle, zone, samples, outcome)?,
        }
        debug!(entity = %vehicle.entity, format = ?self.format, "report_written");
        Ok(())
    }

    fn write_text(
        &mut self,
        vehicle: &Vehicle,
        zone: &RegisteredZone,
        samples: &[Sample],
        outcome: &RunOutcome,
    ) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Vehicle {} (imei {}), zone {} (radius {} m)",
            vehicle.registration, vehicle.entity, zone.name, zone.zone.radius_m
        )?;

        if self.per_sample {
            let center = zone.zone.center;
            for (sample, result) in samples.iter().zip(&outcome.results) {
                writeln!(
                    self.out,
                    "GPS Coordinates: ({:.6}, {:.6}), Zone Coordinates: ({:.6}, {:.6})",
                    sample.position.latitude,
                    sample.position.longitude,
                    center.latitude,
                    center.longitude
                )?;
                writeln!(self.out, "Distance: {:.2} meters", result.distance_m)?;
                match result.classification {
                    Classification::Inbound => writeln!(
                        self.out,
                        "Vehicle {} is inbound to zone {}.",
                        vehicle.registration, zone.name
                    )?,
                    Classification::Outbound => writeln!(
                        self.out,
                        "Vehicle {} is outbound from zone {}.",
                        vehicle.registration, zone.name
                    )?,
                }
            }
        }

        writeln!(self.out, "Number of inbound records: {}", outcome.summary.inbound)?;
        writeln!(self.out, "Number of outbound records: {}", outcome.summary.outbound)?;
        Ok(())
    }

    fn write_json(
        &mut self,
        vehicle: &Vehicle,
        zone: &RegisteredZone,
        samples: &[Sample],
        outcome: &RunOutcome,
    ) -> std::io::Result<()> {
        let sample_lines = if self.per_sample {
            samples
                .iter()
                .zip(&outcome.results)
                .map(|(sample, result)| SampleLine {
                    seq: sample.seq,
                    latitude: sample.position.latitude,
                    longitude: sample.position.longitude,
                    distance_m: result.distance_m,
                    classification: result.classification,
                })
                .collect()
        } else {
            Vec::new()
        };

        let doc = RunDocument {
            run_id: new_run_id(),
            generated_at: Utc::now(),
            imei: vehicle.entity.0,
            registration: &vehicle.registration,
            zone_id: &zone.zone.id,
            zone_name: &zone.name,
            radius_m: zone.zone.radius_m,
            samples: sample_lines,
            summary: outcome.summary,
        };

        serde_json::to_writer(&mut self.out, &doc)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ClassificationResult, EntityId, GeoPoint, Zone};

    fn fixture() -> (Vehicle, RegisteredZone, Vec<Sample>, RunOutcome) {
        let vehicle = Vehicle {
            entity: EntityId(350317173261953),
            registration: "KA01AB1234".to_string(),
            zone_id: ZoneId::from("z1"),
        };
        let zone = RegisteredZone {
            zone: Zone::new("z1", GeoPoint { latitude: 12.9716, longitude: 77.5946 }, 500),
            name: "Depot".to_string(),
        };
        let samples = vec![
            Sample::new(vehicle.entity, GeoPoint { latitude: 12.9725, longitude: 77.5946 }, 0),
            Sample::new(vehicle.entity, GeoPoint { latitude: 12.9770, longitude: 77.5946 }, 1),
        ];
        let outcome = RunOutcome {
            results: vec![
                ClassificationResult {
                    distance_m: 100.07,
                    classification: Classification::Inbound,
                },
                ClassificationResult {
                    distance_m: 600.45,
                    classification: Classification::Outbound,
                },
            ],
            summary: RunSummary { inbound: 1, outbound: 1 },
        };
        (vehicle, zone, samples, outcome)
    }

    #[test]
    fn test_text_report_per_sample() {
        let (vehicle, zone, samples, outcome) = fixture();
        let mut writer = ReportWriter::new(Vec::new(), ReportFormat::Text, true);
        writer.write_run(&vehicle, &zone, &samples, &outcome).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Vehicle KA01AB1234 (imei 350317173261953), zone Depot (radius 500 m)");
        assert_eq!(
            lines[1],
            "GPS Coordinates: (12.972500, 77.594600), Zone Coordinates: (12.971600, 77.594600)"
        );
        assert_eq!(lines[2], "Distance: 100.07 meters");
        assert_eq!(lines[3], "Vehicle KA01AB1234 is inbound to zone Depot.");
        assert_eq!(lines[6], "Vehicle KA01AB1234 is outbound from zone Depot.");
        assert_eq!(lines[7], "Number of inbound records: 1");
        assert_eq!(lines[8], "Number of outbound records: 1");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_text_report_summary_only() {
        let (vehicle, zone, samples, outcome) = fixture();
        let mut writer = ReportWriter::new(Vec::new(), ReportFormat::Text, false);
        writer.write_run(&vehicle, &zone, &samples, &outcome).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("Distance:"));
    }

    #[test]
    fn test_json_report_document() {
        let (vehicle, zone, samples, outcome) = fixture();
        let mut writer = ReportWriter::new(Vec::new(), ReportFormat::Json, true);
        writer.write_run(&vehicle, &zone, &samples, &outcome).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.ends_with('\n'));
        let doc: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(doc["imei"], 350317173261953_i64);
        assert_eq!(doc["zone_id"], "z1");
        assert_eq!(doc["zone_name"], "Depot");
        assert_eq!(doc["summary"]["inbound"], 1);
        assert_eq!(doc["summary"]["outbound"], 1);
        assert_eq!(doc["samples"][1]["classification"], "outbound");
        assert_eq!(doc["samples"][1]["seq"], 1);
        assert!(Uuid::parse_str(doc["run_id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_json_report_without_samples() {
        let (vehicle, zone, samples, outcome) = fixture();
        let mut writer = ReportWriter::new(Vec::new(), ReportFormat::Json, false);
        writer.write_run(&vehicle, &zone, &samples, &outcome).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert!(doc.get("samples").is_none());
    }

    #[test]
    fn test_run_ids_unique() {
        assert_ne!(new_run_id(), new_run_id());
    }
}
