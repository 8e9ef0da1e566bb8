//! IO modules - external data sources and report output
//!
//! This module contains all external IO operations:
//! - `records` - JSONL source documents (zones, vehicles, telemetry)
//! - `registry` - Zone/vehicle registries and the vehicle-to-zone directory
//! - `telemetry` - Ordered GPS fixes per tracker
//! - `report` - Text and JSONL run reports

pub mod records;
pub mod registry;
pub mod report;
pub mod telemetry;

// Re-export commonly used types
pub use registry::{Directory, RegisteredZone, Vehicle, VehicleRegistry, ZoneRegistry};
pub use report::ReportWriter;
pub use telemetry::TelemetryLog;
