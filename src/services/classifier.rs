//! Geofence membership classifier
//!
//! Decides inbound/outbound for each sample against one zone and tallies the
//! decisions.
//!
//! Key behaviors:
//! - A sample is inbound only when its distance is strictly less than the
//!   radius; a sample exactly on the boundary is outbound
//! - Each sample is classified independently (no smoothing, no hysteresis)
//! - Invalid zones and points are rejected before any sample is processed,
//!   so a rejected run never yields partial results
//! - The summary is valid at every prefix of a run

use crate::domain::error::GeofenceError;
use crate::domain::types::{Classification, ClassificationResult, RunSummary, Sample, Zone};
use crate::services::distance::distance;
use tracing::{debug, info};

/// Inside/outside rule: strictly less than the radius is inbound
#[inline]
pub fn decide(distance_m: f64, radius_m: i64) -> Classification {
    if distance_m < radius_m as f64 {
        Classification::Inbound
    } else {
        Classification::Outbound
    }
}

/// Classify a single sample against a zone
pub fn classify(zone: &Zone, sample: &Sample) -> Result<ClassificationResult, GeofenceError> {
    zone.validate()?;
    sample.position.validate()?;
    Ok(classify_unchecked(zone, sample))
}

#[inline]
fn classify_unchecked(zone: &Zone, sample: &Sample) -> ClassificationResult {
    let distance_m = distance(&sample.position, &zone.center);
    ClassificationResult { distance_m, classification: decide(distance_m, zone.radius_m) }
}

/// Results of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// One result per input sample, in input order
    pub results: Vec<ClassificationResult>,
    pub summary: RunSummary,
}

impl RunOutcome {
    pub fn into_parts(self) -> (Vec<ClassificationResult>, RunSummary) {
        (self.results, self.summary)
    }
}

/// Classify an ordered batch of samples against one zone
///
/// Validates the zone and every sample position first; on failure nothing is
/// classified.
pub fn run_classification(zone: &Zone, samples: &[Sample]) -> Result<RunOutcome, GeofenceError> {
    let mut run = ClassificationRun::start(zone)?;
    for sample in samples {
        sample.position.validate()?;
    }

    run.results.reserve(samples.len());
    for sample in samples {
        run.record(sample);
    }

    Ok(run.finish())
}

/// Incremental classification over a stream of samples
///
/// Stopping early is fine: `summary()` always matches the samples pushed so far.
#[derive(Debug)]
pub struct ClassificationRun<'a> {
    zone: &'a Zone,
    results: Vec<ClassificationResult>,
    summary: RunSummary,
}

impl<'a> ClassificationRun<'a> {
    /// Begin a run; fails with `InvalidZone` for a negative radius
    pub fn start(zone: &'a Zone) -> Result<Self, GeofenceError> {
        zone.validate()?;
        debug!(zone = %zone.id, center = %zone.center, radius_m = zone.radius_m, "run_started");
        Ok(Self { zone, results: Vec::new(), summary: RunSummary::default() })
    }

    /// Validate and classify the next sample
    ///
    /// A rejected sample leaves the run unchanged.
    pub fn push(&mut self, sample: &Sample) -> Result<ClassificationResult, GeofenceError> {
        sample.position.validate()?;
        Ok(self.record(sample))
    }

    fn record(&mut self, sample: &Sample) -> ClassificationResult {
        let result = classify_unchecked(self.zone, sample);
        self.summary.record(result.classification);
        self.results.push(result);

        debug!(
            entity = %sample.entity,
            seq = sample.seq,
            position = %sample.position,
            distance_m = result.distance_m,
            classification = %result.classification,
            "sample_classified"
        );

        result
    }

    #[inline]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    #[inline]
    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn finish(self) -> RunOutcome {
        info!(
            zone = %self.zone.id,
            samples = self.results.len(),
            inbound = self.summary.inbound,
            outbound = self.summary.outbound,
            "run_completed"
        );
        RunOutcome { results: self.results, summary: self.summary }
    }
}
