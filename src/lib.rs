//! Geofence in/out classification
//!
//! Classifies tracker GPS fixes as inbound or outbound of a circular zone and
//! tallies the results per vehicle.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
