//! Infrastructure - configuration and logging
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `logging` - tracing subscriber setup for binaries

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, ReportFormat};
pub use logging::init_logging;
