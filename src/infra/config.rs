//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. GEOFENCE_CONFIG environment variable
//! 3. Default: config/dev.toml

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "GEOFENCE_CONFIG";

/// Config path used when neither argument nor environment provide one
pub const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_zones_file")]
    pub zones_file: String,
    #[serde(default = "default_vehicles_file")]
    pub vehicles_file: String,
    #[serde(default = "default_telemetry_file")]
    pub telemetry_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            zones_file: default_zones_file(),
            vehicles_file: default_vehicles_file(),
            telemetry_file: default_telemetry_file(),
        }
    }
}

fn default_zones_file() -> String {
    "data/zones.jsonl".to_string()
}

fn default_vehicles_file() -> String {
    "data/vehicles.jsonl".to_string()
}

fn default_telemetry_file() -> String {
    "data/teledata.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunConfig {
    /// Single tracker to classify; all registered vehicles when absent
    #[serde(default)]
    pub imei: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_format")]
    pub format: ReportFormat,
    /// Emit a line per sample, not just the totals
    #[serde(default = "default_per_sample")]
    pub per_sample: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { format: default_report_format(), per_sample: default_per_sample() }
    }
}

fn default_report_format() -> ReportFormat {
    ReportFormat::Text
}

fn default_per_sample() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    zones_file: String,
    vehicles_file: String,
    telemetry_file: String,
    imei: Option<i64>,
    report_format: ReportFormat,
    per_sample: bool,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            zones_file: toml_config.data.zones_file,
            vehicles_file: toml_config.data.vehicles_file,
            telemetry_file: toml_config.data.telemetry_file,
            imei: toml_config.run.imei,
            report_format: toml_config.report.format,
            per_sample: toml_config.report.per_sample,
            config_file,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    /// Override the target tracker (e.g. from the command line)
    pub fn with_imei(mut self, imei: Option<i64>) -> Self {
        if imei.is_some() {
            self.imei = imei;
        }
        self
    }

    /// Override the report format
    pub fn with_report_format(mut self, format: Option<ReportFormat>) -> Self {
        if let Some(format) = format {
            self.report_format = format;
        }
        self
    }

    // Getters for all config fields
    pub fn zones_file(&self) -> &str {
        &self.zones_file
    }

    pub fn vehicles_file(&self) -> &str {
        &self.vehicles_file
    }

    pub fn telemetry_file(&self) -> &str {
        &self.telemetry_file
    }

    pub fn imei(&self) -> Option<i64> {
        self.imei
    }

    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    pub fn per_sample(&self) -> bool {
        self.per_sample
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
