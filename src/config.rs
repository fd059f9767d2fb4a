//! Configuration management.
//!
//! Settings are loaded from `config/<name>.toml` (default `config/default.toml`):
//!
//! ```toml
//! log_level = "info"
//!
//! [serial]
//! port = "/dev/ttyUSB0"
//! baud_rate = 9600
//!
//! [storage]
//! output_dir = "outputs"
//! snapshot_every = 60
//!
//! [acquisition]
//! tick_interval_ms = 250
//! ```
//!
//! The instrument firmware fixes the frame layout and effectively the baud
//! rate; only the port name normally needs editing.

use crate::error::AppResult;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub serial: SerialSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub acquisition: AcquisitionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SerialSettings {
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory that snapshot files are written into. Created if missing.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Take a snapshot after this many accepted samples. 0 disables the
    /// periodic snapshot (the shutdown snapshot is always taken).
    #[serde(default = "default_snapshot_every")]
    pub snapshot_every: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AcquisitionSettings {
    /// Nominal time between acquisition ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            snapshot_every: default_snapshot_every(),
        }
    }
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_output_dir() -> String {
    "outputs".to_string()
}

fn default_snapshot_every() -> u64 {
    60
}

fn default_tick_interval_ms() -> u64 {
    250
}

impl Settings {
    pub fn new(config_name: Option<&str>) -> AppResult<Self> {
        let config_path = format!("config/{}", config_name.unwrap_or("default"));
        let s = Config::builder()
            .add_source(config::File::with_name(&config_path))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let settings = parse("[serial]\nport = \"/dev/ttyUSB1\"\n");
        assert_eq!(settings.serial.port, "/dev/ttyUSB1");
        assert_eq!(settings.serial.baud_rate, 9600);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.storage.output_dir, "outputs");
        assert_eq!(settings.storage.snapshot_every, 60);
        assert_eq!(settings.acquisition.tick_interval_ms, 250);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = parse(
            "log_level = \"debug\"\n\
             [serial]\nport = \"COM13\"\nbaud_rate = 19200\n\
             [storage]\noutput_dir = \"/tmp/watt\"\nsnapshot_every = 10\n\
             [acquisition]\ntick_interval_ms = 1000\n",
        );
        assert_eq!(settings.serial.port, "COM13");
        assert_eq!(settings.serial.baud_rate, 19200);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.storage.snapshot_every, 10);
        assert_eq!(settings.acquisition.tick_interval_ms, 1000);
    }
}
