//! Custom error types for the application.
//!
//! This module defines the primary error type, `WattscopeError`, for the
//! entire application. Using the `thiserror` crate, it provides a centralized
//! and consistent way to handle the different failure classes:
//!
//! - **`Config`**: wraps errors from the `config` crate (missing or
//!   malformed TOML).
//! - **`SourceUnavailable`**: the serial port failed to open. Fatal at
//!   startup, since no data can ever be decoded without it.
//! - **`Serial`** / **`Io`**: runtime communication failures while draining
//!   the port.
//! - **`Serialization`** / **`MalformedSnapshot`**: snapshot container
//!   problems. Snapshot write failures are reported but never abort a run.
//!
//! Note there is no malformed-frame variant: the synchronizer only hands the
//! decoder frames whose length and start marker have already been verified,
//! so the decoder has no garbage-input path to report.

use thiserror::Error;

/// Convenience alias for results using the application error type.
pub type AppResult<T> = std::result::Result<T, WattscopeError>;

#[derive(Error, Debug)]
pub enum WattscopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open serial port '{port}': {source}")]
    SourceUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
