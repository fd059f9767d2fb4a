//! # Wattscope Core Library
//!
//! This crate is the core library for the `wattscope` application: live
//! acquisition, charting and logging for a serial-connected power-measurement
//! instrument. The instrument emits fixed 32-byte binary frames at 9600 baud;
//! wattscope synchronizes on the frame marker, decodes each frame into
//! physical measurements and accumulates the derived capacity and energy
//! series alongside them.
//!
//! ## Crate Structure
//!
//! - **`acquisition`**: The per-tick pipeline that drains the byte source,
//!   extracts frames, decodes them and appends to the series store. Also
//!   owns periodic and shutdown snapshots.
//! - **`config`**: Application settings loaded from TOML files. See
//!   `config::Settings`.
//! - **`data`**: The seven-series measurement store and its snapshot
//!   persistence.
//! - **`error`**: The central `WattscopeError` enum.
//! - **`gui`**: The native chart window, built with `eframe` and
//!   `egui_plot`. Strictly a consumer of the series store; it never mutates
//!   measurement data.
//! - **`instrument`**: The serial byte source, frame synchronizer and frame
//!   decoder.

pub mod acquisition;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod instrument;
