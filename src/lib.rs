//! LoRa notifier firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod counter;
pub mod debounce;
pub mod error;
pub mod payload;
pub mod pins;

// Dual-target modules; the device implementations are guarded by cfg
// attributes inside.
pub mod adapters;
pub mod drivers;
