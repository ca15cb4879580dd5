//! Application core — pure domain logic, zero I/O.
//!
//! Link bootstrap and the trigger-to-uplink pipeline.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod bootstrap;
pub mod events;
pub mod ports;
pub mod service;
