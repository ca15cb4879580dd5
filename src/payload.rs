//! Uplink payload encoder.
//!
//! Wire format (3 bytes, fixed):
//! ```text
//! ┌──────────────┬──────────────┬──────────────┐
//! │ sketch type  │ counter high │ counter low  │
//! │ u8           │ u8           │ u8           │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! The sketch type tells the network platform which decoder to apply.

use serde::{Deserialize, Serialize};

/// Length of every uplink payload.
pub const PAYLOAD_LEN: usize = 3;

/// Payload schema identifier (byte 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SketchType {
    Temperature = 1,
    /// Push-button / trigger event.
    PushEvent = 2,
    DoorWindow = 3,
}

impl SketchType {
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Encode `[tag, counter_hi, counter_lo]`.
pub const fn encode(tag: u8, counter: u16) -> [u8; PAYLOAD_LEN] {
    let [hi, lo] = counter.to_be_bytes();
    [tag, hi, lo]
}

/// One immutable uplink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    pub const fn new(sketch: SketchType, counter: u16) -> Self {
        Self(encode(sketch.tag(), counter))
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    pub fn tag(&self) -> u8 {
        self.0[0]
    }

    /// Counter field, big-endian.
    pub fn counter(&self) -> u16 {
        u16::from_be_bytes([self.0[1], self.0[2]])
    }
}
