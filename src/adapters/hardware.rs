//! Hardware adapter — bridges the indicator and the radio to the port traits.
//!
//! Owns the [`IndicatorPort`] and [`UplinkPort`] implementations and exposes
//! both through one value, so the service can take `&mut (impl IndicatorPort
//! + UplinkPort)` without a double mutable borrow.

use crate::app::ports::{IndicatorLine, IndicatorPort, UplinkPort};
use crate::config::LinkFlags;
use crate::error::LinkError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, U> {
    indicator: I,
    uplink: U,
}

impl<I, U> HardwareAdapter<I, U> {
    pub fn new(indicator: I, uplink: U) -> Self {
        Self { indicator, uplink }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn uplink(&self) -> &U {
        &self.uplink
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<I: IndicatorPort, U> IndicatorPort for HardwareAdapter<I, U> {
    fn set_level(&mut self, line: IndicatorLine, asserted: bool) {
        self.indicator.set_level(line, asserted);
    }

    fn is_asserted(&self, line: IndicatorLine) -> bool {
        self.indicator.is_asserted(line)
    }
}

// ── UplinkPort implementation ─────────────────────────────────

impl<I, U: UplinkPort> UplinkPort for HardwareAdapter<I, U> {
    fn init(&mut self) -> Result<(), LinkError> {
        self.uplink.init()
    }

    fn configure(&mut self, flags: &LinkFlags) -> Result<(), LinkError> {
        self.uplink.configure(flags)
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        self.uplink.send(payload)
    }
}
