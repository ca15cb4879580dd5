//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NotifierService (domain)
//! ```
//!
//! Driven adapters (indicator LEDs, radio uplink, event sinks) implement
//! these traits.  The [`NotifierService`](super::service::NotifierService)
//! and [`bootstrap`](super::bootstrap::bootstrap) consume them via generics,
//! so the domain core never touches hardware directly.  Blocking waits go
//! through [`embedded_hal::delay::DelayNs`].

use embedded_hal::delay::DelayNs;

use crate::config::LinkFlags;
use crate::error::LinkError;

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → status LEDs)
// ───────────────────────────────────────────────────────────────

/// One of the three independent status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IndicatorLine {
    /// Link initialised (green).
    Ok = 0,
    /// Link initialisation failed (red).
    Error = 1,
    /// Transmission in flight (blue).
    Tx = 2,
}

impl IndicatorLine {
    pub const ALL: [Self; 3] = [Self::Ok, Self::Error, Self::Tx];
}

/// Write-side port for the three status lines.
///
/// Asserting one line never changes another.
pub trait IndicatorPort {
    /// Latch `line` at the given level until changed again.
    fn set_level(&mut self, line: IndicatorLine, asserted: bool);

    /// Last commanded level of `line`.
    fn is_asserted(&self, line: IndicatorLine) -> bool;

    /// Assert `line`, block for `duration_ms`, then deassert it.
    fn pulse(&mut self, line: IndicatorLine, duration_ms: u32, delay: &mut impl DelayNs) {
        self.set_level(line, true);
        delay.delay_ms(duration_ms);
        self.set_level(line, false);
    }

    /// Deassert every line.
    fn all_off(&mut self) {
        for line in IndicatorLine::ALL {
            self.set_level(line, false);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Uplink port (driven adapter: domain → radio module)
// ───────────────────────────────────────────────────────────────

/// The radio-network collaborator.  Join, ADR, duty-cycle and link-layer
/// retransmission all live behind this boundary.
pub trait UplinkPort {
    /// Bring up the radio module.
    fn init(&mut self) -> Result<(), LinkError>;

    /// Apply and commit the radio configuration.
    fn configure(&mut self, flags: &LinkFlags) -> Result<(), LinkError>;

    /// Hand one payload to the radio.  Synchronous; `payload` is not
    /// retained after return.
    fn send(&mut self, payload: &[u8]) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
