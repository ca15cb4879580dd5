//! Notifier service — the trigger-to-uplink pipeline.
//!
//! [`NotifierService`] owns the debounce window, the accepted-event
//! counter and the link statistics.  It runs one trigger to completion per
//! [`handle_trigger`](NotifierService::handle_trigger) call; all I/O flows
//! through port traits injected at the call site.
//!
//! ```text
//!  trigger ts ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        NotifierService        │
//!  IndicatorPort ◀│ debounce · count · encode     │──▶ UplinkPort
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Handler phases
//!
//! ```text
//! Idle ─▶ Debouncing ─┬─▶ Rejected ─────────────────────────────────▶ Idle
//!                     └─▶ Accepted ─▶ Encoding ─▶ Transmitting ─▶ Signaling ─▶ Idle
//! ```
//!
//! `Accepted` covers the TX pulse and the settle delay; `Signaling`
//! reports the send outcome through the event sink.
//!
//! ## Execution context
//!
//! The service blocks (TX pulse + settle delay) and must never run in an
//! ISR.  The GPIO interrupt only latches a timestamp (see
//! [`drivers::tilt`](crate::drivers::tilt)); the background loop calls
//! `handle_trigger`.  `&mut self` keeps it to one invocation at a time.

use embedded_hal::delay::DelayNs;
use heapless::HistoryBuffer;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::counter::EventCounter;
use crate::debounce::{DebounceTimer, Verdict};
use crate::error::LinkError;
use crate::payload::Payload;

use super::events::AppEvent;
use super::ports::{EventSink, IndicatorLine, IndicatorPort, UplinkPort};

/// How many failed counter values [`LinkStats`] remembers.
const FAILED_HISTORY: usize = 8;

// ───────────────────────────────────────────────────────────────
// Phase / outcome types
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPhase {
    Idle,
    Debouncing,
    Rejected,
    Accepted,
    Encoding,
    Transmitting,
    Signaling,
}

/// What one trigger invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Rejected {
        since_last_ms: u32,
    },
    Accepted {
        count: u16,
        payload: Payload,
        sent: Result<(), LinkError>,
    },
}

/// Uplink bookkeeping, kept apart from the accepted-event counter.
pub struct LinkStats {
    pub sent: u32,
    pub failed: u32,
    /// Counter values whose send failed, most recent last.
    pub recent_failures: HistoryBuffer<u16, FAILED_HISTORY>,
}

impl LinkStats {
    const fn new() -> Self {
        Self {
            sent: 0,
            failed: 0,
            recent_failures: HistoryBuffer::new(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// NotifierService
// ───────────────────────────────────────────────────────────────

pub struct NotifierService {
    config: SystemConfig,
    debounce: DebounceTimer,
    counter: EventCounter,
    stats: LinkStats,
    phase: HandlerPhase,
    rejected: u32,
}

impl NotifierService {
    pub fn new(config: SystemConfig) -> Self {
        let debounce = DebounceTimer::new(config.debounce_interval_ms);
        Self {
            config,
            debounce,
            counter: EventCounter::new(),
            stats: LinkStats::new(),
            phase: HandlerPhase::Idle,
            rejected: 0,
        }
    }

    /// Run one trigger, timestamped `now_ms`, through the pipeline.
    ///
    /// The send result is reported but never retried, and a failed send
    /// still consumes a counter value.
    pub fn handle_trigger(
        &mut self,
        now_ms: u32,
        hw: &mut (impl IndicatorPort + UplinkPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> TriggerOutcome {
        self.enter(HandlerPhase::Debouncing);

        if let Verdict::Rejected { since_last_ms } = self.debounce.check(now_ms) {
            self.enter(HandlerPhase::Rejected);
            self.rejected = self.rejected.wrapping_add(1);
            sink.emit(&AppEvent::TriggerRejected {
                at_ms: now_ms,
                since_last_ms,
            });
            self.enter(HandlerPhase::Idle);
            return TriggerOutcome::Rejected { since_last_ms };
        }

        self.enter(HandlerPhase::Accepted);
        hw.pulse(IndicatorLine::Tx, self.config.tx_pulse_ms, delay);
        delay.delay_ms(self.config.send_settle_ms);
        let count = self.counter.increment();

        self.enter(HandlerPhase::Encoding);
        let payload = Payload::new(self.config.sketch_type, count);

        self.enter(HandlerPhase::Transmitting);
        let sent = hw.send(payload.as_bytes());

        self.enter(HandlerPhase::Signaling);
        match sent {
            Ok(()) => {
                self.stats.sent = self.stats.sent.wrapping_add(1);
                info!("Trigger #{} sent ({:02X?})", count, payload.as_bytes());
                sink.emit(&AppEvent::PayloadSent { count, payload });
            }
            Err(error) => {
                self.stats.failed = self.stats.failed.wrapping_add(1);
                self.stats.recent_failures.write(count);
                warn!("Trigger #{} not sent: {}", count, error);
                sink.emit(&AppEvent::SendFailed {
                    count,
                    payload,
                    error,
                });
            }
        }

        self.enter(HandlerPhase::Idle);
        TriggerOutcome::Accepted {
            count,
            payload,
            sent,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Accepted triggers so far (wrapping).
    pub fn count(&self) -> u16 {
        self.counter.value()
    }

    /// Triggers swallowed by the debounce window.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn phase(&self) -> HandlerPhase {
        self.phase
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    pub fn last_accepted_ms(&self) -> Option<u32> {
        self.debounce.last_accepted_ms()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn enter(&mut self, next: HandlerPhase) {
        debug!("handler: {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
