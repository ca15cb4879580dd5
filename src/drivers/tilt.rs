//! Tilt / vibration sensor edge capture.
//!
//! ## Hardware
//!
//! Tilt switch on a pull-up input, interrupt on any edge.  The ISR does no
//! debouncing and no I/O: it stamps the edge time into a single-slot
//! latch and bumps an edge counter, then returns.
//!
//! ```text
//! GPIO ISR ──on_edge(now_ms)──▶ TiltSignal ──take_pending()──▶ main loop
//!   (producer)                  (1 slot)                       (consumer)
//! ```
//!
//! Only the *first* edge of a burst is latched; edges arriving while a
//! timestamp is still pending are counted but not stored.  Every such edge
//! would land inside the debounce window of the latched one anyway.
//!
//! The latch and the edge count share one critical section, so the check
//! and the store in [`TiltSignal::on_edge`] cannot interleave with a
//! [`TiltSignal::take`] running on the other core.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

#[derive(Clone, Copy)]
struct Latch {
    pending: Option<u32>,
    edges: u32,
}

/// Single-producer / single-consumer edge latch.
pub struct TiltSignal {
    latch: Mutex<CriticalSectionRawMutex, Cell<Latch>>,
}

impl TiltSignal {
    pub const fn new() -> Self {
        Self {
            latch: Mutex::new(Cell::new(Latch {
                pending: None,
                edges: 0,
            })),
        }
    }

    /// Record an edge at `now_ms`.  Safe in interrupt context.
    pub fn on_edge(&self, now_ms: u32) {
        self.latch.lock(|cell| {
            let mut latch = cell.get();
            latch.edges = latch.edges.wrapping_add(1);
            if latch.pending.is_none() {
                latch.pending = Some(now_ms);
            }
            cell.set(latch);
        });
    }

    /// Take the latched edge time, if any.
    pub fn take(&self) -> Option<u32> {
        self.take_with_edges().map(|(at_ms, _)| at_ms)
    }

    /// Take the latched edge time together with the edge count at that
    /// instant.
    fn take_with_edges(&self) -> Option<(u32, u32)> {
        self.latch.lock(|cell| {
            let mut latch = cell.get();
            let at_ms = latch.pending.take()?;
            cell.set(latch);
            Some((at_ms, latch.edges))
        })
    }

    /// Raw edges seen since boot (wrapping).
    pub fn edges(&self) -> u32 {
        self.latch.lock(|cell| cell.get().edges)
    }
}

impl Default for TiltSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// The board's tilt input latch, fed by the GPIO ISR.
pub static TILT: TiltSignal = TiltSignal::new();

/// ISR handler — register this on the tilt GPIO (any edge).
pub fn tilt_isr_handler(now_ms: u32) {
    TILT.on_edge(now_ms);
}

/// A latched trigger ready for the notifier service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiltTrigger {
    /// Time of the first edge of the burst.
    pub at_ms: u32,
    /// Raw edges since the previous trigger was taken (≥ 1).
    pub edges: u32,
}

/// Main-loop side of the tilt input.
pub struct TiltSensor<'a> {
    gpio: i32,
    signal: &'a TiltSignal,
    edges_at_last_take: u32,
}

impl<'a> TiltSensor<'a> {
    pub fn new(gpio: i32, signal: &'a TiltSignal) -> Self {
        Self {
            gpio,
            signal,
            edges_at_last_take: signal.edges(),
        }
    }

    /// GPIO pin this sensor is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Call from the main loop.  Returns the pending trigger, if any.
    pub fn take_pending(&mut self) -> Option<TiltTrigger> {
        let (at_ms, edges_now) = self.signal.take_with_edges()?;
        let edges = edges_now.wrapping_sub(self.edges_at_last_take);
        self.edges_at_last_take = edges_now;
        Some(TiltTrigger { at_ms, edges })
    }
}
