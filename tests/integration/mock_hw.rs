//! Mock hardware adapter for integration tests.
//!
//! Records every indicator and uplink call, plus every blocking delay, so
//! tests can assert on the full command history without real GPIO or a
//! radio module attached.

use embedded_hal::delay::DelayNs;
use lora_notifier::app::events::AppEvent;
use lora_notifier::app::ports::{EventSink, IndicatorLine, IndicatorPort, UplinkPort};
use lora_notifier::config::LinkFlags;
use lora_notifier::error::LinkError;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    SetLevel { line: IndicatorLine, asserted: bool },
    Init,
    Configure(LinkFlags),
    Send(Vec<u8>),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    levels: [bool; 3],
    pub init_result: Result<(), LinkError>,
    pub configure_result: Result<(), LinkError>,
    pub send_result: Result<(), LinkError>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            levels: [false; 3],
            init_result: Ok(()),
            configure_result: Ok(()),
            send_result: Ok(()),
        }
    }

    pub fn failing_init() -> Self {
        Self {
            init_result: Err(LinkError::InitFailed),
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Send(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn configure_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Configure(_)))
            .count()
    }

    /// Level changes of `line`, in order.
    pub fn levels_of(&self, line: IndicatorLine) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetLevel { line: l, asserted } if *l == line => Some(*asserted),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, call: &HwCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorPort for MockHardware {
    fn set_level(&mut self, line: IndicatorLine, asserted: bool) {
        self.levels[line as usize] = asserted;
        self.calls.push(HwCall::SetLevel { line, asserted });
    }

    fn is_asserted(&self, line: IndicatorLine) -> bool {
        self.levels[line as usize]
    }
}

impl UplinkPort for MockHardware {
    fn init(&mut self) -> Result<(), LinkError> {
        self.calls.push(HwCall::Init);
        self.init_result
    }

    fn configure(&mut self, flags: &LinkFlags) -> Result<(), LinkError> {
        self.calls.push(HwCall::Configure(*flags));
        self.configure_result
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        self.calls.push(HwCall::Send(payload.to_vec()));
        self.send_result
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Records each millisecond delay instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub ms: Vec<u32>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.ms.iter().map(|&m| u64::from(m)).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
