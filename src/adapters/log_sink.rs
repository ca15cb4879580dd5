//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::LinkUp => info!("LINK  | radio up"),
            AppEvent::LinkInitFailed(e) => warn!("LINK  | init failed: {}", e),
            AppEvent::LinkConfigured(Ok(())) => info!("LINK  | configured"),
            AppEvent::LinkConfigured(Err(e)) => warn!("LINK  | configure failed: {}", e),
            AppEvent::LinkConfigSkipped => info!("LINK  | configure skipped"),
            AppEvent::BootstrapComplete { link_up } => {
                info!("BOOT  | complete, link_up={}", link_up);
            }
            AppEvent::TriggerRejected { at_ms, since_last_ms } => {
                info!("TRIG  | rejected at {}ms ({}ms since last)", at_ms, since_last_ms);
            }
            AppEvent::PayloadSent { count, payload } => {
                info!("TRIG  | #{} sent {:02X?}", count, payload.as_bytes());
            }
            AppEvent::SendFailed { count, payload, error } => {
                warn!(
                    "TRIG  | #{} send failed ({}) {:02X?}",
                    count,
                    error,
                    payload.as_bytes()
                );
            }
        }
    }
}
