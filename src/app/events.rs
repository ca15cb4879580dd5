//! Outbound application events.
//!
//! The core emits these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them.

use crate::error::LinkError;
use crate::payload::Payload;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Radio `init` succeeded; OK indicator latched.
    LinkUp,

    /// Radio `init` failed; ERROR indicator latched.  Non-fatal.
    LinkInitFailed(LinkError),

    /// Radio configuration was pushed (`Ok`) or refused (`Err`).
    LinkConfigured(Result<(), LinkError>),

    /// Configuration was skipped because `init` failed.
    LinkConfigSkipped,

    /// Bootstrap finished; indicators cleared, event loop about to start.
    BootstrapComplete { link_up: bool },

    /// A trigger fell inside the debounce window.
    TriggerRejected { at_ms: u32, since_last_ms: u32 },

    /// A trigger was accepted and handed to the radio.
    PayloadSent { count: u16, payload: Payload },

    /// A trigger was accepted but the radio refused the payload.  The
    /// event is still counted.
    SendFailed {
        count: u16,
        payload: Payload,
        error: LinkError,
    },
}
