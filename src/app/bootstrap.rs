//! One-shot link bootstrap, run before the event loop.
//!
//! ```text
//! all lines off ─▶ uplink.init() ─┬─ Ok  ─▶ latch OK    ─┐
//!                                 └─ Err ─▶ latch ERROR ─┤
//!                                                        ▼
//!                     configure(flags) ─▶ join settle ─▶ clear OK + ERROR
//! ```
//!
//! A failed init is non-fatal: the device proceeds in a degraded state and
//! still attempts every send.  Whether the configuration is pushed after a
//! failed init is controlled by
//! [`SystemConfig::configure_on_init_failure`](crate::config::SystemConfig).

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::LinkError;

use super::events::AppEvent;
use super::ports::{EventSink, IndicatorLine, IndicatorPort, UplinkPort};

/// Link state reported by [`bootstrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkHealth {
    Up,
    /// Init failed; running disconnected or partially configured.
    Degraded(LinkError),
}

impl LinkHealth {
    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

pub fn bootstrap(
    config: &SystemConfig,
    hw: &mut (impl IndicatorPort + UplinkPort),
    delay: &mut impl DelayNs,
    sink: &mut impl EventSink,
) -> LinkHealth {
    hw.all_off();

    let health = match hw.init() {
        Ok(()) => {
            hw.set_level(IndicatorLine::Ok, true);
            info!("Link: radio initialised");
            sink.emit(&AppEvent::LinkUp);
            LinkHealth::Up
        }
        Err(e) => {
            hw.set_level(IndicatorLine::Error, true);
            warn!("Link: radio init failed ({}), continuing degraded", e);
            sink.emit(&AppEvent::LinkInitFailed(e));
            LinkHealth::Degraded(e)
        }
    };

    if health.is_up() || config.configure_on_init_failure {
        let result = hw.configure(&config.link);
        if let Err(e) = result {
            warn!("Link: configuration rejected ({})", e);
        }
        sink.emit(&AppEvent::LinkConfigured(result));
    } else {
        info!("Link: configuration skipped after failed init");
        sink.emit(&AppEvent::LinkConfigSkipped);
    }

    delay.delay_ms(config.join_settle_ms);

    hw.set_level(IndicatorLine::Ok, false);
    hw.set_level(IndicatorLine::Error, false);
    sink.emit(&AppEvent::BootstrapComplete {
        link_up: health.is_up(),
    });
    info!(
        "Bootstrap complete (link {}, sketch tag {})",
        if health.is_up() { "up" } else { "degraded" },
        config.sketch_type.tag()
    );

    health
}
