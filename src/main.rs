//! LoRa Notifier Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  StatusIndicator   ModemUplink     LogEventSink   FreeRtos     │
//! │  (IndicatorPort)   (UplinkPort)    (EventSink)    (DelayNs)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  bootstrap() once · NotifierService per trigger        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  tilt GPIO ISR ──▶ TiltSignal ──▶ background loop              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use log::{error, info};

use lora_notifier::adapters::hardware::HardwareAdapter;
use lora_notifier::adapters::log_sink::LogEventSink;
use lora_notifier::adapters::modem::{ModemUplink, UartTransport};
use lora_notifier::adapters::time::MonotonicClock;
use lora_notifier::app::bootstrap::bootstrap;
use lora_notifier::app::service::{NotifierService, TriggerOutcome};
use lora_notifier::config::SystemConfig;
use lora_notifier::drivers::gpio::GpioOutput;
use lora_notifier::drivers::hw_init;
use lora_notifier::drivers::indicator::StatusIndicator;
use lora_notifier::drivers::tilt::{TiltSensor, TILT};
use lora_notifier::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LoRa notifier v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::from_build_env();
    info!(
        "Config: debounce={}ms pulse={}ms settle={}ms join={}ms tag={}",
        config.debounce_interval_ms,
        config.tx_pulse_ms,
        config.send_settle_ms,
        config.join_settle_ms,
        config.sketch_type.tag()
    );

    // ── 3. Peripherals ────────────────────────────────────────
    // Non-fatal: a modem UART that failed to come up makes the link init
    // fail below, which latches the ERROR line.
    if let Err(e) = hw_init::init_peripherals() {
        error!("Peripheral init incomplete: {}; continuing", e);
    }

    let indicator = StatusIndicator::new(
        GpioOutput::new(pins::LED_OK_GPIO),
        GpioOutput::new(pins::LED_ERROR_GPIO),
        GpioOutput::new(pins::LED_TX_GPIO),
    );
    let uplink = ModemUplink::new(UartTransport::new(pins::MODEM_UART_PORT));
    let mut hw = HardwareAdapter::new(indicator, uplink);

    let mut delay = FreeRtos;
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 4. Link bootstrap (blocks for the join settle) ────────
    let health = bootstrap(&config, &mut hw, &mut delay, &mut sink);
    info!("Link health: {:?}", health);

    // ── 5. Sensor interrupt ───────────────────────────────────
    // Registered after bootstrap: edges during the join settle are ignored.
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {}; no triggers will be seen", e);
    }
    let mut tilt = TiltSensor::new(pins::TILT_GPIO, &TILT);

    let poll_ms = config.main_loop_poll_ms;
    let mut service = NotifierService::new(config);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        if let Some(trigger) = tilt.take_pending() {
            let outcome = service.handle_trigger(trigger.at_ms, &mut hw, &mut delay, &mut sink);
            if let TriggerOutcome::Accepted { count, .. } = outcome {
                info!(
                    "Trigger #{} handled in {}ms ({} raw edges)",
                    count,
                    clock.now_ms().wrapping_sub(trigger.at_ms),
                    trigger.edges
                );
            }
        }

        FreeRtos::delay_ms(poll_ms);
    }
}
