//! System configuration parameters
//!
//! All tunable parameters for the notifier, fixed at build time.  The
//! binary may override the defaults with a JSON document embedded through
//! the `NOTIFIER_CONFIG_JSON` environment variable at compile time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::payload::SketchType;

/// Operating mode requested from the radio module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioMode {
    /// LoRaWAN network stack (join, ADR, duty-cycle handled by the module).
    LoRaWan,
    /// Raw point-to-point LoRa, no network server.
    LoRaRaw,
}

/// Radio configuration flags pushed to the uplink after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFlags {
    pub mode: RadioMode,
    /// Open the RX1/RX2 receive windows after each uplink.
    pub rx_windows: bool,
    /// Adaptive data rate on the transmit side.
    pub tx_adaptive_speed: bool,
    /// Regulatory duty-cycle enforcement.
    pub duty_cycle: bool,
    /// Adaptive channel selection.
    pub tx_adaptive_channel: bool,
    /// Adaptive RX2 window parameters.
    pub rx2_adaptive: bool,
    /// Over-the-air activation (vs. activation by personalisation).
    pub otaa: bool,
}

impl Default for LinkFlags {
    fn default() -> Self {
        Self {
            mode: RadioMode::LoRaWan,
            rx_windows: true,
            tx_adaptive_speed: true,
            duty_cycle: true,
            tx_adaptive_channel: true,
            rx2_adaptive: true,
            otaa: true,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Debounce ---
    /// Minimum spacing between two accepted trigger events (milliseconds)
    pub debounce_interval_ms: u32,

    // --- Indicator / transmit timing ---
    /// TX indicator pulse before each send (milliseconds)
    pub tx_pulse_ms: u32,
    /// Settle delay between the TX pulse and the send (milliseconds)
    pub send_settle_ms: u32,
    /// Network-join settle delay at the end of bootstrap (milliseconds)
    pub join_settle_ms: u32,

    // --- Payload ---
    /// Byte 0 of every uplink payload
    pub sketch_type: SketchType,

    // --- Link ---
    pub link: LinkFlags,
    /// Push `link` to the radio even when `init` reported failure
    pub configure_on_init_failure: bool,

    // --- Main loop ---
    /// Idle poll period of the background loop (milliseconds)
    pub main_loop_poll_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Debounce
            debounce_interval_ms: 30_000, // 30 s

            // Timing
            tx_pulse_ms: 100,
            send_settle_ms: 1000,
            join_settle_ms: 8000,

            // Payload
            sketch_type: SketchType::PushEvent,

            // Link
            link: LinkFlags::default(),
            configure_on_init_failure: true,

            main_loop_poll_ms: 10,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Rejects instead of clamping.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_interval_ms == 0 {
            return Err(Error::Config("debounce interval must be non-zero"));
        }
        if self.send_settle_ms < self.tx_pulse_ms {
            return Err(Error::Config("send settle delay shorter than TX pulse"));
        }
        if self.main_loop_poll_ms == 0 {
            return Err(Error::Config("main loop poll period must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration baked in at compile time via `NOTIFIER_CONFIG_JSON`,
    /// falling back to [`SystemConfig::default`] if unset or invalid.
    pub fn from_build_env() -> Self {
        match option_env!("NOTIFIER_CONFIG_JSON") {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("NOTIFIER_CONFIG_JSON rejected ({}), using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
