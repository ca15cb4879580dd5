//! GPIO / peripheral pin assignments for the notifier board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Status indicator (three discrete LEDs)
// ---------------------------------------------------------------------------

/// Green — link initialised.
pub const LED_OK_GPIO: i32 = 5;
/// Red — link initialisation failed.
pub const LED_ERROR_GPIO: i32 = 9;
/// Blue — transmission in flight.
pub const LED_TX_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// Tilt / vibration switch output.  Interrupt on any edge.
pub const TILT_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Radio module UART
// ---------------------------------------------------------------------------

/// UART port wired to the LoRaWAN radio module.
pub const MODEM_UART_PORT: i32 = 1;
pub const MODEM_UART_TX_GPIO: i32 = 17;
pub const MODEM_UART_RX_GPIO: i32 = 18;
/// Radio module host-link baud rate.
pub const MODEM_UART_BAUD: u32 = 19_200;
