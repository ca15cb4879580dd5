//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to                 |
//! |------------|-----------------------------|-----------------------------|
//! | `hardware` | IndicatorPort + UplinkPort  | indicator driver + modem    |
//! | `log_sink` | EventSink                   | Serial log output           |
//! | `modem`    | UplinkPort                  | LoRaWAN module over UART    |
//! | `time`     | —                           | ESP32 system timer          |

pub mod hardware;
pub mod log_sink;
pub mod modem;
pub mod time;
