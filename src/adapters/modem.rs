//! LoRaWAN radio-module uplink adapter.
//!
//! Implements [`UplinkPort`] by driving the radio module's host link over a
//! byte transport (UART on the board).  The module runs the whole LoRaWAN
//! stack; this adapter only frames commands and checks acknowledgements.
//!
//! The framing below is a placeholder host-link protocol defined by this
//! crate.  It is not the command set of any off-the-shelf radio module; a
//! real module needs its own [`ModemUplink`] counterpart.
//!
//! Command frame:
//! ```text
//! ┌──────┬─────┬─────┬─────┬──────────────┬───────────┐
//! │ 0xA5 │ cmd │ seq │ len │ data (len B) │ xor(cmd.. │
//! │      │     │     │     │              │    data)  │
//! └──────┴─────┴─────┴─────┴──────────────┴───────────┘
//! ```
//! Reply: `[0xA5, cmd | 0x80, seq, status]`, status 0 = accepted.
//!
//! `seq` increments per command.  Pending input is flushed before each
//! write, and a reply carrying another command's `seq` (a late ack for an
//! exchange that already timed out) is discarded.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: [`UartTransport`] writes through hw_init UART calls.
//! - **all other targets**: [`UartTransport`] simulates a module that acks everything.

use log::{debug, info};

use crate::app::ports::UplinkPort;
use crate::config::{LinkFlags, RadioMode};
use crate::error::LinkError;

const SYNC: u8 = 0xA5;
const REPLY_FLAG: u8 = 0x80;
const HEADER_SIZE: usize = 4;
/// Largest `data` section the module accepts.
const MAX_DATA: usize = 32;
const MAX_FRAME: usize = HEADER_SIZE + MAX_DATA + 1;
const REPLY_SIZE: usize = 4;
const STATUS_OK: u8 = 0;
/// Stale replies skipped before an exchange gives up.
const MAX_STALE_REPLIES: usize = 4;

/// Default wait for a module acknowledgement.
pub const DEFAULT_REPLY_TIMEOUT_MS: u32 = 2000;

/// Host-link command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Liveness probe used by `init`.
    Ping = 0x01,
    /// Apply and commit `[mode, flag bits]`.
    SetConfig = 0x02,
    /// Queue one uplink.
    Send = 0x03,
}

/// Byte-oriented channel to the radio module.
pub trait ModemTransport {
    /// Write `data`; returns the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError>;

    /// Read up to `buf.len()` bytes, waiting at most `timeout_ms`.
    /// Returns 0 on timeout.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, LinkError>;

    /// Discard any bytes already received but not yet read.
    fn flush_input(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Framing
// ───────────────────────────────────────────────────────────────

/// Encode a command frame into `out`.  Returns bytes written, or `None`
/// if `data` is too long or `out` too small.
pub fn encode_command(cmd: Command, seq: u8, data: &[u8], out: &mut [u8]) -> Option<usize> {
    let total = HEADER_SIZE + data.len() + 1;
    if data.len() > MAX_DATA || total > out.len() {
        return None;
    }

    out[0] = SYNC;
    out[1] = cmd as u8;
    out[2] = seq;
    out[3] = data.len() as u8;
    out[HEADER_SIZE..HEADER_SIZE + data.len()].copy_from_slice(data);
    out[total - 1] = out[1..total - 1].iter().fold(0, |acc, b| acc ^ b);

    Some(total)
}

/// `[mode, flag bits]` as sent with [`Command::SetConfig`].
pub fn encode_flags(flags: &LinkFlags) -> [u8; 2] {
    let mode = match flags.mode {
        RadioMode::LoRaWan => 0,
        RadioMode::LoRaRaw => 1,
    };
    let bits = [
        flags.rx_windows,
        flags.tx_adaptive_speed,
        flags.duty_cycle,
        flags.tx_adaptive_channel,
        flags.rx2_adaptive,
        flags.otaa,
    ]
    .iter()
    .enumerate()
    .fold(0u8, |acc, (i, &on)| acc | (u8::from(on) << i));
    [mode, bits]
}

// ───────────────────────────────────────────────────────────────
// ModemUplink
// ───────────────────────────────────────────────────────────────

pub struct ModemUplink<T> {
    transport: T,
    reply_timeout_ms: u32,
    initialised: bool,
    next_seq: u8,
}

impl<T: ModemTransport> ModemUplink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reply_timeout_ms: DEFAULT_REPLY_TIMEOUT_MS,
            initialised: false,
            next_seq: 0,
        }
    }

    pub fn with_reply_timeout(mut self, timeout_ms: u32) -> Self {
        self.reply_timeout_ms = timeout_ms;
        self
    }

    /// Whether the last `init` succeeded.
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one command and wait for its acknowledgement.  `rejected` is
    /// returned when the module answers with a non-zero status.
    fn exchange(&mut self, cmd: Command, data: &[u8], rejected: LinkError) -> Result<(), LinkError> {
        let seq = self.next_seq;
        self.next_seq = seq.wrapping_add(1);

        let mut frame = [0u8; MAX_FRAME];
        let len = encode_command(cmd, seq, data, &mut frame).ok_or(LinkError::SendFailed)?;

        self.transport.flush_input();
        if self.transport.write(&frame[..len])? != len {
            return Err(LinkError::Transport);
        }

        for _ in 0..=MAX_STALE_REPLIES {
            let reply = self.read_reply(cmd)?;
            if reply[0] != SYNC {
                self.transport.flush_input();
                return Err(LinkError::Transport);
            }
            if reply[1] != (cmd as u8 | REPLY_FLAG) || reply[2] != seq {
                debug!("modem: discarding stale reply {:02X?}", reply);
                continue;
            }
            if reply[3] != STATUS_OK {
                debug!("modem: {:?} rejected (status {})", cmd, reply[3]);
                return Err(rejected);
            }
            return Ok(());
        }
        Err(LinkError::Transport)
    }

    /// Read one full reply; a read that times out fails the exchange.
    fn read_reply(&mut self, cmd: Command) -> Result<[u8; REPLY_SIZE], LinkError> {
        let mut reply = [0u8; REPLY_SIZE];
        let mut got = 0;
        while got < REPLY_SIZE {
            let n = self
                .transport
                .read(&mut reply[got..], self.reply_timeout_ms)?;
            if n == 0 {
                debug!("modem: no reply to {:?}", cmd);
                return Err(LinkError::Transport);
            }
            got += n;
        }
        Ok(reply)
    }
}

impl<T: ModemTransport> UplinkPort for ModemUplink<T> {
    fn init(&mut self) -> Result<(), LinkError> {
        let res = self
            .exchange(Command::Ping, &[], LinkError::InitFailed)
            .map_err(|_| LinkError::InitFailed);
        self.initialised = res.is_ok();
        res
    }

    fn configure(&mut self, flags: &LinkFlags) -> Result<(), LinkError> {
        let data = encode_flags(flags);
        self.exchange(Command::SetConfig, &data, LinkError::ConfigRejected)?;
        info!("modem: configuration committed ({:?})", flags.mode);
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        self.exchange(Command::Send, payload, LinkError::SendFailed)
    }
}

// ───────────────────────────────────────────────────────────────
// UART transport
// ───────────────────────────────────────────────────────────────

pub struct UartTransport {
    port: i32,
    /// `[cmd, seq]` of the last frame, answered by the next `read`.
    #[cfg(not(target_os = "espidf"))]
    last_header: Option<[u8; 2]>,
}

impl UartTransport {
    pub fn new(port: i32) -> Self {
        Self {
            port,
            #[cfg(not(target_os = "espidf"))]
            last_header: None,
        }
    }

    pub fn port(&self) -> i32 {
        self.port
    }
}

#[cfg(target_os = "espidf")]
impl ModemTransport for UartTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        crate::drivers::hw_init::uart_write(self.port, data).map_err(|_| LinkError::Transport)
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, LinkError> {
        crate::drivers::hw_init::uart_read(self.port, buf, timeout_ms).map_err(|_| LinkError::Transport)
    }

    fn flush_input(&mut self) {
        crate::drivers::hw_init::uart_flush_input(self.port);
    }
}

/// Simulation: a module that acknowledges every well-formed command.
#[cfg(not(target_os = "espidf"))]
impl ModemTransport for UartTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        self.last_header = match data {
            [_, cmd, seq, ..] => Some([*cmd, *seq]),
            _ => None,
        };
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u32) -> Result<usize, LinkError> {
        let Some([cmd, seq]) = self.last_header.take() else {
            return Ok(0);
        };
        let reply = [SYNC, cmd | REPLY_FLAG, seq, STATUS_OK];
        let n = reply.len().min(buf.len());
        buf[..n].copy_from_slice(&reply[..n]);
        Ok(n)
    }

    fn flush_input(&mut self) {
        self.last_header = None;
    }
}
