//! One-shot hardware peripheral initialization.
//!
//! Configures the indicator GPIOs, the tilt input and the radio-module
//! UART using raw ESP-IDF sys calls. Called once from `main()` before the
//! link bootstrap.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "modem UART init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Configure every peripheral.  A failing step does not stop the others;
/// the first error is returned after all have been tried.
#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the event loop; single-threaded.
    let results = unsafe { [init_gpio_outputs(), init_tilt_input(), init_modem_uart()] };

    for e in results.iter().filter_map(|r| r.err()) {
        log::warn!("hw_init: {}", e);
    }
    if let Some(e) = results.into_iter().find_map(Result::err) {
        return Err(e);
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::LED_OK_GPIO,
        pins::LED_ERROR_GPIO,
        pins::LED_TX_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: indicator outputs configured (all low)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Tilt input ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_tilt_input() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::TILT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: tilt input configured (any edge)");
    Ok(())
}

// ── Modem UART ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_modem_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::MODEM_UART_BAUD as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    let ret = unsafe {
        uart_driver_install(pins::MODEM_UART_PORT, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe { uart_param_config(pins::MODEM_UART_PORT, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    // -1 = UART_PIN_NO_CHANGE for RTS/CTS.
    let ret = unsafe {
        uart_set_pin(pins::MODEM_UART_PORT, pins::MODEM_UART_TX_GPIO, pins::MODEM_UART_RX_GPIO, -1, -1)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: modem UART{} at {} baud", pins::MODEM_UART_PORT, pins::MODEM_UART_BAUD);
    Ok(())
}

/// Write raw bytes to a UART.  Returns bytes queued, or the negative rc.
#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, data: &[u8]) -> Result<usize, i32> {
    // SAFETY: driver installed in init_modem_uart(); `data` outlives the call
    // (uart_write_bytes copies into the TX ring buffer before returning).
    let ret = unsafe { uart_write_bytes(port, data.as_ptr().cast(), data.len()) };
    if ret < 0 { Err(ret) } else { Ok(ret as usize) }
}

/// Milliseconds to RTOS ticks at `tick_hz`, rounded up so a non-zero wait
/// never becomes a zero-tick poll.
pub fn ms_to_ticks(ms: u32, tick_hz: u32) -> u32 {
    (u64::from(ms) * u64::from(tick_hz)).div_ceil(1000) as u32
}

/// Read up to `buf.len()` bytes, waiting at most `timeout_ms`.
#[cfg(target_os = "espidf")]
pub fn uart_read(port: i32, buf: &mut [u8], timeout_ms: u32) -> Result<usize, i32> {
    let ticks = ms_to_ticks(timeout_ms, configTICK_RATE_HZ);
    // SAFETY: driver installed in init_modem_uart(); `buf` is exclusively
    // borrowed for the duration of the call.
    let ret = unsafe { uart_read_bytes(port, buf.as_mut_ptr().cast(), buf.len() as u32, ticks) };
    if ret < 0 { Err(ret) } else { Ok(ret as usize) }
}

/// Drop everything in the UART RX buffer.
#[cfg(target_os = "espidf")]
pub fn uart_flush_input(port: i32) {
    // SAFETY: driver installed in init_modem_uart(); a failed flush only
    // leaves bytes that the modem adapter rejects by sequence number.
    let ret = unsafe { esp_idf_svc::sys::uart_flush_input(port) };
    if ret != ESP_OK as i32 {
        log::debug!("hw_init: UART{} flush failed (rc={})", port, ret);
    }
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::drivers::tilt::tilt_isr_handler;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tilt_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1_000) as u32;
    tilt_isr_handler(now_ms);
}

/// Install per-pin GPIO ISR service and register the tilt handler.
/// Call after the link bootstrap, right before the event loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler registered
    // below only latches a timestamp into the tilt signal.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Tilt switch: any edge
        gpio_set_intr_type(pins::TILT_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        let ret = gpio_isr_handler_add(pins::TILT_GPIO, Some(tilt_gpio_isr), core::ptr::null_mut());
        if ret != ESP_OK as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }
        gpio_intr_enable(pins::TILT_GPIO);

        info!("hw_init: ISR service installed (tilt)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
