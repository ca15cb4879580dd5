//! Three-line status indicator driver.
//!
//! Three discrete LEDs (green / red / blue) on independent GPIOs, each
//! driven through an [`OutputPin`].  Implements
//! [`IndicatorPort`](crate::app::ports::IndicatorPort); pulsing comes from
//! the port's provided `pulse` method.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::{IndicatorLine, IndicatorPort};
use crate::error::IndicatorError;

pub struct StatusIndicator<O, E, T> {
    ok: O,
    error: E,
    tx: T,
    levels: [bool; 3],
}

impl<O, E, T> StatusIndicator<O, E, T>
where
    O: OutputPin,
    E: OutputPin,
    T: OutputPin,
{
    /// Take ownership of the three pins and drive them all low.
    pub fn new(ok: O, error: E, tx: T) -> Self {
        let mut indicator = Self {
            ok,
            error,
            tx,
            levels: [true; 3],
        };
        indicator.all_off();
        indicator
    }

    /// Give the pins back.
    pub fn release(self) -> (O, E, T) {
        (self.ok, self.error, self.tx)
    }

    fn drive(&mut self, line: IndicatorLine, asserted: bool) -> Result<(), IndicatorError> {
        let state = PinState::from(asserted);
        let res = match line {
            IndicatorLine::Ok => self.ok.set_state(state).map_err(|_| ()),
            IndicatorLine::Error => self.error.set_state(state).map_err(|_| ()),
            IndicatorLine::Tx => self.tx.set_state(state).map_err(|_| ()),
        };
        res.map_err(|()| IndicatorError::GpioWriteFailed)
    }
}

impl<O, E, T> IndicatorPort for StatusIndicator<O, E, T>
where
    O: OutputPin,
    E: OutputPin,
    T: OutputPin,
{
    fn set_level(&mut self, line: IndicatorLine, asserted: bool) {
        match self.drive(line, asserted) {
            Ok(()) => self.levels[line as usize] = asserted,
            Err(e) => warn!("Indicator {:?}: {}", line, e),
        }
    }

    /// Last level successfully driven onto `line`.
    fn is_asserted(&self, line: IndicatorLine) -> bool {
        self.levels[line as usize]
    }
}
