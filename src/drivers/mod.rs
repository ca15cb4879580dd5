//! Indicator and sensor drivers, hardware initialisation.

pub mod gpio;
pub mod hw_init;
pub mod indicator;
pub mod tilt;
