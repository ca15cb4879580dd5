//! Accepted-event counter.
//!
//! 16 bits wide to match the payload; wraps 65535 → 0 silently.  Never
//! persisted, never reset while running.

#[derive(Debug, Default)]
pub struct EventCounter {
    value: u16,
}

impl EventCounter {
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Increment and return the new value.
    pub fn increment(&mut self) -> u16 {
        self.value = self.value.wrapping_add(1);
        self.value
    }

    pub fn value(&self) -> u16 {
        self.value
    }
}
