//! Trigger debounce window.
//!
//! A trigger is accepted only if at least `min_interval_ms` have elapsed
//! since the last *accepted* trigger.  Rejected triggers never move the
//! window.  All arithmetic is wrapping so the comparison stays correct when
//! the 32-bit millisecond clock rolls over (~49.7 days).

/// Wraparound-safe acceptance predicate.
///
/// Returns `true` iff `now_ms - last_accepted_ms >= min_interval_ms`, using
/// unsigned wrapping subtraction.
pub const fn accept(now_ms: u32, last_accepted_ms: u32, min_interval_ms: u32) -> bool {
    now_ms.wrapping_sub(last_accepted_ms) >= min_interval_ms
}

/// Result of a debounce check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Far enough from the previous accepted trigger (or the first one).
    Accepted,
    /// Inside the window; carries the time since the last accepted trigger.
    Rejected { since_last_ms: u32 },
}

/// Owns the last-accepted timestamp.
pub struct DebounceTimer {
    min_interval_ms: u32,
    /// `None` until the first trigger is accepted.
    last_accepted_ms: Option<u32>,
}

impl DebounceTimer {
    pub const fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Check `now_ms` against the window and, on acceptance, record it as
    /// the new last-accepted time.  The first trigger after boot is always
    /// accepted regardless of the interval.
    pub fn check(&mut self, now_ms: u32) -> Verdict {
        match self.last_accepted_ms {
            Some(last) if !accept(now_ms, last, self.min_interval_ms) => Verdict::Rejected {
                since_last_ms: now_ms.wrapping_sub(last),
            },
            _ => {
                self.last_accepted_ms = Some(now_ms);
                Verdict::Accepted
            }
        }
    }

    pub fn last_accepted_ms(&self) -> Option<u32> {
        self.last_accepted_ms
    }

    pub fn min_interval_ms(&self) -> u32 {
        self.min_interval_ms
    }
}
