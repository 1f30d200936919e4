// src/tick.rs

use core::sync::atomic::{AtomicBool, Ordering};

/// Level flag raised by the periodic timer interrupt.
///
/// Single byte, written with plain atomic stores on both sides, so the
/// interrupt handler and the main loop never need a critical section.
/// Several ticks between two [`TickFlag::take`] calls collapse into one.
pub struct TickFlag {
    raised: AtomicBool,
}

impl TickFlag {
    pub const fn new() -> Self {
        TickFlag {
            raised: AtomicBool::new(false),
        }
    }

    /// Called from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Consume the flag. Returns whether at least one tick happened since
    /// the last call.
    #[inline]
    pub fn take(&self) -> bool {
        if self.raised.load(Ordering::Acquire) {
            self.raised.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}
