//! The tick counter
//!
//! One 32-bit counter, written only by the tick interrupt and read by
//! everything else. With a single writer the increment does not need an atomic
//! read-modify-write: a relaxed load followed by a relaxed store is enough, and
//! it compiles on cores without RMW atomics (Cortex-M0/M0+).
//!
//! Cores without native 32-bit atomic loads and stores (MSP430, AVR) enable the
//! `critical-section` feature, which keeps the counter in a
//! [`critical_section::Mutex`] instead.

use core::fmt;

#[cfg(feature = "critical-section")]
use core::cell::Cell;
#[cfg(not(feature = "critical-section"))]
use core::sync::atomic::{AtomicU32, Ordering};

/// Read-only view of a free-running tick count.
pub trait TickClock {
    /// Current tick count; wraps silently at `u32::MAX`.
    fn ticks(&self) -> u32;
}

impl<T: TickClock + ?Sized> TickClock for &T {
    #[inline]
    fn ticks(&self) -> u32 {
        (**self).ticks()
    }
}

/// Free-running 32-bit tick counter.
///
/// Place it in a `static` so the interrupt handler can reach it:
///
/// ```
/// use tick_timeout_core::{TickClock, TickCounter};
///
/// static COUNTER: TickCounter = TickCounter::new();
///
/// // Interrupt handler body
/// COUNTER.on_tick();
/// assert_eq!(COUNTER.ticks(), 1);
/// ```
pub struct TickCounter {
    #[cfg(not(feature = "critical-section"))]
    ticks: AtomicU32,
    #[cfg(feature = "critical-section")]
    ticks: critical_section::Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Counter at zero, the power-on state.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter starting at an arbitrary value.
    ///
    /// Starting just below `u32::MAX` makes the first wrap happen within
    /// seconds of boot instead of after hours.
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            #[cfg(not(feature = "critical-section"))]
            ticks: AtomicU32::new(ticks),
            #[cfg(feature = "critical-section")]
            ticks: critical_section::Mutex::new(Cell::new(ticks)),
        }
    }

    /// Advances the counter by exactly one tick.
    ///
    /// This is the whole body of the tick interrupt handler. It must only be
    /// called from one context.
    #[inline]
    pub fn on_tick(&self) {
        #[cfg(not(feature = "critical-section"))]
        {
            let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
            self.ticks.store(next, Ordering::Relaxed);
        }
        #[cfg(feature = "critical-section")]
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }
}

impl TickClock for TickCounter {
    #[inline]
    fn ticks(&self) -> u32 {
        #[cfg(not(feature = "critical-section"))]
        {
            self.ticks.load(Ordering::Relaxed)
        }
        #[cfg(feature = "critical-section")]
        {
            critical_section::with(|cs| self.ticks.borrow(cs).get())
        }
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickCounter")
            .field("ticks", &self.ticks())
            .finish()
    }
}
