//! Deterministic clock for unit tests.

use core::cell::Cell;

use crate::counter::TickClock;

/// Clock whose count only moves when told to, or by `step` ticks per read.
#[derive(Debug, Default)]
pub struct SimClock {
    ticks: Cell<u32>,
    step: u32,
}

impl SimClock {
    pub fn at(ticks: u32) -> Self {
        Self {
            ticks: Cell::new(ticks),
            step: 0,
        }
    }

    /// Clock advancing `step` ticks after every read, so busy waits end.
    pub fn stepping(ticks: u32, step: u32) -> Self {
        Self {
            ticks: Cell::new(ticks),
            step,
        }
    }

    pub fn advance(&self, ticks: u32) {
        self.ticks.set(self.ticks.get().wrapping_add(ticks));
    }

    pub fn raw(&self) -> u32 {
        self.ticks.get()
    }
}

impl TickClock for SimClock {
    fn ticks(&self) -> u32 {
        let now = self.ticks.get();
        self.ticks.set(now.wrapping_add(self.step));
        now
    }
}
