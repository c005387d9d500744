//! Delays that give the CPU back to the OS between polls.

use std::thread;

use tick_timeout_core::{TickClock, TimeService};

/// Like [`TimeService::delay_us`], yielding the thread between polls.
pub fn delay_us_yielding<C: TickClock>(time: &TimeService<C>, duration_us: u32) {
    time.delay_us_with(duration_us, thread::yield_now);
}

/// Like [`TimeService::delay_ms`], yielding the thread between polls.
pub fn delay_ms_yielding<C: TickClock>(time: &TimeService<C>, duration_ms: u32) {
    time.delay_ms_with(duration_ms, thread::yield_now);
}
