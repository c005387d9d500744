//! Tick Timeout Port for ARM Cortex-M
//!
//! Drives the tick counter from the SysTick exception. SysTick counts down
//! from its reload value and raises the exception on reaching zero, so a
//! compare value of `n` core cycles is programmed as a reload of `n - 1`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cortex_m_rt::exception;
//! use tick_timeout_core::{TickConfig, TickCounter, TickSource, TimeService};
//! use tick_timeout_port_cortex_m::SysTickTimer;
//!
//! static COUNTER: TickCounter = TickCounter::new();
//!
//! #[exception]
//! fn SysTick() {
//!     COUNTER.on_tick();
//! }
//!
//! let core = cortex_m::Peripherals::take().unwrap();
//! let config = TickConfig::new(10_000, 125_000_000).unwrap();
//! let mut source = TickSource::new(SysTickTimer::new(core.SYST), &COUNTER, config).unwrap();
//! source.start();
//! let time = TimeService::new(&config, &COUNTER);
//! ```

#![no_std]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use tick_timeout_core::PeriodicTimer;

// Re-export the core for convenience
pub use tick_timeout_core as timeout;

/// SysTick reload register width
const RELOAD_MAX: u32 = 0x00FF_FFFF;

/// Reload register value giving one exception every `compare_value` cycles.
const fn reload_for(compare_value: u32) -> u32 {
    let reload = compare_value.saturating_sub(1);
    if reload > RELOAD_MAX {
        RELOAD_MAX
    } else {
        reload
    }
}

/// SysTick clocked from the processor core clock.
pub struct SysTickTimer {
    syst: SYST,
}

impl SysTickTimer {
    /// Takes the SysTick peripheral; the counter is left disabled.
    pub fn new(mut syst: SYST) -> Self {
        syst.disable_counter();
        syst.disable_interrupt();
        Self { syst }
    }

    /// Gives the peripheral back.
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl PeriodicTimer for SysTickTimer {
    const COMPARE_LIMIT: u32 = RELOAD_MAX + 1;

    fn set_compare(&mut self, compare_value: u32) {
        self.syst.set_reload(reload_for(compare_value));
    }

    fn start_periodic(&mut self) {
        self.syst.clear_current();
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.enable_interrupt();
        self.syst.enable_counter();
    }

    fn stop(&mut self) {
        self.syst.disable_counter();
        self.syst.disable_interrupt();
    }
}

#[cfg(test)]
extern crate std;
