//! Tick Timeout port for POSIX hosts
//!
//! Runs the tick source on a desktop OS so applications and tests can use the
//! same configuration, counter and service code as the firmware. A dedicated
//! thread plays the role of the timer interrupt.
//!
//! # Usage
//!
//! ```no_run
//! use tick_timeout_core::{TickConfig, TickCounter, TickSource, TimeService};
//! use tick_timeout_posix::{delay_ms_yielding, ThreadTimer};
//!
//! static COUNTER: TickCounter = TickCounter::new();
//!
//! fn tick_isr() {
//!     COUNTER.on_tick();
//! }
//!
//! let config = TickConfig::new(1_000, 1_000_000).unwrap();
//! let mut source = TickSource::new(ThreadTimer::new(1_000_000, tick_isr), &COUNTER, config).unwrap();
//! source.start();
//!
//! let time = TimeService::new(&config, &COUNTER);
//! delay_ms_yielding(&time, 100);
//! ```

pub mod delay;
pub mod timer;

pub use delay::{delay_ms_yielding, delay_us_yielding};
pub use timer::{PosixTimerError, ThreadTimer};
