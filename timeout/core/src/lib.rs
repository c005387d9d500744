#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]

//! # Tick Timeout Core
//!
//! A free-running tick counter driven by a periodic hardware interrupt, and a
//! small service deriving microsecond/millisecond time, blocking delays and
//! non-blocking timeout checks from it.
//!
//! ## Module Overview
//! - [`config`]  – Compare value and tick scale derivation, validated up front.
//! - [`counter`] – The single-writer tick counter and the [`TickClock`] read view.
//! - [`timer`]   – The [`PeriodicTimer`] hardware seam and the [`TickSource`].
//! - [`service`] – [`TimeService`]: `now_us`, `delay_us`, `mark`, `elapsed_us`...
//! - [`wait`]    – [`Timeout`] polling, `nb`/`Future` waiting and an
//!   `embedded-hal` [`Delay`] adapter.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tick_timeout_core::{TickConfig, TickCounter, TimeService};
//!
//! static COUNTER: TickCounter = TickCounter::new();
//!
//! // 10 kHz tick from a 10 MHz timer clock: compare value 1000, 100 us per tick
//! let config = TickConfig::new(10_000, 10_000_000).unwrap();
//! let time = TimeService::new(&config, &COUNTER);
//!
//! let seed = time.mark();
//! while !time.elapsed_ms(250, seed) {
//!     // other cooperative work
//! }
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod service;
pub mod timer;
pub mod wait;

#[cfg(test)]
mod sim;

pub use config::{derive_compare_value, TickConfig, TickConfigBuilder};
pub use counter::{TickClock, TickCounter};
pub use error::{TickError, TickResult};
pub use service::{TimeService, TimeoutSeed};
pub use timer::{PeriodicTimer, TickSource};
pub use wait::{Delay, Timeout, TimeoutFuture};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Microseconds in one second; the time base every tick is scaled to.
pub const MICROS_PER_SEC: u32 = 1_000_000;

/// Microseconds in one millisecond.
pub const MICROS_PER_MILLI: u32 = 1_000;
