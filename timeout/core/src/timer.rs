//! Periodic timer abstraction and the tick source built on it

use crate::config::TickConfig;
use crate::counter::TickCounter;
use crate::error::{TickError, TickResult};

/// A hardware timer that raises an interrupt every time its count matches a
/// compare value, then starts over.
///
/// Register writes are treated as infallible. Wiring the interrupt vector to
/// [`TickSource::on_interrupt`] (or straight to [`TickCounter::on_tick`]) is
/// left to the application.
pub trait PeriodicTimer {
    /// Largest compare value the hardware register accepts.
    const COMPARE_LIMIT: u32;

    /// Programs the compare/reload value, in timer clock cycles per period.
    fn set_compare(&mut self, compare_value: u32);

    /// Enables the compare-match interrupt and starts counting in repeating mode.
    fn start_periodic(&mut self);

    /// Stops counting and disables the compare-match interrupt.
    fn stop(&mut self);

    /// Whether the last [`start_periodic`](Self::start_periodic) took effect.
    ///
    /// Register-backed timers cannot fail to start and keep the default.
    fn started(&self) -> bool {
        true
    }
}

/// Owns a [`PeriodicTimer`] and drives a [`TickCounter`] from its interrupt.
///
/// ```
/// use tick_timeout_core::{PeriodicTimer, TickClock, TickConfig, TickCounter, TickSource};
///
/// struct NullTimer;
///
/// impl PeriodicTimer for NullTimer {
///     const COMPARE_LIMIT: u32 = u16::MAX as u32;
///     fn set_compare(&mut self, _compare_value: u32) {}
///     fn start_periodic(&mut self) {}
///     fn stop(&mut self) {}
/// }
///
/// static COUNTER: TickCounter = TickCounter::new();
///
/// let config = TickConfig::new(10_000, 16_000_000).unwrap();
/// let mut source = TickSource::new(NullTimer, &COUNTER, config).unwrap();
/// source.start();
/// source.on_interrupt();
/// assert_eq!(COUNTER.ticks(), 1);
/// ```
#[derive(Debug)]
pub struct TickSource<'a, T: PeriodicTimer> {
    timer: T,
    counter: &'a TickCounter,
    config: TickConfig,
    running: bool,
}

impl<'a, T: PeriodicTimer> TickSource<'a, T> {
    /// Takes ownership of `timer`; nothing is written to it until
    /// [`start`](Self::start).
    pub fn new(timer: T, counter: &'a TickCounter, config: TickConfig) -> TickResult<Self> {
        if config.compare_value() > T::COMPARE_LIMIT {
            return Err(TickError::CompareOutOfRange {
                compare_value: config.compare_value(),
                limit: T::COMPARE_LIMIT,
            });
        }

        Ok(Self {
            timer,
            counter,
            config,
            running: false,
        })
    }

    /// Programs the compare value and starts periodic ticking.
    ///
    /// Ticks are only counted once the application enables interrupts
    /// globally. Calling `start` on a running source does nothing. If the
    /// timer reports it did not start, the source stays stopped and a later
    /// `start` tries again.
    pub fn start(&mut self) {
        if self.running {
            log::warn!("tick source already running, start ignored");
            return;
        }

        self.timer.set_compare(self.config.compare_value());
        self.timer.start_periodic();
        if !self.timer.started() {
            log::error!("tick source not started: timer did not start");
            return;
        }
        self.running = true;

        log::debug!(
            "tick source started: {} Hz, compare={}",
            self.config.actual_tick_hz(),
            self.config.compare_value()
        );
    }

    /// Interrupt handler body: one tick.
    #[inline]
    pub fn on_interrupt(&self) {
        self.counter.on_tick();
    }

    /// Whether [`start`](Self::start) has run and the timer started.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Compare value handed to the timer
    pub fn compare_value(&self) -> u32 {
        self.config.compare_value()
    }

    /// Configuration the source was built with
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Counter advanced by [`on_interrupt`](Self::on_interrupt)
    pub fn counter(&self) -> &'a TickCounter {
        self.counter
    }

    /// Stops the timer and gives it back.
    pub fn release(mut self) -> T {
        if self.running {
            self.timer.stop();
            log::debug!("tick source stopped");
        }
        self.timer
    }
}
