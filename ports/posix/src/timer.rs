//! Thread-driven periodic timer
//!
//! Stands in for a hardware compare timer: the "interrupt" is a plain `fn()`
//! called from a dedicated thread once per period. Deadlines are absolute, so
//! the tick rate does not drift with scheduling jitter, and a late thread
//! catches up by firing back-to-back instead of dropping ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tick_timeout_core::PeriodicTimer;

/// Nanoseconds per second
const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Tick interrupt handler type
pub type TickHandler = fn();

/// Why [`ThreadTimer::try_start`] did not start a ticker thread
#[derive(Debug, thiserror::Error)]
pub enum PosixTimerError {
    #[error("timer already running")]
    AlreadyRunning,
    #[error("compare value not programmed")]
    NoCompareValue,
    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Host-side [`PeriodicTimer`].
#[derive(Debug)]
pub struct ThreadTimer {
    timer_clock_hz: u32,
    handler: TickHandler,
    compare_value: u32,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    /// Creates a stopped timer modelling an input clock of `timer_clock_hz`.
    pub fn new(timer_clock_hz: u32, handler: TickHandler) -> Self {
        Self {
            timer_clock_hz,
            handler,
            compare_value: 0,
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Time between two interrupts, once a compare value is programmed.
    pub fn period(&self) -> Option<Duration> {
        if self.compare_value == 0 || self.timer_clock_hz == 0 {
            return None;
        }
        let nanos = u64::from(self.compare_value) * NSEC_PER_SEC / u64::from(self.timer_clock_hz);
        Some(Duration::from_nanos(nanos))
    }

    /// Whether a ticker thread is currently firing the handler.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Spawns the ticker thread.
    pub fn try_start(&mut self) -> Result<(), PosixTimerError> {
        if self.thread.is_some() {
            return Err(PosixTimerError::AlreadyRunning);
        }
        let period = self.period().ok_or(PosixTimerError::NoCompareValue)?;

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let handler = self.handler;
        let spawned = thread::Builder::new()
            .name("tick-timer".into())
            .spawn(move || ticker_thread(period, handler, &running));

        match spawned {
            Ok(handle) => {
                self.thread = Some(handle);
                log::debug!("ticker thread started, period {:?}", period);
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                Err(err.into())
            }
        }
    }

    fn join(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("ticker thread panicked");
            } else {
                log::debug!("ticker thread stopped");
            }
        }
    }
}

impl PeriodicTimer for ThreadTimer {
    const COMPARE_LIMIT: u32 = u32::MAX;

    fn set_compare(&mut self, compare_value: u32) {
        self.compare_value = compare_value;
    }

    /// Logs a failed [`try_start`](ThreadTimer::try_start); the failure is
    /// then visible through [`started`](PeriodicTimer::started).
    fn start_periodic(&mut self) {
        if let Err(err) = self.try_start() {
            log::error!("tick timer not started: {}", err);
        }
    }

    fn stop(&mut self) {
        self.join();
    }

    fn started(&self) -> bool {
        self.is_running()
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.join();
    }
}

fn ticker_thread(period: Duration, handler: TickHandler, running: &AtomicBool) {
    let mut next_tick = Instant::now();

    while running.load(Ordering::Relaxed) {
        next_tick += period;

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }

        handler();
    }
}
