//! Time and timeout service
//!
//! Every query is derived from one raw tick count. Elapsed time is always
//! computed as `now.wrapping_sub(seed) >= duration`, never as
//! `now >= seed + duration`, so comparisons stay correct across a counter wrap
//! as long as the interval is shorter than the full 32-bit microsecond range
//! (about 71.6 minutes).

use core::fmt;

use crate::config::TickConfig;
use crate::counter::TickClock;
use crate::wait::Timeout;
use crate::MICROS_PER_MILLI;

/// Microsecond timestamp captured at the start of a timed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutSeed(u32);

impl TimeoutSeed {
    /// Wraps a microsecond timestamp, e.g. one restored from storage.
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// The raw microsecond snapshot
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for TimeoutSeed {
    fn from(us: u32) -> Self {
        Self(us)
    }
}

impl From<TimeoutSeed> for u32 {
    fn from(seed: TimeoutSeed) -> Self {
        seed.0
    }
}

impl fmt::Display for TimeoutSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeoutSeed {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32}us", self.0);
    }
}

/// Converts milliseconds to microseconds, saturating instead of wrapping.
#[inline]
pub(crate) const fn ms_to_us(ms: u32) -> u32 {
    ms.saturating_mul(MICROS_PER_MILLI)
}

/// Elapsed-time, delay and timeout queries over a [`TickClock`].
#[derive(Debug)]
pub struct TimeService<C> {
    clock: C,
    us_per_tick: u32,
    max_span_us: u32,
}

impl<C: TickClock> TimeService<C> {
    /// Creates a service reading `clock` at the scale of `config`.
    pub fn new(config: &TickConfig, clock: C) -> Self {
        let us_per_tick = config.us_per_tick();
        Self {
            clock,
            us_per_tick,
            max_span_us: u32::MAX / us_per_tick * us_per_tick,
        }
    }

    /// Microseconds one tick stands for
    pub fn us_per_tick(&self) -> u32 {
        self.us_per_tick
    }

    /// Longest interval [`since`](Self::since) can report before wrapping.
    ///
    /// `since` moves in whole ticks, so below 1 MHz this is a little short of
    /// `u32::MAX`.
    pub fn max_span_us(&self) -> u32 {
        self.max_span_us
    }

    /// The clock the service reads
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time since the counter started, in microseconds. Wraps silently.
    #[inline]
    pub fn now_us(&self) -> u32 {
        self.clock.ticks().wrapping_mul(self.us_per_tick)
    }

    /// Time since the counter started, in milliseconds (truncated).
    ///
    /// This value wraps at `u32::MAX / 1000`, so differences between two
    /// `now_ms` readings are not wraparound-tolerant. Time intervals with
    /// [`mark`](Self::mark) and [`elapsed_ms`](Self::elapsed_ms) instead.
    #[inline]
    pub fn now_ms(&self) -> u32 {
        self.now_us() / MICROS_PER_MILLI
    }

    /// Captures a seed for later [`elapsed_us`](Self::elapsed_us) /
    /// [`elapsed_ms`](Self::elapsed_ms) checks.
    #[inline]
    pub fn mark(&self) -> TimeoutSeed {
        TimeoutSeed(self.now_us())
    }

    /// Microseconds since `seed`, wraparound-tolerant.
    #[inline]
    pub fn since(&self, seed: TimeoutSeed) -> u32 {
        self.now_us().wrapping_sub(seed.0)
    }

    /// True once at least `duration_us` has passed since `seed`.
    ///
    /// Durations above [`max_span_us`](Self::max_span_us) are clamped to it,
    /// otherwise they could never be reached.
    #[inline]
    pub fn elapsed_us(&self, duration_us: u32, seed: TimeoutSeed) -> bool {
        self.since(seed) >= duration_us.min(self.max_span_us)
    }

    /// True once at least `duration_ms` has passed since `seed`.
    ///
    /// The seed is still a microsecond snapshot from [`mark`](Self::mark).
    /// Durations beyond the counter range saturate to
    /// [`max_span_us`](Self::max_span_us).
    #[inline]
    pub fn elapsed_ms(&self, duration_ms: u32, seed: TimeoutSeed) -> bool {
        self.elapsed_us(ms_to_us(duration_ms), seed)
    }

    /// Spins until `duration_us` has passed.
    pub fn delay_us(&self, duration_us: u32) {
        self.delay_us_with(duration_us, core::hint::spin_loop);
    }

    /// Spins until `duration_ms` has passed.
    pub fn delay_ms(&self, duration_ms: u32) {
        self.delay_us(ms_to_us(duration_ms));
    }

    /// Waits `duration_us`, calling `relax` between polls of the counter.
    ///
    /// `relax` decides how the wait is spent (a spin hint, an OS yield, a
    /// `wfi`); the elapsed comparison is the same as [`delay_us`](Self::delay_us).
    pub fn delay_us_with<F: FnMut()>(&self, duration_us: u32, mut relax: F) {
        let seed = self.mark();
        while !self.elapsed_us(duration_us, seed) {
            relax();
        }
    }

    /// Millisecond form of [`delay_us_with`](Self::delay_us_with).
    pub fn delay_ms_with<F: FnMut()>(&self, duration_ms: u32, relax: F) {
        self.delay_us_with(ms_to_us(duration_ms), relax);
    }

    /// Starts a timeout of `duration_us` from now.
    pub fn timeout_us(&self, duration_us: u32) -> Timeout {
        Timeout::new(self.mark(), duration_us)
    }

    /// Starts a timeout of `duration_ms` from now.
    pub fn timeout_ms(&self, duration_ms: u32) -> Timeout {
        Timeout::new(self.mark(), ms_to_us(duration_ms))
    }
}
