//! Ways to wait on a timeout
//!
//! A [`Timeout`] is a seed paired with its duration. It can be polled by hand
//! in a cooperative loop, driven through `nb` ([`Timeout::wait`]) or awaited
//! ([`Timeout::into_future`]). All three use the same wraparound-tolerant
//! comparison as [`TimeService::elapsed_us`].

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use embedded_hal::delay::DelayNs;

use crate::counter::TickClock;
use crate::service::{TimeService, TimeoutSeed};

/// A timeout started at `seed`, expiring `duration_us` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    seed: TimeoutSeed,
    duration_us: u32,
}

impl Timeout {
    /// Timeout of `duration_us` counted from `seed`.
    pub const fn new(seed: TimeoutSeed, duration_us: u32) -> Self {
        Self { seed, duration_us }
    }

    /// When the timeout was started or last restarted
    pub const fn seed(&self) -> TimeoutSeed {
        self.seed
    }

    /// Requested duration, before any clamping to the service's span
    pub const fn duration_us(&self) -> u32 {
        self.duration_us
    }

    /// Same check as [`TimeService::elapsed_us`] on this seed and duration.
    pub fn is_expired<C: TickClock>(&self, time: &TimeService<C>) -> bool {
        time.elapsed_us(self.duration_us, self.seed)
    }

    /// Microseconds left, zero once expired.
    pub fn remaining_us<C: TickClock>(&self, time: &TimeService<C>) -> u32 {
        self.duration_us
            .min(time.max_span_us())
            .saturating_sub(time.since(self.seed))
    }

    /// Re-seeds the timeout from the current time, keeping its duration.
    pub fn restart<C: TickClock>(&mut self, time: &TimeService<C>) {
        self.seed = time.mark();
    }

    /// Non-blocking wait: `WouldBlock` until expired.
    ///
    /// ```
    /// # use tick_timeout_core::{TickConfig, TickCounter, TimeService};
    /// # static COUNTER: TickCounter = TickCounter::new();
    /// # let config = TickConfig::new(1_000_000, 1_000_000).unwrap();
    /// let time = TimeService::new(&config, &COUNTER);
    /// let timeout = time.timeout_us(5);
    /// assert_eq!(timeout.wait(&time), Err(nb::Error::WouldBlock));
    /// for _ in 0..5 {
    ///     COUNTER.on_tick();
    /// }
    /// assert_eq!(nb::block!(timeout.wait(&time)), Ok(()));
    /// ```
    pub fn wait<C: TickClock>(&self, time: &TimeService<C>) -> nb::Result<(), Infallible> {
        if self.is_expired(time) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Future resolving once the timeout expires.
    pub fn into_future<C: TickClock>(self, time: &TimeService<C>) -> TimeoutFuture<'_, C> {
        TimeoutFuture {
            timeout: self,
            time,
        }
    }
}

/// Future returned by [`Timeout::into_future`].
///
/// The tick interrupt does not know about wakers, so a pending poll wakes its
/// own task again; the executor keeps polling it between other tasks.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct TimeoutFuture<'s, C> {
    timeout: Timeout,
    time: &'s TimeService<C>,
}

impl<C: TickClock> Future for TimeoutFuture<'_, C> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.timeout.is_expired(self.time) {
            Poll::Ready(())
        } else {
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// [`DelayNs`] implementation backed by a [`TimeService`], for drivers that
/// take an `embedded-hal` delay.
///
/// Resolution is one tick; nanosecond requests round up to whole microseconds.
#[derive(Debug)]
pub struct Delay<'s, C> {
    time: &'s TimeService<C>,
}

impl<'s, C: TickClock> Delay<'s, C> {
    /// Borrows `time` for the lifetime of the adapter.
    pub fn new(time: &'s TimeService<C>) -> Self {
        Self { time }
    }
}

impl<C: TickClock> DelayNs for Delay<'_, C> {
    fn delay_ns(&mut self, ns: u32) {
        self.time.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.time.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TickConfig;
    use crate::sim::SimClock;

    fn one_us() -> TickConfig {
        TickConfig::new(1_000_000, 1_000_000).unwrap()
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let clock = SimClock::at(0);
        let time = TimeService::new(&one_us(), &clock);

        let timeout = time.timeout_us(100);
        assert_eq!(timeout.remaining_us(&time), 100);
        clock.advance(40);
        assert_eq!(timeout.remaining_us(&time), 60);
        assert!(!timeout.is_expired(&time));
        clock.advance(80);
        assert_eq!(timeout.remaining_us(&time), 0);
        assert!(timeout.is_expired(&time));
    }

    #[test]
    fn restart_reseeds_from_now() {
        let clock = SimClock::at(0);
        let time = TimeService::new(&one_us(), &clock);

        let mut timeout = time.timeout_us(10);
        clock.advance(10);
        assert!(timeout.is_expired(&time));

        timeout.restart(&time);
        assert_eq!(timeout.seed().raw(), 10);
        assert!(!timeout.is_expired(&time));
        clock.advance(10);
        assert!(timeout.is_expired(&time));
    }

    #[test]
    fn timeout_ms_is_stored_in_microseconds() {
        let clock = SimClock::at(0);
        let time = TimeService::new(&one_us(), &clock);

        assert_eq!(time.timeout_ms(3).duration_us(), 3_000);
        assert_eq!(time.timeout_ms(u32::MAX).duration_us(), u32::MAX);
    }

    #[test]
    fn nb_wait_blocks_until_expired() {
        let clock = SimClock::stepping(0, 1);
        let time = TimeService::new(&one_us(), &clock);

        let timeout = time.timeout_us(3);
        assert_eq!(timeout.wait(&time), Err(nb::Error::WouldBlock));
        assert_eq!(nb::block!(timeout.wait(&time)), Ok(()));
        assert!(clock.raw() >= 4);
    }

    #[test]
    fn timeout_longer_than_the_range_still_expires() {
        let clock = SimClock::at(0);
        let time = TimeService::new(&TickConfig::new(10_000, 10_000_000).unwrap(), &clock);

        let timeout = time.timeout_ms(5_000_000);
        clock.advance(42_949_671);
        assert!(!timeout.is_expired(&time));
        assert_eq!(timeout.remaining_us(&time), 100);
        clock.advance(1);
        assert!(timeout.is_expired(&time));
        assert_eq!(timeout.remaining_us(&time), 0);
        assert_eq!(timeout.wait(&time), Ok(()));
    }

    #[tokio::test]
    async fn future_for_saturated_timeout_resolves() {
        let clock = SimClock::stepping(0, 248_264);
        let time = TimeService::new(&TickConfig::new(10_000, 10_000_000).unwrap(), &clock);

        time.timeout_ms(u32::MAX).into_future(&time).await;
        assert!(clock.raw() >= 42_949_672);
    }

    #[tokio::test]
    async fn future_resolves_after_duration() {
        let clock = SimClock::stepping(u32::MAX - 2, 1);
        let time = TimeService::new(&one_us(), &clock);

        let timeout = time.timeout_us(8);
        timeout.into_future(&time).await;
        assert!(timeout.is_expired(&time));
    }

    #[test]
    fn delay_ns_rounds_up_to_whole_microseconds() {
        fn pause(delay: &mut impl DelayNs) {
            delay.delay_ns(1_500);
        }

        let clock = SimClock::stepping(0, 1);
        let time = TimeService::new(&one_us(), &clock);
        pause(&mut Delay::new(&time));
        // seed at 0, polls at 1 and 2
        assert_eq!(clock.raw(), 3);
    }

    #[test]
    fn delay_ms_goes_through_the_service() {
        let clock = SimClock::stepping(0, 1);
        let time = TimeService::new(&TickConfig::new(1_000, 1_000_000).unwrap(), &clock);
        Delay::new(&time).delay_ms(4);
        assert_eq!(clock.raw(), 5);
    }
}
