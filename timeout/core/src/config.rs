//! Tick configuration
//!
//! A [`TickConfig`] captures the two frequencies a tick source is set up from
//! (the timer's input clock and the desired tick rate) together with the two
//! values derived from them once: the hardware compare value and the number of
//! microseconds one tick represents.
//!
//! Both derivations are integer divisions. Rather than let truncation bias the
//! time scale, construction rejects frequency pairs that do not divide evenly.

use crate::error::{TickError, TickResult};
use crate::MICROS_PER_SEC;

/// Computes the compare (reload) value giving `tick_hz` ticks from a timer
/// clocked at `timer_clock_hz`.
///
/// ```
/// use tick_timeout_core::derive_compare_value;
///
/// assert_eq!(derive_compare_value(10_000, 10_000_000), Ok(1000));
/// assert!(derive_compare_value(3_000, 10_000_000).is_err());
/// ```
pub const fn derive_compare_value(tick_hz: u32, timer_clock_hz: u32) -> TickResult<u32> {
    if tick_hz == 0 {
        return Err(TickError::TickRateOutOfRange { tick_hz });
    }
    if tick_hz > timer_clock_hz {
        return Err(TickError::TickRateAboveTimerClock {
            tick_hz,
            timer_clock_hz,
        });
    }
    if timer_clock_hz % tick_hz != 0 {
        return Err(TickError::InexactCompareValue {
            tick_hz,
            timer_clock_hz,
        });
    }
    Ok(timer_clock_hz / tick_hz)
}

/// Validated tick configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    timer_clock_hz: u32,
    tick_hz: u32,
    compare_value: u32,
    us_per_tick: u32,
}

impl TickConfig {
    /// Strict configuration: both derivations must be exact and the compare
    /// value may use the full 32-bit range.
    ///
    /// Usable in `const` context, so a misconfigured `const` fails the build:
    ///
    /// ```
    /// use tick_timeout_core::TickConfig;
    ///
    /// const CONFIG: TickConfig = match TickConfig::new(10_000, 10_000_000) {
    ///     Ok(config) => config,
    ///     Err(_) => panic!("bad tick configuration"),
    /// };
    /// assert_eq!(CONFIG.compare_value(), 1000);
    /// assert_eq!(CONFIG.us_per_tick(), 100);
    /// ```
    pub const fn new(tick_hz: u32, timer_clock_hz: u32) -> TickResult<Self> {
        Self::validate(tick_hz, timer_clock_hz, u32::MAX, false)
    }

    /// Returns a builder for configurations needing a register limit or an
    /// inexact compare value.
    pub fn builder() -> TickConfigBuilder {
        TickConfigBuilder::default()
    }

    const fn validate(
        tick_hz: u32,
        timer_clock_hz: u32,
        compare_limit: u32,
        allow_inexact_compare: bool,
    ) -> TickResult<Self> {
        if tick_hz > MICROS_PER_SEC {
            return Err(TickError::TickRateOutOfRange { tick_hz });
        }
        let compare_value = match derive_compare_value(tick_hz, timer_clock_hz) {
            Ok(compare_value) => compare_value,
            Err(TickError::InexactCompareValue { .. }) if allow_inexact_compare => {
                timer_clock_hz / tick_hz
            }
            Err(err) => return Err(err),
        };
        if MICROS_PER_SEC % tick_hz != 0 {
            return Err(TickError::InexactTickScale { tick_hz });
        }
        if compare_value > compare_limit {
            return Err(TickError::CompareOutOfRange {
                compare_value,
                limit: compare_limit,
            });
        }

        Ok(Self {
            timer_clock_hz,
            tick_hz,
            compare_value,
            us_per_tick: MICROS_PER_SEC / tick_hz,
        })
    }

    /// Timer input clock in Hz
    pub const fn timer_clock_hz(&self) -> u32 {
        self.timer_clock_hz
    }

    /// Requested tick frequency in Hz
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Value for the timer's compare/reload register
    pub const fn compare_value(&self) -> u32 {
        self.compare_value
    }

    /// Microseconds represented by one tick (the tick scale factor)
    pub const fn us_per_tick(&self) -> u32 {
        self.us_per_tick
    }

    /// Tick frequency the hardware actually produces.
    ///
    /// Equal to [`tick_hz`](Self::tick_hz) unless the configuration was built
    /// with [`TickConfigBuilder::allow_inexact_compare`], in which case it is
    /// marginally higher.
    pub const fn actual_tick_hz(&self) -> u32 {
        self.timer_clock_hz / self.compare_value
    }

    /// Whether the compare value reproduces `tick_hz` exactly.
    pub const fn is_exact(&self) -> bool {
        self.timer_clock_hz % self.tick_hz == 0
    }
}

/// Builder for [`TickConfig`].
#[derive(Debug, Clone, Copy)]
pub struct TickConfigBuilder {
    timer_clock_hz: u32,
    tick_hz: u32,
    compare_limit: u32,
    allow_inexact_compare: bool,
}

impl Default for TickConfigBuilder {
    fn default() -> Self {
        Self {
            timer_clock_hz: MICROS_PER_SEC,
            tick_hz: 1_000,
            compare_limit: u32::MAX,
            allow_inexact_compare: false,
        }
    }
}

impl TickConfigBuilder {
    /// Sets the timer input clock in Hz.
    pub fn timer_clock_hz(mut self, hz: u32) -> Self {
        self.timer_clock_hz = hz;
        self
    }

    /// Sets the desired tick frequency in Hz.
    pub fn tick_hz(mut self, hz: u32) -> Self {
        self.tick_hz = hz;
        self
    }

    /// Sets the largest compare value the timer register accepts
    /// (e.g. `0xFFFF` for a 16-bit timer).
    pub fn compare_limit(mut self, limit: u32) -> Self {
        self.compare_limit = limit;
        self
    }

    /// Accepts a timer clock that the tick rate does not divide.
    ///
    /// The compare value is truncated, so the hardware ticks slightly faster
    /// than requested while every tick is still counted as `us_per_tick`.
    pub fn allow_inexact_compare(mut self, allow: bool) -> Self {
        self.allow_inexact_compare = allow;
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> TickResult<TickConfig> {
        let config = TickConfig::validate(
            self.tick_hz,
            self.timer_clock_hz,
            self.compare_limit,
            self.allow_inexact_compare,
        )?;

        if !config.is_exact() {
            log::warn!(
                "inexact compare value {}: {} Hz requested, {} Hz produced",
                config.compare_value,
                config.tick_hz,
                config.actual_tick_hz()
            );
        }
        log::debug!(
            "tick config: {} Hz from {} Hz clock, compare={} us_per_tick={}",
            config.tick_hz,
            config.timer_clock_hz,
            config.compare_value,
            config.us_per_tick
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_khz_from_ten_mhz() {
        let config = TickConfig::new(10_000, 10_000_000).unwrap();
        assert_eq!(config.compare_value(), 1000);
        assert_eq!(config.us_per_tick(), 100);
        assert_eq!(config.actual_tick_hz(), 10_000);
        assert!(config.is_exact());
    }

    #[test]
    fn derive_compare_value_rejects_zero_and_fast_ticks() {
        assert_eq!(
            derive_compare_value(0, 1_000_000),
            Err(TickError::TickRateOutOfRange { tick_hz: 0 })
        );
        assert_eq!(
            derive_compare_value(2_000_000, 1_000_000),
            Err(TickError::TickRateAboveTimerClock {
                tick_hz: 2_000_000,
                timer_clock_hz: 1_000_000
            })
        );
        assert_eq!(derive_compare_value(1_000_000, 1_000_000), Ok(1));
    }

    #[test]
    fn tick_rate_must_divide_one_mhz() {
        // 3 kHz would truncate to 333 us per tick
        assert_eq!(
            TickConfig::new(3_000, 12_000_000),
            Err(TickError::InexactTickScale { tick_hz: 3_000 })
        );
        assert_eq!(
            TickConfig::new(2_000_000, 12_000_000),
            Err(TickError::TickRateOutOfRange { tick_hz: 2_000_000 })
        );
    }

    #[test]
    fn tick_rate_above_timer_clock() {
        assert_eq!(
            TickConfig::new(100_000, 32_768),
            Err(TickError::TickRateAboveTimerClock {
                tick_hz: 100_000,
                timer_clock_hz: 32_768
            })
        );
    }

    #[test]
    fn inexact_compare_value_needs_opt_in() {
        // 32.768 kHz crystal into a 1 kHz tick
        assert_eq!(
            TickConfig::new(1_000, 32_768),
            Err(TickError::InexactCompareValue {
                tick_hz: 1_000,
                timer_clock_hz: 32_768
            })
        );

        let config = TickConfig::builder()
            .timer_clock_hz(32_768)
            .tick_hz(1_000)
            .allow_inexact_compare(true)
            .build()
            .unwrap();
        assert_eq!(config.compare_value(), 32);
        assert_eq!(config.actual_tick_hz(), 1_024);
        assert_eq!(config.us_per_tick(), 1_000);
        assert!(!config.is_exact());
    }

    #[test]
    fn new_agrees_with_derive_compare_value() {
        let pairs = [
            (10_000, 10_000_000),
            (1_000, 16_000_000),
            (100, 32_768),
            (0, 1_000_000),
            (2_000, 1_000),
        ];
        for (tick_hz, timer_clock_hz) in pairs {
            assert_eq!(
                TickConfig::new(tick_hz, timer_clock_hz).map(|c| c.compare_value()),
                derive_compare_value(tick_hz, timer_clock_hz),
                "tick_hz={tick_hz} timer_clock_hz={timer_clock_hz}"
            );
        }
    }

    #[test]
    fn inexact_opt_in_keeps_other_checks() {
        let allow = TickConfig::builder().allow_inexact_compare(true);
        assert_eq!(
            allow.timer_clock_hz(32_768).tick_hz(100_000).build(),
            Err(TickError::TickRateAboveTimerClock {
                tick_hz: 100_000,
                timer_clock_hz: 32_768
            })
        );
        assert_eq!(
            allow.tick_hz(0).build(),
            Err(TickError::TickRateOutOfRange { tick_hz: 0 })
        );
        assert_eq!(
            allow.timer_clock_hz(32_768).tick_hz(3_000).build(),
            Err(TickError::InexactTickScale { tick_hz: 3_000 })
        );
    }

    #[test]
    fn compare_limit_for_sixteen_bit_timer() {
        let result = TickConfig::builder()
            .timer_clock_hz(16_000_000)
            .tick_hz(100)
            .compare_limit(0xFFFF)
            .build();
        assert_eq!(
            result,
            Err(TickError::CompareOutOfRange {
                compare_value: 160_000,
                limit: 0xFFFF
            })
        );

        let config = TickConfig::builder()
            .timer_clock_hz(16_000_000)
            .tick_hz(10_000)
            .compare_limit(0xFFFF)
            .build()
            .unwrap();
        assert_eq!(config.compare_value(), 1_600);
    }

    #[test]
    fn builder_defaults_to_one_khz_from_one_mhz() {
        let config = TickConfig::builder().build().unwrap();
        assert_eq!(config.tick_hz(), 1_000);
        assert_eq!(config.timer_clock_hz(), 1_000_000);
        assert_eq!(config.compare_value(), 1_000);
        assert_eq!(config.us_per_tick(), 1_000);
    }
}
