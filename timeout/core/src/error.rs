//! Configuration errors
//!
//! Every runtime operation of the crate is infallible; the only failures are
//! tick configurations that would bias the time scale.

use core::fmt;

/// Result type for configuration operations
pub type TickResult<T> = Result<T, TickError>;

/// Rejected tick configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// Tick frequency is zero or above 1 MHz
    TickRateOutOfRange { tick_hz: u32 },
    /// Tick frequency does not divide 1 MHz, so one tick is not a whole number of microseconds
    InexactTickScale { tick_hz: u32 },
    /// Tick frequency is above the timer input clock
    TickRateAboveTimerClock { tick_hz: u32, timer_clock_hz: u32 },
    /// Tick frequency does not divide the timer input clock
    InexactCompareValue { tick_hz: u32, timer_clock_hz: u32 },
    /// Compare value does not fit the timer's compare register
    CompareOutOfRange { compare_value: u32, limit: u32 },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickRateOutOfRange { tick_hz } => {
                write!(f, "tick rate {tick_hz} Hz outside 1 Hz..=1 MHz")
            }
            Self::InexactTickScale { tick_hz } => {
                write!(f, "tick rate {tick_hz} Hz does not divide 1 MHz")
            }
            Self::TickRateAboveTimerClock {
                tick_hz,
                timer_clock_hz,
            } => write!(
                f,
                "tick rate {tick_hz} Hz above timer clock {timer_clock_hz} Hz"
            ),
            Self::InexactCompareValue {
                tick_hz,
                timer_clock_hz,
            } => write!(
                f,
                "tick rate {tick_hz} Hz does not divide timer clock {timer_clock_hz} Hz"
            ),
            Self::CompareOutOfRange {
                compare_value,
                limit,
            } => write!(f, "compare value {compare_value} exceeds limit {limit}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TickError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::TickRateOutOfRange { tick_hz } => {
                defmt::write!(fmt, "TickRateOutOfRange({})", tick_hz)
            }
            Self::InexactTickScale { tick_hz } => {
                defmt::write!(fmt, "InexactTickScale({})", tick_hz)
            }
            Self::TickRateAboveTimerClock {
                tick_hz,
                timer_clock_hz,
            } => defmt::write!(
                fmt,
                "TickRateAboveTimerClock({}, {})",
                tick_hz,
                timer_clock_hz
            ),
            Self::InexactCompareValue {
                tick_hz,
                timer_clock_hz,
            } => defmt::write!(
                fmt,
                "InexactCompareValue({}, {})",
                tick_hz,
                timer_clock_hz
            ),
            Self::CompareOutOfRange {
                compare_value,
                limit,
            } => defmt::write!(fmt, "CompareOutOfRange({}, {})", compare_value, limit),
        }
    }
}
