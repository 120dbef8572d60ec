//! Time units and the instruction clock
//!
//! A period is a magnitude and a [`Units`]. [`normalize`] turns it into
//! instruction clock ticks, the unit of the timer hardware. [`to_units`]
//! goes the other way.
//!
//! ```
//! use pic24f_timers::{units, InstructionClock, Units};
//!
//! // 32MHz oscillator, so a 16MHz instruction clock
//! let clock = InstructionClock::from_oscillator(32_000_000);
//! assert_eq!(units::normalize(10, Units::Milliseconds, &clock), Ok(160_000));
//! assert_eq!(units::to_units(160_000, Units::Microseconds, &clock), 10_000);
//! ```

use crate::Error;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// The units of a timer period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Units {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    /// Instruction clock periods
    Ticks,
}

impl Units {
    /// Nanoseconds in one unit, or `None` for [`Units::Ticks`]
    const fn nanos(self) -> Option<u128> {
        match self {
            Units::Seconds => Some(1_000_000_000),
            Units::Milliseconds => Some(1_000_000),
            Units::Microseconds => Some(1_000),
            Units::Nanoseconds => Some(1),
            Units::Ticks => None,
        }
    }
}

impl core::convert::TryFrom<u8> for Units {
    type Error = Error;
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Units::Seconds),
            1 => Ok(Units::Milliseconds),
            2 => Ok(Units::Microseconds),
            3 => Ok(Units::Nanoseconds),
            4 => Ok(Units::Ticks),
            _ => Err(Error::InvalidUnits(code)),
        }
    }
}

/// The instruction clock, which drives the timers
///
/// The PIC24F executes one instruction every two oscillator cycles, so the
/// instruction clock runs at half the oscillator frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InstructionClock {
    hz: u32,
}

impl InstructionClock {
    /// Derive the instruction clock from the oscillator frequency (FOSC)
    ///
    /// # Panics
    ///
    /// Panics if `oscillator_hz` is less than 2.
    pub const fn from_oscillator(oscillator_hz: u32) -> Self {
        assert!(oscillator_hz >= 2, "oscillator frequency is too low");
        InstructionClock {
            hz: oscillator_hz / 2,
        }
    }

    /// Returns the instruction clock frequency
    pub const fn hz(&self) -> u32 {
        self.hz
    }

    /// Returns the instruction clock period, truncated to whole nanoseconds
    pub const fn period_ns(&self) -> u32 {
        1_000_000_000 / self.hz
    }
}

/// Uses the oscillator frequency from the build configuration
impl Default for InstructionClock {
    fn default() -> Self {
        InstructionClock::from_oscillator(crate::config::FOSC_HZ)
    }
}

/// Convert `magnitude` `units` into instruction clock ticks
///
/// `Ticks` pass through unchanged. Other units are scaled to nanoseconds, then
/// multiplied by the clock frequency, truncating toward zero.
pub fn normalize(magnitude: u32, units: Units, clock: &InstructionClock) -> Result<u64, Error> {
    let nanos = match units.nanos() {
        Some(nanos) => nanos,
        None => return Ok(u64::from(magnitude)),
    };
    let ticks = u128::from(magnitude) * nanos * u128::from(clock.hz()) / NANOS_PER_SECOND;
    u64::try_from(ticks).map_err(|_| Error::PeriodOutOfRange)
}

/// Convert instruction clock `ticks` into `units`, truncating toward zero
///
/// Saturates at `u64::max_value()`.
pub fn to_units(ticks: u64, units: Units, clock: &InstructionClock) -> u64 {
    let nanos = match units.nanos() {
        Some(nanos) => nanos,
        None => return ticks,
    };
    let value = u128::from(ticks) * NANOS_PER_SECOND / (u128::from(clock.hz()) * nanos);
    u64::try_from(value).unwrap_or(u64::max_value())
}
