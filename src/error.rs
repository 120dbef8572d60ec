use crate::chip::PhysicalTimer;

/// Errors propagated from the timer driver
///
/// A failed call never writes to the timer registers.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The logical timer index is outside of the registry
    InvalidLogical(usize),
    /// The physical timer index does not name a PIC24F timer
    InvalidTimer(usize),
    /// The unit code does not name a [`Units`](crate::Units) variant
    InvalidUnits(u8),
    /// The physical timer does not exist on the selected chip
    ///
    /// This is a porting error; it's also reported to the fatal error handler.
    Unsupported(PhysicalTimer),
    /// The period is too long for the timer, even at the largest prescale
    /// and postscale
    PeriodOutOfRange,
    /// The period is zero, so the timer would never expire
    ZeroPeriod,
    /// The physical timer is bound to another logical timer
    TimerInUse {
        /// The logical timer that owns the physical timer
        owner: usize,
    },
    /// The logical timer is not bound to a physical timer
    Unbound(usize),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidLogical(logical) => write!(f, "invalid logical timer {}", logical),
            Error::InvalidTimer(index) => write!(f, "invalid physical timer index {}", index),
            Error::InvalidUnits(code) => write!(f, "invalid time unit code {}", code),
            Error::Unsupported(timer) => write!(f, "{:?} does not exist on this chip", timer),
            Error::PeriodOutOfRange => f.write_str("period out of range"),
            Error::ZeroPeriod => f.write_str("period must be greater than zero"),
            Error::TimerInUse { owner } => {
                write!(f, "physical timer is bound to logical timer {}", owner)
            }
            Error::Unbound(logical) => write!(f, "logical timer {} is not bound", logical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display() {
        assert_eq!(
            Error::Unsupported(PhysicalTimer::Timer4).to_string(),
            "Timer4 does not exist on this chip"
        );
        assert_eq!(
            Error::TimerInUse { owner: 2 }.to_string(),
            "physical timer is bound to logical timer 2"
        );
        assert_eq!(Error::InvalidUnits(9).to_string(), "invalid time unit code 9");
    }
}
