//! Chip descriptors
//!
//! A [`Chip`] describes which physical timers exist on a PIC24F variant, their
//! family, where their registers live in the special function register (SFR)
//! space, and which interrupt bits they use. The driver is written once
//! against this data.
//!
//! Both descriptors are always available. The chip feature selects
//! [`SELECTED`], which the interrupt vectors and [`Timers::take`](crate::Timers::take)
//! use.
//!
//! ```
//! use pic24f_timers::chip::{self, Family, PhysicalTimer};
//!
//! let timer2 = chip::PIC24F08KL200.timer(PhysicalTimer::Timer2).unwrap();
//! assert_eq!(timer2.family, Family::Postscaled);
//! assert!(chip::PIC24F08KL200.timer(PhysicalTimer::Timer4).is_none());
//! ```

use crate::{resolver::Resolution, Error};

/// The number of timer slots in the PIC24F timer map
///
/// Not every chip populates every slot.
pub const TIMER_COUNT: usize = 4;

/// A hardware timer on the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PhysicalTimer {
    Timer1,
    Timer2,
    Timer3,
    Timer4,
}

impl PhysicalTimer {
    /// All timer slots, in order
    pub const ALL: [PhysicalTimer; TIMER_COUNT] = [
        PhysicalTimer::Timer1,
        PhysicalTimer::Timer2,
        PhysicalTimer::Timer3,
        PhysicalTimer::Timer4,
    ];

    /// Returns the zero-based index of the timer
    ///
    /// `Timer1` is index 0.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl core::convert::TryFrom<usize> for PhysicalTimer {
    type Error = Error;
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PhysicalTimer::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidTimer(index))
    }
}

/// Timer families on the PIC24F KL parts
///
/// The family decides the register layout and the [`Resolution`] of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Family {
    /// 16-bit timer with a period register and a 1, 8, 64, 256 prescaler
    TypeA,
    /// 8-bit timer with a period register, a 1, 4, 16 prescaler, and a 1 to 16 postscaler
    Postscaled,
    /// 16-bit timer without a period register, a 1, 2, 4, 8 prescaler, and a gate
    Gated,
}

impl Family {
    /// Returns the prescale, postscale, and register width of this family
    pub const fn resolution(self) -> &'static Resolution {
        match self {
            Family::TypeA => &Resolution::TYPE_A,
            Family::Postscaled => &Resolution::POSTSCALED,
            Family::Gated => &Resolution::GATED,
        }
    }

    /// Returns `true` if the timer expires on a period register match
    ///
    /// Timers without a period register expire on overflow, and the count must
    /// be preloaded at every expiry.
    pub const fn has_period_register(self) -> bool {
        !matches!(self, Family::Gated)
    }
}

/// The position of a timer's flag and enable bits in the interrupt controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Irq {
    pub(crate) word: usize,
    pub(crate) bit: u16,
}

impl Irq {
    /// An interrupt source at `bit` of `IFSn` / `IECn`, where `word` is `n`
    pub const fn new(word: usize, bit: u16) -> Self {
        Irq { word, bit }
    }

    pub(crate) const fn mask(self) -> u16 {
        1 << self.bit
    }
}

/// Describes a single physical timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerDesc {
    /// The timer family
    pub family: Family,
    /// SFR address of the timer's register block
    pub address: usize,
    /// Interrupt flag and enable bits
    pub irq: Irq,
}

/// Describes the timers of a chip variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chip {
    /// The part name
    pub name: &'static str,
    /// Timer slots, indexed by [`PhysicalTimer::index`]
    pub timers: [Option<TimerDesc>; TIMER_COUNT],
    /// SFR address of the interrupt controller's `IFS0` register
    pub interrupts: usize,
}

impl Chip {
    /// Returns the timer's description, or `None` if the chip does not have the timer
    pub const fn timer(&self, timer: PhysicalTimer) -> Option<&TimerDesc> {
        self.timers[timer.index()].as_ref()
    }

    /// Returns the first gated timer on the chip
    pub fn gated(&self) -> Option<PhysicalTimer> {
        PhysicalTimer::ALL.iter().copied().find(|&timer| {
            matches!(self.timer(timer), Some(desc) if desc.family == Family::Gated)
        })
    }
}

const TIMER1: TimerDesc = TimerDesc {
    family: Family::TypeA,
    address: 0x0100,
    irq: Irq::new(0, 3),
};

const TIMER2: TimerDesc = TimerDesc {
    family: Family::Postscaled,
    address: 0x0106,
    irq: Irq::new(0, 7),
};

const TIMER3: TimerDesc = TimerDesc {
    family: Family::Gated,
    address: 0x010C,
    irq: Irq::new(0, 8),
};

const TIMER4: TimerDesc = TimerDesc {
    family: Family::Postscaled,
    address: 0x0112,
    irq: Irq::new(1, 11),
};

const INTERRUPTS: usize = 0x0084;

/// PIC24F08KL200: Timer1, Timer2, and Timer3
pub const PIC24F08KL200: Chip = Chip {
    name: "PIC24F08KL200",
    timers: [Some(TIMER1), Some(TIMER2), Some(TIMER3), None],
    interrupts: INTERRUPTS,
};

/// PIC24F16KL402: Timer1 through Timer4
pub const PIC24F16KL402: Chip = Chip {
    name: "PIC24F16KL402",
    timers: [Some(TIMER1), Some(TIMER2), Some(TIMER3), Some(TIMER4)],
    interrupts: INTERRUPTS,
};

/// The chip selected by the crate's chip feature
#[cfg(feature = "pic24f16kl402")]
pub const SELECTED: Chip = PIC24F16KL402;

/// The chip selected by the crate's chip feature
#[cfg(all(feature = "pic24f08kl200", not(feature = "pic24f16kl402")))]
pub const SELECTED: Chip = PIC24F08KL200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_timer_from_index() {
        assert_eq!(PhysicalTimer::try_from(0), Ok(PhysicalTimer::Timer1));
        assert_eq!(PhysicalTimer::try_from(3), Ok(PhysicalTimer::Timer4));
        assert_eq!(PhysicalTimer::try_from(4), Err(Error::InvalidTimer(4)));
    }

    #[test]
    fn gated_timer_is_timer3() {
        assert_eq!(PIC24F08KL200.gated(), Some(PhysicalTimer::Timer3));
        assert_eq!(PIC24F16KL402.gated(), Some(PhysicalTimer::Timer3));
    }

    #[test]
    fn only_kl402_has_timer4() {
        assert!(PIC24F08KL200.timer(PhysicalTimer::Timer4).is_none());
        assert_eq!(
            PIC24F16KL402.timer(PhysicalTimer::Timer4).map(|desc| desc.family),
            Some(Family::Postscaled)
        );
    }

    #[test]
    fn register_blocks_do_not_overlap() {
        let mut addresses: [usize; TIMER_COUNT] = [0; TIMER_COUNT];
        for (address, desc) in addresses.iter_mut().zip(PIC24F16KL402.timers.iter()) {
            *address = desc.map(|desc| desc.address).unwrap();
        }
        // Each block is three 16-bit registers
        for pair in addresses.windows(2) {
            assert!(pair[1] - pair[0] >= 6);
        }
    }
}
