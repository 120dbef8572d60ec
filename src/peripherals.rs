//! Timer and interrupt controller registers of a chip
//!
//! [`Peripherals`] pairs a [`Chip`] descriptor with the base of the special
//! function register (SFR) space. It hands out register blocks for the chip's
//! timers, and it's the only way that the driver reaches the hardware.
//!
//! ```no_run
//! use pic24f_timers::{chip, Peripherals};
//!
//! // Safety: the only Peripherals in the program
//! let peripherals = unsafe { Peripherals::new(chip::PIC24F08KL200) };
//! assert_eq!(peripherals.chip().name, "PIC24F08KL200");
//! ```

use crate::{
    chip::{Chip, Family, Irq, PhysicalTimer},
    ral::{self, intc, tmr_a, tmr_b, tmr_g, Instance},
    resolver::Scaling,
    timer::{Gate, GateMode},
    Error,
};

/// The registers of one PIC24F chip
pub struct Peripherals {
    chip: Chip,
    base: usize,
}

impl Peripherals {
    /// Acquire the registers of `chip`
    ///
    /// # Safety
    ///
    /// The caller must be running on `chip`, and there should only be one
    /// `Peripherals` object in the program. The interrupt vectors create
    /// their own `Peripherals`, and they only touch the flag and count
    /// registers of the interrupting timer.
    pub const unsafe fn new(chip: Chip) -> Self {
        Peripherals::with_base(chip, 0)
    }

    /// Acquire the registers of `chip`, with the SFR space starting at `base`
    ///
    /// # Safety
    ///
    /// Same as [`new`](Peripherals::new). Additionally, `base` plus every
    /// register address of `chip` must be valid, 2-byte aligned memory for
    /// the rest of the program.
    pub const unsafe fn with_base(chip: Chip, base: usize) -> Self {
        Peripherals { chip, base }
    }

    /// Returns the chip descriptor
    pub const fn chip(&self) -> &Chip {
        &self.chip
    }

    /// Returns the registers of `timer`
    ///
    /// Fails with [`Error::Unsupported`] if `timer` does not exist on the chip.
    pub(crate) fn timer(&self, timer: PhysicalTimer) -> Result<TimerRegisters, Error> {
        let desc = self.chip.timer(timer).ok_or(Error::Unsupported(timer))?;
        let address = self.base + desc.address;
        // Safety: address comes from the chip descriptor, which we trust
        // to match the hardware.
        let block = unsafe {
            match desc.family {
                Family::TypeA => Block::TypeA(Instance::new(address)),
                Family::Postscaled => Block::Postscaled(Instance::new(address)),
                Family::Gated => Block::Gated(Instance::new(address)),
            }
        };
        Ok(TimerRegisters {
            block,
            intc: unsafe { Instance::new(self.base + self.chip.interrupts) },
            irq: desc.irq,
            family: desc.family,
        })
    }
}

/// A timer's register block, by family
enum Block {
    TypeA(Instance<tmr_a::RegisterBlock>),
    Postscaled(Instance<tmr_b::RegisterBlock>),
    Gated(Instance<tmr_g::RegisterBlock>),
}

/// The registers of a single timer, including its interrupt bits
pub(crate) struct TimerRegisters {
    block: Block,
    intc: Instance<intc::RegisterBlock>,
    irq: Irq,
    family: Family,
}

/// The count register value that overflows after `period + 1` counts
pub(crate) const fn reload(scaling: &Scaling) -> u16 {
    u16::max_value() - scaling.period as u16
}

impl TimerRegisters {
    pub(crate) fn family(&self) -> Family {
        self.family
    }

    /// Program the timer for `scaling`, stopped
    ///
    /// Resets the count, selects the instruction clock, and clears any gate
    /// that isn't requested. Gated timers have their gate control register
    /// written before their control register.
    pub(crate) fn configure(&self, scaling: &Scaling, gate: Option<&Gate>) {
        let prescale = scaling.prescale as u16;
        match &self.block {
            Block::TypeA(tmr) => {
                ral::write_reg!(ral::tmr_a, tmr, CON, TON: TON_0, TCS: TCS_0, TGATE: TGATE_0, TSYNC: TSYNC_0, TCKPS: prescale);
                ral::write_reg!(ral::tmr_a, tmr, TMR, 0);
                ral::write_reg!(ral::tmr_a, tmr, PR, scaling.period as u16);
            }
            Block::Postscaled(tmr) => {
                let postscale = scaling.postscale as u16;
                ral::write_reg!(ral::tmr_b, tmr, CON, TMRON: TMRON_0, TOUTPS: postscale, TCKPS: prescale);
                ral::write_reg!(ral::tmr_b, tmr, TMR, 0);
                ral::write_reg!(ral::tmr_b, tmr, PR, scaling.period as u16);
            }
            Block::Gated(tmr) => {
                match gate {
                    Some(gate) => {
                        let single_pulse = (gate.mode == GateMode::SinglePulse) as u16;
                        ral::write_reg!(
                            ral::tmr_g,
                            tmr,
                            GCON,
                            TMRGE: TMRGE_1,
                            TGPOL: gate.polarity as u16,
                            TGTM: TGTM_1,
                            TGSPM: single_pulse,
                            TGGO: single_pulse,
                            TGSS: gate.source as u16
                        );
                    }
                    None => ral::write_reg!(ral::tmr_g, tmr, GCON, 0),
                }
                ral::write_reg!(ral::tmr_g, tmr, CON, TMRON: TMRON_0, TMRCS: TMRCS_1, TOSCEN: TOSCEN_0, TCKPS: prescale);
                ral::write_reg!(ral::tmr_g, tmr, TMR, reload(scaling));
            }
        }
    }

    /// Change the scaling and period without touching the run state
    pub(crate) fn rescale(&self, scaling: &Scaling) {
        let prescale = scaling.prescale as u16;
        match &self.block {
            Block::TypeA(tmr) => {
                ral::modify_reg!(ral::tmr_a, tmr, CON, TCKPS: prescale);
                ral::write_reg!(ral::tmr_a, tmr, PR, scaling.period as u16);
            }
            Block::Postscaled(tmr) => {
                let postscale = scaling.postscale as u16;
                ral::modify_reg!(ral::tmr_b, tmr, CON, TOUTPS: postscale, TCKPS: prescale);
                ral::write_reg!(ral::tmr_b, tmr, PR, scaling.period as u16);
            }
            Block::Gated(tmr) => {
                ral::modify_reg!(ral::tmr_g, tmr, CON, TCKPS: prescale);
                ral::write_reg!(ral::tmr_g, tmr, TMR, reload(scaling));
            }
        }
    }

    /// Set or clear the run bit
    pub(crate) fn set_running(&self, running: bool) {
        let on = running as u16;
        match &self.block {
            Block::TypeA(tmr) => ral::modify_reg!(ral::tmr_a, tmr, CON, TON: on),
            Block::Postscaled(tmr) => ral::modify_reg!(ral::tmr_b, tmr, CON, TMRON: on),
            Block::Gated(tmr) => ral::modify_reg!(ral::tmr_g, tmr, CON, TMRON: on),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        match &self.block {
            Block::TypeA(tmr) => ral::read_reg!(ral::tmr_a, tmr, CON, TON == 1),
            Block::Postscaled(tmr) => ral::read_reg!(ral::tmr_b, tmr, CON, TMRON == 1),
            Block::Gated(tmr) => ral::read_reg!(ral::tmr_g, tmr, CON, TMRON == 1),
        }
    }

    /// Return the control registers to their reset values
    ///
    /// The timer stops. The count and period registers keep their values.
    pub(crate) fn reset(&self) {
        match &self.block {
            Block::TypeA(tmr) => ral::write_reg!(ral::tmr_a, tmr, CON, 0),
            Block::Postscaled(tmr) => ral::write_reg!(ral::tmr_b, tmr, CON, 0),
            Block::Gated(tmr) => {
                ral::write_reg!(ral::tmr_g, tmr, CON, 0);
                ral::write_reg!(ral::tmr_g, tmr, GCON, 0);
            }
        }
    }

    /// Read the count register
    pub(crate) fn count(&self) -> u16 {
        match &self.block {
            Block::TypeA(tmr) => ral::read_reg!(ral::tmr_a, tmr, TMR),
            Block::Postscaled(tmr) => ral::read_reg!(ral::tmr_b, tmr, TMR, TMR),
            Block::Gated(tmr) => ral::read_reg!(ral::tmr_g, tmr, TMR),
        }
    }

    /// Write the count register
    pub(crate) fn set_count(&self, count: u16) {
        match &self.block {
            Block::TypeA(tmr) => ral::write_reg!(ral::tmr_a, tmr, TMR, count),
            Block::Postscaled(tmr) => ral::write_reg!(ral::tmr_b, tmr, TMR, TMR: count),
            Block::Gated(tmr) => ral::write_reg!(ral::tmr_g, tmr, TMR, count),
        }
    }

    /// Counts since the last expiry
    ///
    /// Overflow-driven timers start counting from their reload value.
    pub(crate) fn counts(&self, scaling: &Scaling) -> u16 {
        match &self.block {
            Block::Gated(_) => self.count().wrapping_sub(reload(scaling)),
            _ => self.count(),
        }
    }

    /// Clear the timer's pending interrupt flag
    pub(crate) fn clear_flag(&self) {
        let mask = self.irq.mask();
        ral::modify_reg!(ral::intc, self.intc, IFS[self.irq.word], |ifs: u16| ifs & !mask);
    }

    /// Returns `true` if the interrupt flag was set, and clears it
    pub(crate) fn take_flag(&self) -> bool {
        let mask = self.irq.mask();
        let pending = ral::read_reg!(ral::intc, self.intc, IFS[self.irq.word]) & mask != 0;
        if pending {
            self.clear_flag();
        }
        pending
    }

    /// Set or clear the timer's interrupt enable bit
    pub(crate) fn enable_interrupt(&self, enable: bool) {
        let mask = self.irq.mask();
        ral::modify_reg!(ral::intc, self.intc, IEC[self.irq.word], |iec: u16| if enable {
            iec | mask
        } else {
            iec & !mask
        });
    }
}

/// A zeroed SFR space for host tests
#[cfg(test)]
pub(crate) mod sfr {
    use super::Peripherals;
    use crate::chip::Chip;

    /// Bytes of SFR space that cover the timers and the interrupt controller
    const SFR_BYTES: usize = 0x200;

    /// Timer1 registers
    pub const TMR1: usize = 0x0100;
    pub const PR1: usize = 0x0102;
    pub const T1CON: usize = 0x0104;
    /// Timer2 registers
    pub const TMR2: usize = 0x0106;
    pub const PR2: usize = 0x0108;
    pub const T2CON: usize = 0x010A;
    /// Timer3 registers
    pub const TMR3: usize = 0x010C;
    pub const T3GCON: usize = 0x010E;
    pub const T3CON: usize = 0x0110;
    /// Timer4 registers
    pub const PR4: usize = 0x0114;
    pub const T4CON: usize = 0x0116;
    /// Interrupt controller
    pub const IFS0: usize = 0x0084;
    pub const IFS1: usize = 0x0086;
    pub const IEC0: usize = 0x0094;
    pub const IEC1: usize = 0x0096;

    /// Leak a zeroed SFR space, and acquire `chip` over it
    pub fn peripherals(chip: Chip) -> Peripherals {
        let arena = std::vec![0u16; SFR_BYTES / 2].into_boxed_slice();
        let base = std::boxed::Box::leak(arena).as_mut_ptr() as usize;
        // Safety: leaked, so it lives for the rest of the program. Each test
        // has its own arena.
        unsafe { Peripherals::with_base(chip, base) }
    }

    impl Peripherals {
        /// Read the 16-bit SFR at `address`
        pub fn sfr(&self, address: usize) -> u16 {
            assert!(address < SFR_BYTES && address % 2 == 0);
            unsafe { core::ptr::read_volatile((self.base + address) as *const u16) }
        }

        /// Write the 16-bit SFR at `address`, like the hardware would
        pub fn set_sfr(&self, address: usize, value: u16) {
            assert!(address < SFR_BYTES && address % 2 == 0);
            unsafe { core::ptr::write_volatile((self.base + address) as *mut u16, value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sfr::{self, *};
    use crate::{
        chip::{self, PhysicalTimer},
        resolver::Scaling,
        Error,
    };

    #[test]
    fn absent_timer_is_unsupported() {
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        assert_eq!(
            peripherals.timer(PhysicalTimer::Timer4).err(),
            Some(Error::Unsupported(PhysicalTimer::Timer4))
        );
    }

    #[test]
    fn type_a_configure() {
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        peripherals.set_sfr(TMR1, 1234);
        let timer1 = peripherals.timer(PhysicalTimer::Timer1).unwrap();
        timer1.configure(
            &Scaling {
                prescale: 1,
                postscale: 0,
                period: 19_999,
            },
            None,
        );
        assert_eq!(peripherals.sfr(T1CON), 1 << 4);
        assert_eq!(peripherals.sfr(PR1), 19_999);
        assert_eq!(peripherals.sfr(TMR1), 0);

        timer1.set_running(true);
        assert!(timer1.is_running());
        assert_eq!(peripherals.sfr(T1CON), 1 << 15 | 1 << 4);
        timer1.reset();
        assert_eq!(peripherals.sfr(T1CON), 0);
    }

    #[test]
    fn postscaled_configure() {
        let peripherals = sfr::peripherals(chip::PIC24F16KL402);
        let timer4 = peripherals.timer(PhysicalTimer::Timer4).unwrap();
        timer4.configure(
            &Scaling {
                prescale: 2,
                postscale: 15,
                period: 255,
            },
            None,
        );
        assert_eq!(peripherals.sfr(T4CON), 15 << 3 | 2);
        assert_eq!(peripherals.sfr(PR4), 255);
        // Timer2 untouched
        assert_eq!(peripherals.sfr(T2CON), 0);
    }

    #[test]
    fn gated_configure_preloads_count() {
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        let timer3 = peripherals.timer(PhysicalTimer::Timer3).unwrap();
        let scaling = Scaling {
            prescale: 3,
            postscale: 0,
            period: 999,
        };
        timer3.configure(&scaling, None);
        assert_eq!(peripherals.sfr(T3GCON), 0);
        assert_eq!(peripherals.sfr(T3CON), 1 << 6 | 3 << 4);
        assert_eq!(peripherals.sfr(TMR3), 0xFFFF - 999);
        assert_eq!(timer3.counts(&scaling), 0);
        peripherals.set_sfr(TMR3, 0xFFFF - 499);
        assert_eq!(timer3.counts(&scaling), 500);
    }

    #[test]
    fn interrupt_bits() {
        let peripherals = sfr::peripherals(chip::PIC24F16KL402);
        let timer4 = peripherals.timer(PhysicalTimer::Timer4).unwrap();
        peripherals.set_sfr(IEC1, 1);
        timer4.enable_interrupt(true);
        assert_eq!(peripherals.sfr(IEC1), 1 << 11 | 1);
        assert_eq!(peripherals.sfr(IEC0), 0);

        assert!(!timer4.take_flag());
        peripherals.set_sfr(IFS1, 1 << 11 | 1 << 2);
        assert!(timer4.take_flag());
        assert_eq!(peripherals.sfr(IFS1), 1 << 2);
        assert!(!timer4.take_flag());

        timer4.enable_interrupt(false);
        assert_eq!(peripherals.sfr(IEC1), 1);
        assert_eq!(peripherals.sfr(IFS0), 0);
    }
}
