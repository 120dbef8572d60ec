//! Register access layer (RAL) for the PIC24F timers
//!
//! The register blocks and field definitions follow the layout that the
//! `ral-registers` macros expect: a `RegisterBlock` per peripheral, then one
//! module per register, and one module per field with `offset`, `mask`, and
//! `R` / `W` / `RW` value modules. Use them with [`read_reg!`], [`write_reg!`],
//! and [`modify_reg!`]:
//!
//! ```no_run
//! use pic24f_timers::ral;
//!
//! // Timer1 on the PIC24F KL parts
//! let tmr1 = unsafe { ral::Instance::<ral::tmr_a::RegisterBlock>::new(0x0100) };
//! ral::modify_reg!(ral::tmr_a, tmr1, CON, TCKPS: TCKPS_1, TON: 1);
//! let running = ral::read_reg!(ral::tmr_a, tmr1, CON, TON == 1);
//! # let _ = running;
//! ```
//!
//! Registers are 16 bits wide, so field values are `u16`.

#![allow(non_snake_case, non_upper_case_globals)] // Compatibility with RAL

pub mod intc;
pub mod tmr_a;
pub mod tmr_b;
pub mod tmr_g;

pub use ral_registers::{modify_reg, read_reg, write_reg, RORegister, RWRegister};

use core::marker::PhantomData;

/// A pointer to a register block in the special function register (SFR) space
///
/// `Instance` dereferences to its register block, so that it works with the
/// RAL macros.
pub struct Instance<RB> {
    addr: usize,
    _marker: PhantomData<*const RB>,
}

impl<RB> Instance<RB> {
    /// Create an instance for the register block at `addr`
    ///
    /// # Safety
    ///
    /// `addr` must point to a valid `RB` for the rest of the program. Creating
    /// two instances for the same address aliases the registers.
    pub const unsafe fn new(addr: usize) -> Self {
        Instance {
            addr,
            _marker: PhantomData,
        }
    }

    /// Returns the address of the register block
    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl<RB> core::ops::Deref for Instance<RB> {
    type Target = RB;
    #[inline(always)]
    fn deref(&self) -> &RB {
        unsafe { &*(self.addr as *const RB) }
    }
}
