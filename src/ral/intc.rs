//! Interrupt controller flag and enable registers
//!
//! `IFS` holds the interrupt flag status bits, and `IEC` holds the interrupt
//! enable bits. Each word covers 16 interrupt sources. A timer interrupt is
//! identified by a word index and a bit within that word; the chip descriptors
//! carry those positions.

use super::RWRegister;

#[repr(C)]
pub struct RegisterBlock {
    /// Interrupt flag status registers (IFS0, IFS1)
    pub IFS: [RWRegister<u16>; 2],

    _reserved0: [u16; 6],

    /// Interrupt enable control registers (IEC0, IEC1)
    pub IEC: [RWRegister<u16>; 2],
}

/// Interrupt flag status registers
pub mod IFS {}

/// Interrupt enable control registers
pub mod IEC {}
