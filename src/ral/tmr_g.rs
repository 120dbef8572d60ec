//! Gated timer (Timer3)
//!
//! 16-bit timer without a period register. The timer interrupts when the
//! count overflows, so the driver preloads the count to shorten the period.
//! The gate control register lets an external signal start and stop counting.

use super::RWRegister;

#[repr(C)]
pub struct RegisterBlock {
    /// Timer count register
    pub TMR: RWRegister<u16>,

    /// Gate control register
    ///
    /// Initialize before `CON`.
    pub GCON: RWRegister<u16>,

    /// Control register
    pub CON: RWRegister<u16>,
}

/// Timer count register
pub mod TMR {

    /// Current count
    pub mod TMR {
        /// Offset (0 bits)
        pub const offset: u16 = 0;
        /// Mask (16 bits: 0xffff << 0)
        pub const mask: u16 = 0xffff << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }
}

/// Gate control register
pub mod GCON {

    /// Gate enable
    pub mod TMRGE {
        /// Offset (7 bits)
        pub const offset: u16 = 7;
        /// Mask (1 bit: 1 << 7)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Timer counts regardless of the gate
            pub const TMRGE_0: u16 = 0b0;

            /// 0b1: Timer counting is controlled by the gate
            pub const TMRGE_1: u16 = 0b1;
        }
    }

    /// Gate polarity
    pub mod TGPOL {
        /// Offset (6 bits)
        pub const offset: u16 = 6;
        /// Mask (1 bit: 1 << 6)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Gate is active-low
            pub const TGPOL_0: u16 = 0b0;

            /// 0b1: Gate is active-high
            pub const TGPOL_1: u16 = 0b1;
        }
    }

    /// Gate toggle mode
    pub mod TGTM {
        /// Offset (5 bits)
        pub const offset: u16 = 5;
        /// Mask (1 bit: 1 << 5)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Toggle mode is disabled
            pub const TGTM_0: u16 = 0b0;

            /// 0b1: Toggle mode is enabled
            pub const TGTM_1: u16 = 0b1;
        }
    }

    /// Gate single pulse mode
    pub mod TGSPM {
        /// Offset (4 bits)
        pub const offset: u16 = 4;
        /// Mask (1 bit: 1 << 4)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Single pulse mode is disabled
            pub const TGSPM_0: u16 = 0b0;

            /// 0b1: Single pulse mode is enabled
            pub const TGSPM_1: u16 = 0b1;
        }
    }

    /// Gate single pulse acquisition status
    pub mod TGGO {
        /// Offset (3 bits)
        pub const offset: u16 = 3;
        /// Mask (1 bit: 1 << 3)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Acquisition has completed or has not started
            pub const TGGO_0: u16 = 0b0;

            /// 0b1: Acquisition is ready, waiting for an edge
            pub const TGGO_1: u16 = 0b1;
        }
    }

    /// Current state of the gate (read-only)
    pub mod TGVAL {
        /// Offset (2 bits)
        pub const offset: u16 = 2;
        /// Mask (1 bit: 1 << 2)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }

    /// Gate source select
    pub mod TGSS {
        /// Offset (0 bits)
        pub const offset: u16 = 0;
        /// Mask (2 bits: 0b11 << 0)
        pub const mask: u16 = 0b11 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b00: T3G input pin
            pub const TGSS_0: u16 = 0b00;

            /// 0b01: TMR2 to match PR2 output
            pub const TGSS_1: u16 = 0b01;

            /// 0b10: Comparator 1 output
            pub const TGSS_2: u16 = 0b10;

            /// 0b11: Comparator 2 output
            pub const TGSS_3: u16 = 0b11;
        }
    }
}

/// Control register
pub mod CON {

    /// Clock source select
    pub mod TMRCS {
        /// Offset (6 bits)
        pub const offset: u16 = 6;
        /// Mask (2 bits: 0b11 << 6)
        pub const mask: u16 = 0b11 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b00: External clock from the T3CK pin or secondary oscillator
            pub const TMRCS_0: u16 = 0b00;

            /// 0b01: Instruction clock (FOSC/2)
            pub const TMRCS_1: u16 = 0b01;

            /// 0b10: System clock (FOSC)
            pub const TMRCS_2: u16 = 0b10;
        }
    }

    /// Input clock prescale select
    pub mod TCKPS {
        /// Offset (4 bits)
        pub const offset: u16 = 4;
        /// Mask (2 bits: 0b11 << 4)
        pub const mask: u16 = 0b11 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b00: 1:1
            pub const TCKPS_0: u16 = 0b00;

            /// 0b01: 1:2
            pub const TCKPS_1: u16 = 0b01;

            /// 0b10: 1:4
            pub const TCKPS_2: u16 = 0b10;

            /// 0b11: 1:8
            pub const TCKPS_3: u16 = 0b11;
        }
    }

    /// Secondary oscillator enable
    pub mod TOSCEN {
        /// Offset (3 bits)
        pub const offset: u16 = 3;
        /// Mask (1 bit: 1 << 3)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Secondary oscillator is disabled
            pub const TOSCEN_0: u16 = 0b0;

            /// 0b1: Secondary oscillator is enabled
            pub const TOSCEN_1: u16 = 0b1;
        }
    }

    /// External clock input synchronization, active low
    pub mod TSYNC {
        /// Offset (2 bits)
        pub const offset: u16 = 2;
        /// Mask (1 bit: 1 << 2)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }

    /// Timer on
    pub mod TMRON {
        /// Offset (0 bits)
        pub const offset: u16 = 0;
        /// Mask (1 bit: 1 << 0)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Timer is stopped
            pub const TMRON_0: u16 = 0b0;

            /// 0b1: Timer is counting
            pub const TMRON_1: u16 = 0b1;
        }
    }
}
