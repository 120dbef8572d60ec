//! Postscaled timer (Timer2 and Timer4)
//!
//! 8-bit timer with a period register, a 2-bit prescaler, and a 4-bit
//! output postscaler. The timer clock is always the instruction clock.

use super::RWRegister;

#[repr(C)]
pub struct RegisterBlock {
    /// Timer count register (8 bits used)
    pub TMR: RWRegister<u16>,

    /// Period register (8 bits used)
    pub PR: RWRegister<u16>,

    /// Control register
    pub CON: RWRegister<u16>,
}

/// Timer count register
pub mod TMR {

    /// Current count
    pub mod TMR {
        /// Offset (0 bits)
        pub const offset: u16 = 0;
        /// Mask (8 bits: 0b11111111 << 0)
        pub const mask: u16 = 0b11111111 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }
}

/// Period register
pub mod PR {

    /// Period match value
    pub mod PR {
        /// Offset (0 bits)
        pub const offset: u16 = 0;
        /// Mask (8 bits: 0b11111111 << 0)
        pub const mask: u16 = 0b11111111 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }
}

/// Control register
pub mod CON {

    /// Output postscale select. The ratio is TOUTPS + 1, from 1:1 to 1:16
    pub mod TOUTPS {
        /// Offset (3 bits)
        pub const offset: u16 = 3;
        /// Mask (4 bits: 0b1111 << 3)
        pub const mask: u16 = 0b1111 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values (empty)
        pub mod RW {}
    }

    /// Timer on
    pub mod TMRON {
        /// Offset (2 bits)
        pub const offset: u16 = 2;
        /// Mask (1 bit: 1 << 2)
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

    /// Clock prescale select
    pub mod TCKPS {
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

            /// 0b00: 1:1
            pub const TCKPS_0: u16 = 0b00;

            /// 0b01: 1:4
            pub const TCKPS_1: u16 = 0b01;

            /// 0b10: 1:16
            pub const TCKPS_2: u16 = 0b10;
        }
    }
}
