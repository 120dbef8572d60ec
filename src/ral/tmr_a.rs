//! Type A timer (Timer1)
//!
//! 16-bit timer with a period register and a 2-bit prescaler. The control
//! register selects the clock source, the gate, and the prescale ratio.

use super::RWRegister;

#[repr(C)]
pub struct RegisterBlock {
    /// Timer count register
    pub TMR: RWRegister<u16>,

    /// Period register
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

/// Period register
pub mod PR {

    /// Period match value
    pub mod PR {
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

/// Control register
pub mod CON {

    /// Timer on
    pub mod TON {
        /// Offset (15 bits)
        pub const offset: u16 = 15;
        /// Mask (1 bit: 1 << 15)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Timer is stopped
            pub const TON_0: u16 = 0b0;

            /// 0b1: Timer is counting
            pub const TON_1: u16 = 0b1;
        }
    }

    /// Stop in idle mode
    pub mod TSIDL {
        /// Offset (13 bits)
        pub const offset: u16 = 13;
        /// Mask (1 bit: 1 << 13)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Continue operating in idle mode
            pub const TSIDL_0: u16 = 0b0;

            /// 0b1: Stop operating in idle mode
            pub const TSIDL_1: u16 = 0b1;
        }
    }

    /// Extended clock source select (only used when TCS = 1)
    pub mod TECS {
        /// Offset (8 bits)
        pub const offset: u16 = 8;
        /// Mask (2 bits: 0b11 << 8)
        pub const mask: u16 = 0b11 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b00: Secondary oscillator
            pub const TECS_0: u16 = 0b00;

            /// 0b01: T1CK external clock input
            pub const TECS_1: u16 = 0b01;

            /// 0b10: LPRC oscillator
            pub const TECS_2: u16 = 0b10;
        }
    }

    /// Gated time accumulation enable
    pub mod TGATE {
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

            /// 0b0: Gated time accumulation is disabled
            pub const TGATE_0: u16 = 0b0;

            /// 0b1: Gated time accumulation is enabled
            pub const TGATE_1: u16 = 0b1;
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

            /// 0b01: 1:8
            pub const TCKPS_1: u16 = 0b01;

            /// 0b10: 1:64
            pub const TCKPS_2: u16 = 0b10;

            /// 0b11: 1:256
            pub const TCKPS_3: u16 = 0b11;
        }
    }

    /// External clock input synchronization (only used when TCS = 1)
    pub mod TSYNC {
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

            /// 0b0: Do not synchronize
            pub const TSYNC_0: u16 = 0b0;

            /// 0b1: Synchronize external clock input
            pub const TSYNC_1: u16 = 0b1;
        }
    }

    /// Clock source select
    pub mod TCS {
        /// Offset (1 bits)
        pub const offset: u16 = 1;
        /// Mask (1 bit: 1 << 1)
        pub const mask: u16 = 1 << offset;
        /// Read-only values (empty)
        pub mod R {}
        /// Write-only values (empty)
        pub mod W {}
        /// Read-write values
        pub mod RW {

            /// 0b0: Internal clock (FOSC/2)
            pub const TCS_0: u16 = 0b0;

            /// 0b1: Extended clock selected by TECS
            pub const TCS_1: u16 = 0b1;
        }
    }
}
