//! Build time configuration
//!
//! `build.rs` reads the `PIC24_FOSC_HZ` environment variable, and generates
//! the constants in this module. Set the variable to your oscillator
//! frequency, in Hz, when you build:
//!
//! ```text
//! PIC24_FOSC_HZ=8_000_000 cargo build
//! ```
//!
//! When unset, the oscillator frequency is 32MHz. The driver derives the
//! [`InstructionClock`](crate::InstructionClock) from [`FOSC_HZ`].

include!(concat!(env!("OUT_DIR"), "/config.rs"));
