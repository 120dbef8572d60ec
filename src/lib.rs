//! Timer drivers for Microchip PIC24F KL processors
//!
//! `pic24f-timers` runs the PIC24F KL timers from periods in human units.
//! Describe a period as a magnitude and [`Units`], and the driver selects the
//! prescaler, postscaler, and period register that represent it with the
//! finest resolution. When the period elapses, the timer interrupt runs your
//! [`Callback`]. Timers without a callback run in polling mode.
//!
//! The application works with *logical* timers, numbered `0..N`. Each logical
//! timer binds to one *physical* timer on the chip. A physical timer belongs to
//! at most one logical timer at a time.
//!
//! ```no_run
//! use pic24f_timers::{PhysicalTimer, Timers, Units};
//!
//! fn tick() {
//!     // Runs every second
//! }
//!
//! let mut timers = Timers::<4>::take().unwrap();
//! timers.configure(0, PhysicalTimer::Timer1, 1, Units::Seconds, Some(&tick)).unwrap();
//! ```
//!
//! The crate also includes the register access layer ([`ral`]) and chip
//! descriptors ([`chip`]) that the driver uses.
//!
//! # Feature flags
//!
//! Select one chip feature. The default feature is `"pic24f08kl200"`.
//!
//! | **Chip**      | **Feature**       | Timer1 | Timer2 | Timer3 (gated) | Timer4 |
//! | ------------- | ----------------- | ------ | ------ | -------------- | ------ |
//! | PIC24F08KL200 | `"pic24f08kl200"` |   ✓    |   ✓    |       ✓        |        |
//! | PIC24F16KL402 | `"pic24f16kl402"` |   ✓    |   ✓    |       ✓        |   ✓    |
//!
//! When developing a binary for your embedded system, enable the crate's `"rt"`
//! feature. It exports the `_T1Interrupt` through `_T4Interrupt` vectors, which
//! dispatch to the [`VECTORS`] slots. Otherwise, when developing libraries
//! against the crate, or when you have your own timer vectors, skip the `"rt"`
//! feature and call [`Vectors::dispatch`] yourself.
//!
//! Enable `"defmt"` to log driver activity with [`defmt`](https://docs.rs/defmt).
//!
//! # Configuration
//!
//! The oscillator frequency (FOSC) is fixed at build time. Set the
//! `PIC24_FOSC_HZ` environment variable when building; the default is
//! 32MHz. See [`config`].
//!
//! ## License
//!
//! Licensed under either of
//!
//! - [Apache License, Version 2.0](http://www.apache.org/licenses/LICENSE-2.0)
//! - [MIT License](http://opensource.org/licenses/MIT)
//!
//! at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(test)]
extern crate std;

// Developer note: when adding a chip, add its descriptor to the chip
// module, then add it here and to chip::SELECTED.
#[cfg(not(any(feature = "pic24f08kl200", feature = "pic24f16kl402")))]
compile_error!(concat!(
    "You must select a chip feature flag! Available chips:\n",
    "  - pic24f08kl200\n",
    "  - pic24f16kl402\n"
));

/// Log a debug message with `defmt`, if enabled
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

/// Log a warning with `defmt`, if enabled
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

/// Decorates one or more functions that act as interrupt handlers.
///
/// `interrupts!` may only be used once per module. It should only include
/// functions wrapped by `handler!`. The function names must match the
/// PIC24F vector names, like `_T1Interrupt`.
macro_rules! interrupts {
    ($($handlers:item)*) => {
        $($handlers)*
    };
}

/// Decorator helper for an interrupt handler
///
/// With the `"rt"` feature, the handler is exported under its own name, so
/// that the linker places it in the interrupt vector table.
macro_rules! handler {
    (fn $isr_name:ident () $body:block) => {
        #[cfg_attr(feature = "rt", no_mangle)]
        #[cfg_attr(not(feature = "rt"), allow(unused))]
        #[allow(non_snake_case)]
        extern "C" fn $isr_name() $body
    };
}

//
// Modules
//
pub mod chip;
pub mod config;
mod error;
pub mod interrupt;
mod peripherals;
pub mod ral;
mod registry;
pub mod resolver;
mod timer;
pub mod units;

//
// Module re-exports
//
pub use chip::PhysicalTimer;
pub use error::Error;
pub use interrupt::{Callback, Vectors, VECTORS};
pub use peripherals::Peripherals;
pub use registry::Entry;
pub use timer::{Gate, GateMode, GatePolarity, GateSource, Timers};
pub use units::{InstructionClock, Units};

/// A `once` sentinel, since it doesn't exist in `core::sync`.
mod once {
    use core::sync::atomic::{AtomicBool, Ordering};
    pub struct Once(AtomicBool);
    pub const fn new() -> Once {
        Once(AtomicBool::new(false))
    }
    impl Once {
        pub fn call<R, F: FnOnce() -> R>(&self, f: F) -> Option<R> {
            let already_called = self.0.swap(true, Ordering::SeqCst);
            if already_called {
                None
            } else {
                Some(f())
            }
        }
    }
}
