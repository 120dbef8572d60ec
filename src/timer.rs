//! Timer driver
//!
//! [`Timers`] binds `N` logical timers to the chip's physical timers. A logical
//! timer runs for a period, given as a magnitude and [`Units`]. When the period
//! elapses, the timer's [`Callback`] runs in interrupt context. Without a
//! callback, the timer runs in polling mode; use [`poll`](Timers::poll) to
//! check for expiry.
//!
//! ```no_run
//! use pic24f_timers::{PhysicalTimer, Timers, Units};
//!
//! fn heartbeat() {
//!     // Runs every 10ms
//! }
//!
//! let mut timers = Timers::<2>::take().unwrap();
//! timers.configure(0, PhysicalTimer::Timer1, 10, Units::Milliseconds, Some(&heartbeat)).unwrap();
//!
//! // A polled timer
//! timers.configure(1, PhysicalTimer::Timer2, 250, Units::Microseconds, None).unwrap();
//! loop {
//!     if timers.poll(1).unwrap() {
//!         // 250us elapsed
//!     }
//! }
//! ```
//!
//! # Gated timers
//!
//! The gated timer counts only while its gate is active. Use it to measure
//! the width of a pulse.
//!
//! ```no_run
//! use pic24f_timers::{Gate, GateMode, GatePolarity, GateSource, Timers, Units};
//!
//! let mut timers = Timers::<1>::take().unwrap();
//! let gate = Gate {
//!     source: GateSource::Pin,
//!     polarity: GatePolarity::ActiveHigh,
//!     mode: GateMode::SinglePulse,
//! };
//! timers.configure_gated(0, 4, Units::Milliseconds, gate, None).unwrap();
//! // Wait for the pulse...
//! let width_us = timers.elapsed(0, Units::Microseconds).unwrap();
//! # let _ = width_us;
//! ```

use crate::{
    chip::{self, PhysicalTimer},
    interrupt::{Callback, Vectors, VECTORS},
    peripherals::{self, Peripherals, TimerRegisters},
    registry::{Binding, Entry, Registry},
    resolver,
    units::{self, InstructionClock, Units},
    Error,
};

/// The signal that opens the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateSource {
    /// The timer's gate input pin
    Pin = 0,
    /// Timer2 matching its period register
    Timer2Match = 1,
    /// Comparator 1 output
    Comparator1 = 2,
    /// Comparator 2 output
    Comparator2 = 3,
}

/// The gate level that lets the timer count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatePolarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

/// How the gate controls counting
///
/// The gate always runs in toggle mode, so the timer counts for a full
/// period of the gate signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateMode {
    /// Accumulate time across every gate pulse
    Accumulate,
    /// Count a single gate pulse, then stop
    SinglePulse,
}

/// Gate configuration for [`Timers::configure_gated`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gate {
    pub source: GateSource,
    pub polarity: GatePolarity,
    pub mode: GateMode,
}

static TAKEN: crate::once::Once = crate::once::new();

/// The timer driver, with `N` logical timers
pub struct Timers<const N: usize> {
    peripherals: Peripherals,
    vectors: &'static Vectors,
    registry: Registry<N>,
    clock: InstructionClock,
    fatal: Option<fn(Error)>,
}

impl<const N: usize> Timers<N> {
    /// Create a timer driver
    ///
    /// `vectors` must be the slots that your interrupt vectors dispatch
    /// through. Prefer [`take`](Timers::take) when using the crate's
    /// vectors.
    pub fn new(peripherals: Peripherals, vectors: &'static Vectors, clock: InstructionClock) -> Self {
        Timers {
            peripherals,
            vectors,
            registry: Registry::new(),
            clock,
            fatal: None,
        }
    }

    /// Acquire the timers of the selected chip
    ///
    /// The driver dispatches through [`VECTORS`], and uses the instruction
    /// clock of the configured oscillator. Returns `None` after the first call.
    pub fn take() -> Option<Self> {
        TAKEN.call(|| {
            // Safety: the once sentinel guarantees this is the only driver
            let peripherals = unsafe { Peripherals::new(chip::SELECTED) };
            Timers::new(peripherals, &VECTORS, InstructionClock::default())
        })
    }

    /// Set the function that's called for unrecoverable configuration errors
    ///
    /// The handler runs for [`Error::Unsupported`], before the error returns
    /// to the caller.
    pub fn set_fatal_handler(&mut self, handler: fn(Error)) {
        self.fatal = Some(handler);
    }

    /// Returns the instruction clock
    pub fn clock(&self) -> &InstructionClock {
        &self.clock
    }

    /// Returns the logical timer's configuration
    pub fn entry(&self, logical: usize) -> Result<&Entry, Error> {
        self.registry.get(logical)
    }

    fn fatal(&self, err: Error) -> Error {
        log_warn!("Fatal timer error: {}", err);
        if let Some(handler) = self.fatal {
            handler(err);
        }
        err
    }

    fn registers(&self, physical: PhysicalTimer) -> Result<TimerRegisters, Error> {
        self.peripherals
            .timer(physical)
            .map_err(|err| self.fatal(err))
    }

    /// Configure and start a logical timer on `physical`
    ///
    /// The timer expires every `period` `units`. With a callback, the timer
    /// interrupts at every expiry. Without a callback, the timer interrupt
    /// is disabled; use [`poll`](Timers::poll).
    ///
    /// Reconfiguring a logical timer is allowed. If the logical timer was bound
    /// to a different physical timer, that physical timer stops.
    ///
    /// Nothing is written if the call fails.
    pub fn configure(
        &mut self,
        logical: usize,
        physical: PhysicalTimer,
        period: u32,
        units: Units,
        callback: Option<&'static dyn Callback>,
    ) -> Result<(), Error> {
        self.bind(logical, physical, period, units, None, callback)
    }

    /// Configure and start a logical timer on the chip's gated timer
    ///
    /// Same as [`configure`](Timers::configure), and the timer counts only while
    /// the `gate` is active.
    pub fn configure_gated(
        &mut self,
        logical: usize,
        period: u32,
        units: Units,
        gate: Gate,
        callback: Option<&'static dyn Callback>,
    ) -> Result<(), Error> {
        let physical = match self.peripherals.chip().gated() {
            Some(physical) => physical,
            None => return Err(self.fatal(Error::Unsupported(PhysicalTimer::Timer3))),
        };
        self.bind(logical, physical, period, units, Some(gate), callback)
    }

    fn bind(
        &mut self,
        logical: usize,
        physical: PhysicalTimer,
        period: u32,
        units: Units,
        gate: Option<Gate>,
        callback: Option<&'static dyn Callback>,
    ) -> Result<(), Error> {
        self.registry.check_available(logical, physical)?;
        let registers = self.registers(physical)?;
        let family = registers.family();
        let ticks = units::normalize(period, units, &self.clock)?;
        let scaling = resolver::resolve(ticks, family.resolution())?;

        if let Some(previous) = self.registry.get(logical)?.physical() {
            if previous != physical {
                self.release(previous)?;
            }
        }

        registers.enable_interrupt(false);
        registers.configure(&scaling, gate.as_ref());
        let reload = if family.has_period_register() {
            None
        } else {
            Some(peripherals::reload(&scaling))
        };
        self.vectors.register(physical, callback, reload);
        registers.clear_flag();
        if callback.is_some() {
            registers.enable_interrupt(true);
        }
        registers.set_running(true);

        self.registry.bind(
            logical,
            Binding {
                physical,
                period,
                units,
                callback,
                scaling,
                gate,
            },
        )?;
        log_debug!(
            "Logical timer {} on {}: prescale index {}, postscale index {}, period {}",
            logical,
            physical,
            scaling.prescale,
            scaling.postscale,
            scaling.period
        );
        Ok(())
    }

    /// Stop `physical`, disable its interrupt, and empty its vector slot
    fn release(&self, physical: PhysicalTimer) -> Result<(), Error> {
        let registers = self.registers(physical)?;
        registers.enable_interrupt(false);
        registers.reset();
        registers.clear_flag();
        self.vectors.release(physical);
        Ok(())
    }

    /// Change the period of a logical timer
    ///
    /// The run state and callback are unchanged.
    pub fn set_period(&mut self, logical: usize, period: u32, units: Units) -> Result<(), Error> {
        let physical = self.registry.bound(logical)?;
        let registers = self.registers(physical)?;
        let family = registers.family();
        let ticks = units::normalize(period, units, &self.clock)?;
        let scaling = resolver::resolve(ticks, family.resolution())?;

        registers.rescale(&scaling);
        if !family.has_period_register() {
            self.vectors
                .set_reload(physical, Some(peripherals::reload(&scaling)));
        }
        self.registry
            .get_mut(logical)?
            .set_period(period, units, scaling);
        Ok(())
    }

    /// Start, or resume, a logical timer
    ///
    /// The timer resumes from its current count.
    pub fn start(&mut self, logical: usize) -> Result<(), Error> {
        let physical = self.registry.bound(logical)?;
        self.registers(physical)?.set_running(true);
        Ok(())
    }

    /// Pause a logical timer
    ///
    /// The timer keeps its count and configuration.
    pub fn pause(&mut self, logical: usize) -> Result<(), Error> {
        let physical = self.registry.bound(logical)?;
        self.registers(physical)?.set_running(false);
        Ok(())
    }

    /// Stop a logical timer, and unbind it from its physical timer
    ///
    /// The physical timer's interrupt is disabled, its control registers are
    /// reset, and its callback is removed. Ending an unbound logical timer
    /// does nothing.
    pub fn end(&mut self, logical: usize) -> Result<(), Error> {
        if let Some(physical) = self.registry.get(logical)?.physical() {
            self.release(physical)?;
            log_debug!("Ended logical timer {} on {}", logical, physical);
        }
        self.registry.unbind(logical)
    }

    /// Returns `true` if the logical timer is counting
    pub fn is_running(&self, logical: usize) -> Result<bool, Error> {
        let physical = self.registry.bound(logical)?;
        Ok(self.registers(physical)?.is_running())
    }

    /// Returns `true` if the timer expired since the last poll
    ///
    /// Use this for timers without a callback.
    pub fn poll(&mut self, logical: usize) -> Result<bool, Error> {
        let physical = self.registry.bound(logical)?;
        let registers = self.registers(physical)?;
        let expired = registers.take_flag();
        if expired {
            if let Some(reload) = self.vectors.reload(physical) {
                registers.set_count(reload);
            }
        }
        Ok(expired)
    }

    /// Returns the time since the timer last expired, in `units`
    ///
    /// The time accounts for the prescaler, but not the postscaler.
    pub fn elapsed(&self, logical: usize, units: Units) -> Result<u64, Error> {
        let entry = self.registry.get(logical)?;
        let (physical, scaling) = match (entry.physical(), entry.scaling()) {
            (Some(physical), Some(scaling)) => (physical, scaling),
            _ => return Err(Error::Unbound(logical)),
        };
        let registers = self.registers(physical)?;
        let prescale = registers.family().resolution().prescalers[scaling.prescale];
        let ticks = u64::from(registers.counts(&scaling)) * u64::from(prescale);
        Ok(units::to_units(ticks, units, &self.clock))
    }
}
