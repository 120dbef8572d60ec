//! Timer interrupt dispatch
//!
//! Each physical timer has a slot in [`Vectors`]. The driver fills the slot
//! when it configures a timer, and the timer's interrupt vector calls
//! [`Vectors::dispatch`]. The dispatcher clears the pending flag, reloads
//! the count of overflow-driven timers, then runs the registered
//! [`Callback`].
//!
//! With the `"rt"` feature, the crate exports the `_T1Interrupt` through
//! `_T4Interrupt` vectors. They dispatch through [`VECTORS`], the slots used
//! by [`Timers::take`](crate::Timers::take).
//!
//! A callback is anything that implements `Fn() + Sync`, including plain
//! functions:
//!
//! ```no_run
//! use pic24f_timers::{PhysicalTimer, Timers, Units};
//!
//! fn blink() {
//!     // Toggle an LED...
//! }
//!
//! let mut timers = Timers::<2>::take().unwrap();
//! timers.configure(0, PhysicalTimer::Timer1, 500, Units::Milliseconds, Some(&blink)).unwrap();
//! ```

use core::cell::Cell;

use critical_section::Mutex;

use crate::{
    chip::{PhysicalTimer, TIMER_COUNT},
    Peripherals,
};

/// Runs when a timer expires
///
/// Callbacks run in interrupt context. Keep them short.
pub trait Callback: Sync {
    fn on_expiry(&self);
}

impl<F> Callback for F
where
    F: Fn() + Sync,
{
    fn on_expiry(&self) {
        self()
    }
}

#[derive(Clone, Copy)]
struct Slot {
    callback: Option<&'static dyn Callback>,
    /// Count register value written at every expiry
    reload: Option<u16>,
}

const EMPTY: Mutex<Cell<Slot>> = Mutex::new(Cell::new(Slot {
    callback: None,
    reload: None,
}));

/// Per-timer callback slots, shared between the driver and the interrupt vectors
pub struct Vectors {
    slots: [Mutex<Cell<Slot>>; TIMER_COUNT],
}

/// The slots served by the exported interrupt vectors
pub static VECTORS: Vectors = Vectors::new();

impl Vectors {
    /// Create empty slots
    ///
    /// Use a separate `Vectors` to dispatch interrupts from your own vectors.
    pub const fn new() -> Self {
        Vectors {
            slots: [EMPTY; TIMER_COUNT],
        }
    }

    fn slot(&self, timer: PhysicalTimer) -> Slot {
        critical_section::with(|cs| self.slots[timer.index()].borrow(cs).get())
    }

    fn update(&self, timer: PhysicalTimer, f: impl FnOnce(&mut Slot)) {
        critical_section::with(|cs| {
            let cell = self.slots[timer.index()].borrow(cs);
            let mut slot = cell.get();
            f(&mut slot);
            cell.set(slot);
        })
    }

    /// Register the expiry handling for `timer`
    pub(crate) fn register(
        &self,
        timer: PhysicalTimer,
        callback: Option<&'static dyn Callback>,
        reload: Option<u16>,
    ) {
        self.update(timer, |slot| {
            slot.callback = callback;
            slot.reload = reload;
        });
    }

    /// Change the count reload value, keeping the callback
    pub(crate) fn set_reload(&self, timer: PhysicalTimer, reload: Option<u16>) {
        self.update(timer, |slot| slot.reload = reload);
    }

    /// Empty the slot of `timer`
    pub(crate) fn release(&self, timer: PhysicalTimer) {
        self.register(timer, None, None);
    }

    /// Returns the count reload value for `timer`
    pub(crate) fn reload(&self, timer: PhysicalTimer) -> Option<u16> {
        self.slot(timer).reload
    }

    /// Returns `true` if `timer` has a callback
    pub fn has_callback(&self, timer: PhysicalTimer) -> bool {
        self.slot(timer).callback.is_some()
    }

    /// Handle an interrupt from `timer`
    ///
    /// Call this from the timer's interrupt vector.
    ///
    /// # Panics
    ///
    /// Panics if `timer` has no registered callback, or if `timer` does not
    /// exist on the chip. The driver only enables the interrupt once there's
    /// a callback.
    pub fn dispatch(&self, peripherals: &Peripherals, timer: PhysicalTimer) {
        let registers = match peripherals.timer(timer) {
            Ok(registers) => registers,
            Err(err) => panic!("Interrupt from {:?}: {}", timer, err),
        };
        registers.clear_flag();

        let slot = self.slot(timer);
        if let Some(reload) = slot.reload {
            registers.set_count(reload);
        }
        match slot.callback {
            Some(callback) => callback.on_expiry(),
            None => panic!("{:?} interrupted without a callback", timer),
        }
    }
}

impl Default for Vectors {
    fn default() -> Self {
        Vectors::new()
    }
}

interrupts! {
    handler!{fn _T1Interrupt() {
        on_interrupt(PhysicalTimer::Timer1)
    }}

    handler!{fn _T2Interrupt() {
        on_interrupt(PhysicalTimer::Timer2)
    }}

    handler!{fn _T3Interrupt() {
        on_interrupt(PhysicalTimer::Timer3)
    }}

    #[cfg(feature = "pic24f16kl402")]
    handler!{fn _T4Interrupt() {
        on_interrupt(PhysicalTimer::Timer4)
    }}
}

#[cfg_attr(not(feature = "rt"), allow(unused))]
#[inline(always)]
fn on_interrupt(timer: PhysicalTimer) {
    // Safety: dispatch only touches the flag and count of the interrupting timer
    let peripherals = unsafe { Peripherals::new(crate::chip::SELECTED) };
    VECTORS.dispatch(&peripherals, timer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chip, peripherals::sfr};
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl Counter {
        const fn new() -> Self {
            Counter(AtomicUsize::new(0))
        }
        fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl Callback for Counter {
        fn on_expiry(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn leak_vectors() -> &'static Vectors {
        std::boxed::Box::leak(std::boxed::Box::new(Vectors::new()))
    }

    #[test]
    fn dispatch_clears_flag_and_calls_back() {
        static EXPIRED: Counter = Counter::new();
        let vectors = leak_vectors();
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        vectors.register(PhysicalTimer::Timer2, Some(&EXPIRED), None);

        peripherals.set_sfr(sfr::IFS0, 1 << 7 | 1 << 3);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer2);
        assert_eq!(EXPIRED.get(), 1);
        assert_eq!(peripherals.sfr(sfr::IFS0), 1 << 3);
    }

    #[test]
    fn dispatch_reloads_count() {
        static EXPIRED: Counter = Counter::new();
        let vectors = leak_vectors();
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        vectors.register(PhysicalTimer::Timer3, Some(&EXPIRED), Some(0xF000));

        peripherals.set_sfr(sfr::TMR3, 3);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer3);
        assert_eq!(peripherals.sfr(sfr::TMR3), 0xF000);
        assert_eq!(EXPIRED.get(), 1);

        vectors.set_reload(PhysicalTimer::Timer3, Some(0xFF00));
        assert!(vectors.has_callback(PhysicalTimer::Timer3));
        vectors.dispatch(&peripherals, PhysicalTimer::Timer3);
        assert_eq!(peripherals.sfr(sfr::TMR3), 0xFF00);
        assert_eq!(EXPIRED.get(), 2);
    }

    #[test]
    fn closures_and_functions_are_callbacks() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn expired() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }
        let vectors = leak_vectors();
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        vectors.register(PhysicalTimer::Timer1, Some(&expired), None);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer1);

        let closure = std::boxed::Box::leak(std::boxed::Box::new(|| {
            CALLS.fetch_add(10, Ordering::SeqCst);
        }));
        vectors.register(PhysicalTimer::Timer1, Some(closure), None);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer1);
        assert_eq!(CALLS.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn release_empties_slot() {
        static EXPIRED: Counter = Counter::new();
        let vectors = leak_vectors();
        vectors.register(PhysicalTimer::Timer3, Some(&EXPIRED), Some(1));
        vectors.release(PhysicalTimer::Timer3);
        assert!(!vectors.has_callback(PhysicalTimer::Timer3));
        assert_eq!(vectors.reload(PhysicalTimer::Timer3), None);
    }

    #[test]
    #[should_panic]
    fn dispatch_without_callback_panics() {
        let vectors = leak_vectors();
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer1);
    }

    #[test]
    #[should_panic]
    fn dispatch_absent_timer_panics() {
        let vectors = leak_vectors();
        let peripherals = sfr::peripherals(chip::PIC24F08KL200);
        vectors.dispatch(&peripherals, PhysicalTimer::Timer4);
    }
}
