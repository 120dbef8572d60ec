//! Logical timer table
//!
//! The registry maps the application's logical timers onto physical timers.
//! It's a fixed size table; the size is a const generic on
//! [`Timers`](crate::Timers). Every entry starts unbound.

use crate::{
    chip::PhysicalTimer,
    interrupt::Callback,
    resolver::Scaling,
    timer::Gate,
    units::Units,
    Error,
};

/// The configuration of one logical timer
#[derive(Clone, Copy)]
pub struct Entry {
    physical: Option<PhysicalTimer>,
    period: u32,
    units: Units,
    callback: Option<&'static dyn Callback>,
    scaling: Option<Scaling>,
    gate: Option<Gate>,
}

impl Entry {
    const UNBOUND: Entry = Entry {
        physical: None,
        period: 0,
        units: Units::Ticks,
        callback: None,
        scaling: None,
        gate: None,
    };

    /// The bound physical timer, or `None` if the entry is unbound
    pub fn physical(&self) -> Option<PhysicalTimer> {
        self.physical
    }

    /// The requested period magnitude
    pub fn period(&self) -> u32 {
        self.period
    }

    /// The units of [`period`](Entry::period)
    pub fn units(&self) -> Units {
        self.units
    }

    /// The scaling written to the timer
    pub fn scaling(&self) -> Option<Scaling> {
        self.scaling
    }

    /// The gate configuration, if the timer runs gated
    pub fn gate(&self) -> Option<Gate> {
        self.gate
    }

    /// Returns `true` if the timer interrupts, or `false` if it's polled
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn callback(&self) -> Option<&'static dyn Callback> {
        self.callback
    }

    pub(crate) fn set_period(&mut self, period: u32, units: Units, scaling: Scaling) {
        self.period = period;
        self.units = units;
        self.scaling = Some(scaling);
    }
}

impl core::fmt::Debug for Entry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry")
            .field("physical", &self.physical)
            .field("period", &self.period)
            .field("units", &self.units)
            .field("callback", &self.callback.is_some())
            .field("scaling", &self.scaling)
            .field("gate", &self.gate)
            .finish()
    }
}

/// A new binding for an entry
pub(crate) struct Binding {
    pub physical: PhysicalTimer,
    pub period: u32,
    pub units: Units,
    pub callback: Option<&'static dyn Callback>,
    pub scaling: Scaling,
    pub gate: Option<Gate>,
}

/// `N` logical timer entries
pub(crate) struct Registry<const N: usize> {
    entries: [Entry; N],
}

impl<const N: usize> Registry<N> {
    pub const fn new() -> Self {
        Registry {
            entries: [Entry::UNBOUND; N],
        }
    }

    pub fn get(&self, logical: usize) -> Result<&Entry, Error> {
        self.entries.get(logical).ok_or(Error::InvalidLogical(logical))
    }

    pub fn get_mut(&mut self, logical: usize) -> Result<&mut Entry, Error> {
        self.entries
            .get_mut(logical)
            .ok_or(Error::InvalidLogical(logical))
    }

    /// Returns the physical timer bound to `logical`
    pub fn bound(&self, logical: usize) -> Result<PhysicalTimer, Error> {
        self.get(logical)?
            .physical
            .ok_or(Error::Unbound(logical))
    }

    /// Returns the logical timer that's bound to `physical`
    pub fn owner(&self, physical: PhysicalTimer) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.physical == Some(physical))
    }

    /// Check that `logical` may bind to `physical`
    pub fn check_available(&self, logical: usize, physical: PhysicalTimer) -> Result<(), Error> {
        self.get(logical)?;
        match self.owner(physical) {
            Some(owner) if owner != logical => Err(Error::TimerInUse { owner }),
            _ => Ok(()),
        }
    }

    pub fn bind(&mut self, logical: usize, binding: Binding) -> Result<(), Error> {
        let entry = self.get_mut(logical)?;
        *entry = Entry {
            physical: Some(binding.physical),
            period: binding.period,
            units: binding.units,
            callback: binding.callback,
            scaling: Some(binding.scaling),
            gate: binding.gate,
        };
        Ok(())
    }

    pub fn unbind(&mut self, logical: usize) -> Result<(), Error> {
        *self.get_mut(logical)? = Entry::UNBOUND;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(physical: PhysicalTimer) -> Binding {
        Binding {
            physical,
            period: 10,
            units: Units::Milliseconds,
            callback: None,
            scaling: Scaling {
                prescale: 1,
                postscale: 0,
                period: 19_999,
            },
            gate: None,
        }
    }

    #[test]
    fn starts_unbound() {
        let registry = Registry::<3>::new();
        for logical in 0..3 {
            assert_eq!(registry.bound(logical), Err(Error::Unbound(logical)));
        }
        assert_eq!(registry.bound(3), Err(Error::InvalidLogical(3)));
        assert_eq!(registry.owner(PhysicalTimer::Timer1), None);
    }

    #[test]
    fn bind_and_unbind() {
        let mut registry = Registry::<2>::new();
        registry.bind(1, binding(PhysicalTimer::Timer2)).unwrap();
        assert_eq!(registry.bound(1), Ok(PhysicalTimer::Timer2));
        assert_eq!(registry.owner(PhysicalTimer::Timer2), Some(1));
        let entry = registry.get(1).unwrap();
        assert_eq!(entry.period(), 10);
        assert_eq!(entry.units(), Units::Milliseconds);
        assert!(!entry.has_callback());

        registry.unbind(1).unwrap();
        assert_eq!(registry.bound(1), Err(Error::Unbound(1)));
        assert_eq!(registry.owner(PhysicalTimer::Timer2), None);
    }

    #[test]
    fn physical_timer_has_one_owner() {
        let mut registry = Registry::<2>::new();
        registry.bind(0, binding(PhysicalTimer::Timer1)).unwrap();
        assert_eq!(
            registry.check_available(1, PhysicalTimer::Timer1),
            Err(Error::TimerInUse { owner: 0 })
        );
        assert_eq!(registry.check_available(0, PhysicalTimer::Timer1), Ok(()));
        assert_eq!(registry.check_available(1, PhysicalTimer::Timer3), Ok(()));
        assert_eq!(
            registry.check_available(2, PhysicalTimer::Timer3),
            Err(Error::InvalidLogical(2))
        );
    }

    #[test]
    fn zero_sized_registry() {
        let mut registry = Registry::<0>::new();
        assert_eq!(
            registry.bind(0, binding(PhysicalTimer::Timer1)),
            Err(Error::InvalidLogical(0))
        );
    }
}
