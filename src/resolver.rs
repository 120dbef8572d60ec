//! Prescaler, postscaler, and period register selection
//!
//! A timer with period register value `p` and combined scale `s`
//! (prescale ratio × postscale ratio) expires every `(p + 1) * s` instruction
//! ticks. [`resolve`] selects the smallest `s` that can represent the requested
//! period, which keeps the finest timing resolution.
//!
//! ```
//! use pic24f_timers::resolver::{resolve, Resolution};
//!
//! // 10ms at a 16MHz instruction clock is 160,000 ticks. That's too long for
//! // 1:1, so the resolver moves to 1:8.
//! let scaling = resolve(160_000, &Resolution::TYPE_A).unwrap();
//! assert_eq!(scaling.prescale, 1);
//! assert_eq!(scaling.period, 19_999);
//! assert_eq!(scaling.ticks(&Resolution::TYPE_A), 160_000);
//! ```

use crate::Error;

/// The scaling options and register width of a timer family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    /// Prescale ratios, ascending, in register encoding order
    pub prescalers: &'static [u32],
    /// Postscale ratios, ascending, in register encoding order
    ///
    /// Empty for timers without a postscaler.
    pub postscalers: &'static [u32],
    /// Width of the period and count registers
    pub bits: u32,
}

/// The selected scaling for a period
///
/// `prescale` and `postscale` are indexes into the [`Resolution`] tables,
/// which are also the register encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scaling {
    /// Index of the prescale ratio
    pub prescale: usize,
    /// Index of the postscale ratio; 0 for timers without a postscaler
    pub postscale: usize,
    /// Period register value
    pub period: u32,
}

impl Resolution {
    /// Timer1
    pub const TYPE_A: Resolution = Resolution {
        prescalers: &[1, 8, 64, 256],
        postscalers: &[],
        bits: 16,
    };

    /// Timer2 and Timer4
    pub const POSTSCALED: Resolution = Resolution {
        prescalers: &[1, 4, 16],
        postscalers: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
        bits: 8,
    };

    /// Timer3
    pub const GATED: Resolution = Resolution {
        prescalers: &[1, 2, 4, 8],
        postscalers: &[],
        bits: 16,
    };

    /// The number of distinct period register values, `2^bits`
    pub const fn range(&self) -> u64 {
        1 << self.bits
    }

    /// Postscale ratios, with the identity for timers without a postscaler
    fn postscale_ratios(&self) -> &'static [u32] {
        if self.postscalers.is_empty() {
            &[1]
        } else {
            self.postscalers
        }
    }

    /// The longest period, in ticks, that the timer can represent
    pub fn max_ticks(&self) -> u64 {
        let prescale = self.prescalers.iter().copied().max().unwrap_or(1);
        let postscale = self.postscale_ratios().iter().copied().max().unwrap_or(1);
        self.range() * u64::from(prescale) * u64::from(postscale)
    }
}

impl Scaling {
    /// The combined prescale and postscale ratio
    pub fn scale(&self, resolution: &Resolution) -> u64 {
        let prescale = resolution.prescalers[self.prescale];
        let postscale = resolution.postscale_ratios()[self.postscale];
        u64::from(prescale) * u64::from(postscale)
    }

    /// The effective period, in ticks
    pub fn ticks(&self, resolution: &Resolution) -> u64 {
        (u64::from(self.period) + 1) * self.scale(resolution)
    }
}

/// Select the scaling for a period of `ticks` instruction clock ticks
///
/// Returns the combination with the smallest combined scale that represents
/// `ticks` in the period register. When two combinations share a scale, the
/// one with the smaller prescaler wins. The period register value is rounded
/// to nearest.
pub fn resolve(ticks: u64, resolution: &Resolution) -> Result<Scaling, Error> {
    if ticks == 0 {
        return Err(Error::ZeroPeriod);
    }

    let range = resolution.range();
    let postscalers = resolution.postscale_ratios();
    // Prescale-major order, so min_by_key prefers the smaller prescaler on ties
    let combinations = resolution
        .prescalers
        .iter()
        .copied()
        .enumerate()
        .flat_map(|(prescale, pre)| {
            postscalers
                .iter()
                .copied()
                .enumerate()
                .map(move |(postscale, post)| {
                    (prescale, postscale, u64::from(pre) * u64::from(post))
                })
        });

    let (prescale, postscale, scale) = combinations
        .filter(|&(_, _, scale)| (ticks - 1) / scale < range)
        .min_by_key(|&(_, _, scale)| scale)
        .ok_or(Error::PeriodOutOfRange)?;

    // Rounded count of scaled clocks; the hardware adds one to the register value
    let period = ((ticks + scale / 2) / scale).saturating_sub(1);
    Ok(Scaling {
        prescale,
        postscale,
        period: period as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [Resolution; 3] = [
        Resolution::TYPE_A,
        Resolution::POSTSCALED,
        Resolution::GATED,
    ];

    #[test]
    fn zero_period() {
        for resolution in FAMILIES.iter() {
            assert_eq!(resolve(0, resolution), Err(Error::ZeroPeriod));
        }
    }

    #[test]
    fn ten_milliseconds_on_timer1() {
        // 32MHz oscillator, 16MHz instruction clock
        let scaling = resolve(160_000, &Resolution::TYPE_A).unwrap();
        assert_eq!(
            scaling,
            Scaling {
                prescale: 1,
                postscale: 0,
                period: 19_999
            }
        );
    }

    #[test]
    fn short_period_is_unscaled() {
        let scaling = resolve(1, &Resolution::TYPE_A).unwrap();
        assert_eq!(
            scaling,
            Scaling {
                prescale: 0,
                postscale: 0,
                period: 0
            }
        );
        let scaling = resolve(65_536, &Resolution::TYPE_A).unwrap();
        assert_eq!(scaling.prescale, 0);
        assert_eq!(scaling.period, 65_535);
    }

    #[test]
    fn boundary() {
        for resolution in FAMILIES.iter() {
            let max = resolution.max_ticks();
            let scaling = resolve(max, resolution).unwrap();
            assert_eq!(scaling.period as u64, resolution.range() - 1);
            assert_eq!(scaling.ticks(resolution), max);
            assert_eq!(resolve(max + 1, resolution), Err(Error::PeriodOutOfRange));
        }
        assert_eq!(Resolution::TYPE_A.max_ticks(), 65_536 * 256);
        assert_eq!(Resolution::POSTSCALED.max_ticks(), 256 * 16 * 16);
        assert_eq!(Resolution::GATED.max_ticks(), 65_536 * 8);
    }

    #[test]
    fn postscaler_fills_gaps_between_prescalers() {
        // 600 ticks: 1:1 * 1:3 gives 200 counts, smaller than any 1:4 option
        let scaling = resolve(600, &Resolution::POSTSCALED).unwrap();
        assert_eq!(scaling.prescale, 0);
        assert_eq!(scaling.postscale, 2);
        assert_eq!(scaling.period, 199);
    }

    #[test]
    fn prefers_prescaler_on_equal_scale() {
        // Scale 4 is reachable as 1:1 * 1:4 and 1:4 * 1:1
        let scaling = resolve(1_000, &Resolution::POSTSCALED).unwrap();
        assert_eq!(scaling.scale(&Resolution::POSTSCALED), 4);
        assert_eq!(scaling.prescale, 0);
        assert_eq!(scaling.postscale, 3);
    }

    #[test]
    fn rounds_to_nearest() {
        // 160,004 / 8 = 20,000.5, rounds up
        let scaling = resolve(160_004, &Resolution::TYPE_A).unwrap();
        assert_eq!(scaling.period, 20_000);
        // 160,003 / 8 = 20,000.375, rounds down
        let scaling = resolve(160_003, &Resolution::TYPE_A).unwrap();
        assert_eq!(scaling.period, 19_999);
    }

    /// Every fitting combination, by brute force
    fn fitting(ticks: u64, resolution: &Resolution) -> impl Iterator<Item = u64> + '_ {
        let postscalers = resolution.postscale_ratios();
        resolution.prescalers.iter().flat_map(move |&pre| {
            postscalers.iter().filter_map(move |&post| {
                let scale = u64::from(pre) * u64::from(post);
                if ticks <= resolution.range() * scale {
                    Some(scale)
                } else {
                    None
                }
            })
        })
    }

    #[test]
    fn selected_scale_is_minimal() {
        for resolution in FAMILIES.iter() {
            let max = resolution.max_ticks();
            let mut ticks = 1;
            while ticks <= max {
                let scaling = resolve(ticks, resolution).unwrap();
                let minimum = fitting(ticks, resolution).min().unwrap();
                assert_eq!(scaling.scale(resolution), minimum, "ticks = {}", ticks);
                ticks = ticks * 3 / 2 + 1;
            }
        }
    }

    #[test]
    fn effective_period_within_half_scale() {
        for resolution in FAMILIES.iter() {
            let max = resolution.max_ticks();
            let mut ticks = 1;
            while ticks <= max {
                let scaling = resolve(ticks, resolution).unwrap();
                let scale = scaling.scale(resolution);
                let effective = scaling.ticks(resolution);
                let error = if effective > ticks {
                    effective - ticks
                } else {
                    ticks - effective
                };
                assert!(error <= scale / 2 || (scaling.period == 0 && error < scale));
                assert!(u64::from(scaling.period) < resolution.range());
                ticks = ticks * 5 / 4 + 3;
            }
        }
    }
}
