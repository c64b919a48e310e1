use log::debug;

use std::fmt::Display;

use crate::config::LayoutErrors;

// The leading digits of the round intervals, in increasing order.
const MANTISSAS: [u8; 3] = [1, 2, 5];

// 5 * 10^15 is still represented exactly as a f64.
const MAX_EXPONENT: u32 = 15;

/// A round tick spacing: `mantissa * 10^exponent` with a mantissa of 1, 2 or 5.
///
/// The ordering of intervals matches the ordering of their values.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Interval {
    exponent: u32,
    mantissa: u8,
}

impl Interval {
    pub fn mantissa(&self) -> u8 {
        self.mantissa
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    pub fn as_u64(&self) -> u64 {
        self.mantissa as u64 * 10u64.pow(self.exponent)
    }

    pub fn value(&self) -> f64 {
        self.as_u64() as f64
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// All the round intervals, smallest first: 1, 2, 5, 10, 20, 50, 100, ...
pub fn candidate_intervals() -> impl Iterator<Item = Interval> {
    (0..=MAX_EXPONENT).flat_map(|exponent| {
        MANTISSAS
            .iter()
            .map(move |mantissa| Interval {
                exponent,
                mantissa: *mantissa,
            })
    })
}

/// Picks the smallest round interval such that half of the available tick slots
/// are enough to reach `max_value`.
///
/// ```
/// use likert_layout::select_interval;
/// # use likert_layout::LayoutErrors;
///
/// // 5 ticks of 5 only reach 25, 5 ticks of 10 reach 50.
/// assert_eq!(select_interval(10, 47.0)?.as_u64(), 10);
/// # Ok::<(), LayoutErrors>(())
/// ```
pub fn select_interval(
    available_tick_slots: usize,
    max_value: f64,
) -> Result<Interval, LayoutErrors> {
    if available_tick_slots < 1 {
        return Err(LayoutErrors::InvalidInput(
            "at least one tick slot is required".to_string(),
        ));
    }
    if !max_value.is_finite() || max_value < 0.0 {
        return Err(LayoutErrors::InvalidInput(format!(
            "the largest value on the axis must be a non-negative number, got {}",
            max_value
        )));
    }

    let ticks_per_side = (available_tick_slots / 2) as f64;
    let res = candidate_intervals().find(|i| i.value() * ticks_per_side >= max_value);
    debug!(
        "select_interval: slots: {:?} max_value: {:?} -> {:?}",
        available_tick_slots, max_value, res
    );
    // Only reachable with a single slot (no tick on either side) or with values far
    // beyond any survey.
    res.ok_or_else(|| {
        LayoutErrors::InvalidInput(format!(
            "no tick interval fits {} on an axis with {} tick slots",
            max_value, available_tick_slots
        ))
    })
}
