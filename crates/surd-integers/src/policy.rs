//! Magnitude policy for rational reduction.
//!
//! Exact arithmetic grows denominators without bound under long chains of
//! operations. Once a reduced denominator exceeds the configured bound the
//! value is rounded to a fixed number of significant decimal digits and
//! stored as the exact ratio of that decimal. The rounded value is never
//! checked against the bound again, so reduction always terminates.

use crate::Integer;

/// Largest denominator kept exactly by [`RationalPolicy::default`].
pub const DEFAULT_MAX_DENOMINATOR: u64 = 1_000_000_000_000;

/// Significant digits kept when a value degrades.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 17;

/// Configuration of the exactness/termination trade-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RationalPolicy {
    /// Denominators strictly above this bound degrade. `None` keeps every
    /// value exact.
    pub max_denominator: Option<u64>,
    /// Significant decimal digits of a degraded value.
    pub significant_digits: u32,
}

impl Default for RationalPolicy {
    fn default() -> Self {
        Self {
            max_denominator: Some(DEFAULT_MAX_DENOMINATOR),
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl RationalPolicy {
    /// A policy that never degrades.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            max_denominator: None,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }

    /// Returns this policy with a different denominator bound.
    #[must_use]
    pub fn with_max_denominator(mut self, bound: u64) -> Self {
        self.max_denominator = Some(bound);
        self
    }

    /// Returns this policy with a different significant digit count.
    #[must_use]
    pub fn with_significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Returns true if a reduced denominator must degrade.
    #[must_use]
    pub fn exceeds(&self, denominator: &Integer) -> bool {
        match self.max_denominator {
            Some(bound) => *denominator > Integer::from(bound),
            None => false,
        }
    }
}
