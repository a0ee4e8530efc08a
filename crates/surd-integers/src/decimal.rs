//! Approximate decimal views of exact numbers.
//!
//! A [`Decimal`] is `mantissa / 10^scale`. It is the escape hatch used for
//! printing and for ordering values that have no exact total order
//! (radicals), never for arithmetic that has to stay exact.

use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg};

use crate::Integer;

/// Fractional digits used by `to_decimal` conversions unless told otherwise.
pub const DEFAULT_DECIMAL_PLACES: u32 = 28;

/// A decimal number `mantissa / 10^scale`.
#[derive(Clone, Debug)]
pub struct Decimal {
    mantissa: Integer,
    scale: u32,
}

impl Decimal {
    /// Creates the decimal `mantissa / 10^scale`.
    #[must_use]
    pub fn new(mantissa: Integer, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Rounds `numer / denom` half-up to `places` fractional digits.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[must_use]
    pub fn from_ratio(numer: &Integer, denom: &Integer, places: u32) -> Self {
        let (numer, denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer.clone(), denom.clone())
        };
        let (mut mantissa, remainder) = (numer * Integer::ten_pow(places)).div_mod_floor(&denom);
        if &remainder * &Integer::new(2) >= denom {
            mantissa = mantissa + Integer::one();
        }
        Self::new(mantissa, places)
    }

    /// Returns the mantissa.
    #[must_use]
    pub fn mantissa(&self) -> &Integer {
        &self.mantissa
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Rounds half-up to `places` fractional digits.
    #[must_use]
    pub fn round(&self, places: u32) -> Self {
        if places >= self.scale {
            return self.rescaled(places);
        }
        Self::from_ratio(&self.mantissa, &Integer::ten_pow(self.scale - places), 0)
            .with_scale(places)
    }

    /// Converts to the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Reinterprets an integral mantissa at a new scale.
    fn with_scale(self, scale: u32) -> Self {
        Self::new(self.mantissa, scale)
    }

    /// Same value with more fractional digits.
    fn rescaled(&self, scale: u32) -> Self {
        debug_assert!(scale >= self.scale);
        Self::new(
            &self.mantissa * &Integer::ten_pow(scale - self.scale),
            scale,
        )
    }

    /// Drops trailing fractional zeros.
    fn normalized(&self) -> Self {
        let ten = Integer::new(10);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && mantissa.is_multiple_of(&ten) {
            mantissa = mantissa / &ten;
            scale -= 1;
        }
        Self::new(mantissa, scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale)
            .mantissa
            .cmp(&other.rescaled(scale).mantissa)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalized();
        normalized.mantissa.hash(state);
        normalized.scale.hash(state);
    }
}

impl Add for Decimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let scale = self.scale.max(rhs.scale);
        Self::new(
            self.rescaled(scale).mantissa + rhs.rescaled(scale).mantissa,
            scale,
        )
    }
}

impl Neg for Decimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.mantissa, self.scale)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::new(Integer::zero(), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.normalized();
        let digits = normalized.mantissa.abs().to_string();
        let scale = normalized.scale as usize;
        let sign = if normalized.mantissa.is_negative() { "-" } else { "" };
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(Integer::new(mantissa), scale)
    }

    #[test]
    fn test_from_ratio_rounds_half_up() {
        let d = Decimal::from_ratio(&Integer::new(7), &Integer::new(4), 1);
        assert_eq!(d, dec(18, 1));

        let d = Decimal::from_ratio(&Integer::new(-7), &Integer::new(4), 1);
        // -1.75 rounds towards +inf on ties.
        assert_eq!(d, dec(-17, 1));

        let d = Decimal::from_ratio(&Integer::new(1), &Integer::new(3), 5);
        assert_eq!(d, dec(33333, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(dec(175, 2).to_string(), "1.75");
        assert_eq!(dec(-5, 3).to_string(), "-0.005");
        assert_eq!(dec(1200, 2).to_string(), "12");
        assert_eq!(dec(0, 4).to_string(), "0");
    }

    #[test]
    fn test_ordering_across_scales() {
        assert_eq!(dec(5, 1), dec(50, 2));
        assert!(dec(875, 3) < dec(88, 2));
        assert!(dec(-1, 0) < dec(0, 5));
    }

    #[test]
    fn test_add_and_round() {
        let sum = dec(125, 2) + dec(5, 3);
        assert_eq!(sum, dec(1255, 3));
        assert_eq!(sum.round(2), dec(126, 2));
        assert_eq!(sum.round(5), dec(125_500, 5));
    }

    #[test]
    fn test_to_f64() {
        assert!((dec(875, 3).to_f64() - 0.875).abs() < f64::EPSILON);
    }
}
