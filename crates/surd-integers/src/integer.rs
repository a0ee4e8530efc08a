//! Big integers backed by `dashu`.
//!
//! Only the operations rational reduction, factoring and root extraction
//! need are exposed.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use crate::ArithmeticError;

/// A signed big integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Wraps a machine integer.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses digits in `radix`.
    ///
    /// # Errors
    ///
    /// Propagates the `dashu` parse error for malformed input.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Returns `10^exp`.
    #[must_use]
    pub fn ten_pow(exp: u32) -> Self {
        Self::new(10).pow(exp)
    }

    /// Returns `|self|`.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Returns true for multiples of two.
    #[must_use]
    pub fn is_even(&self) -> bool {
        (&self.0 % IBig::from(2)).is_zero()
    }

    /// Bit length of the magnitude.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.clone().unsigned_abs().bit_len()
    }

    /// Returns the number of decimal digits of the absolute value.
    ///
    /// Zero has one digit.
    #[must_use]
    pub fn decimal_digits(&self) -> usize {
        if self.is_zero() {
            return 1;
        }
        self.0.ilog(&UBig::from(10u8)) + 1
    }

    /// Non-negative gcd, with `gcd(0, n) = |n|`.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(Gcd::gcd(self.0.clone(), other.0.clone())))
    }

    /// Non-negative lcm; zero if either side is zero.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        match self.gcd(other) {
            g if g.is_zero() => g,
            g => (&(self / &g) * other).abs(),
        }
    }

    /// Floor division with a remainder carrying the sign of the divisor.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_mod_floor(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "division by zero");
        let mut quotient = &self.0 / &other.0;
        let mut remainder = &self.0 - &quotient * &other.0;
        if !remainder.is_zero()
            && DashuSigned::is_negative(&remainder) != DashuSigned::is_negative(&other.0)
        {
            quotient -= IBig::ONE;
            remainder += &other.0;
        }
        (Self(quotient), Self(remainder))
    }

    /// Returns true if `other` divides `self` exactly.
    #[must_use]
    pub fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (&self.0 % &other.0).is_zero()
    }

    /// Computes `floor(self^(1/n))`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Unsupported`] for `n = 0` and for
    /// even roots of negative numbers.
    pub fn nth_root_floor(&self, n: u32) -> Result<Self, ArithmeticError> {
        if n == 0 {
            return Err(ArithmeticError::Unsupported("zeroth root".to_string()));
        }
        if self.is_negative() && n % 2 == 0 {
            return Err(ArithmeticError::Unsupported(format!(
                "even root of negative integer {self}"
            )));
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        // `IBig::nth_root` truncates towards zero.
        let root = Self(self.0.nth_root(n as usize));
        if self.is_negative() && root.pow(n) != *self {
            return Ok(root - Self::one());
        }
        Ok(root)
    }

    /// Returns the exact `n`-th root when `self` is a perfect `n`-th power.
    #[must_use]
    pub fn exact_nth_root(&self, n: u32) -> Option<Self> {
        let root = self.nth_root_floor(n).ok()?;
        (root.pow(n) == *self).then_some(root)
    }

    /// Unwraps into the underlying `IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Borrows the underlying `IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Narrows to `i64`, or `None` on overflow.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Narrows to `u64`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.clone().try_into().ok()
    }

    /// Narrows to `u32`.
    #[must_use]
    pub fn to_u32(&self) -> Option<u32> {
        self.0.clone().try_into().ok()
    }

    /// Raises to a machine exponent.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Integer {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s.trim_start_matches('+'), 10)
            .map_err(|_| ArithmeticError::Parse(s.to_string()))
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait<Integer> for &Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(&self.0, rhs.0))
            }
        }

        impl $trait for &Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// Truncating, as in `dashu`; see `div_mod_floor` for floor semantics.
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl From<UBig> for Integer {
    fn from(value: UBig) -> Self {
        Self(IBig::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(n: i64) -> Integer {
        Integer::new(n)
    }

    #[test]
    fn test_truncating_operators() {
        assert_eq!(&z(-17) / &z(5), z(-3));
        assert_eq!(&z(-17) % &z(5), z(-2));
        assert_eq!(z(6) * &z(-7) + z(2), z(-40));
        assert_eq!(-&z(9) - z(1), z(-10));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(z(84).gcd(&z(-36)), z(12));
        assert_eq!(z(0).gcd(&z(-7)), z(7));
        assert_eq!(z(-4).lcm(&z(6)), z(12));
        assert_eq!(z(0).lcm(&z(6)), z(0));
    }

    #[test]
    fn test_parse_and_narrow() {
        let big: Integer = "+340282366920938463463374607431768211456".parse().unwrap();
        assert_eq!(big, z(2).pow(128));
        assert_eq!(big.to_i64(), None);
        assert_eq!(z(-5).to_u64(), None);
        assert_eq!(z(70_000).to_u32(), Some(70_000));
        assert!("12a".parse::<Integer>().is_err());
        assert_eq!(Integer::from_str_radix("ff", 16).unwrap(), z(255));
    }

    #[test]
    fn test_div_mod_floor() {
        for (a, b, q, r) in [(-7, 2, -4, 1), (7, 2, 3, 1), (7, -2, -4, -1), (-8, 4, -2, 0)] {
            assert_eq!(z(a).div_mod_floor(&z(b)), (z(q), z(r)), "{a} divmod {b}");
        }
        assert!(z(12).is_multiple_of(&z(-4)));
        assert!(!z(12).is_multiple_of(&z(0)));
    }

    #[test]
    fn test_nth_root_floor() {
        for (x, expected) in [(0, 0), (1, 1), (2, 1), (3, 1), (4, 2), (8, 2), (9, 3), (24, 4)] {
            assert_eq!(z(x).nth_root_floor(2).unwrap(), z(expected), "sqrt({x})");
        }
        assert_eq!(z(26).nth_root_floor(3).unwrap(), z(2));
        assert_eq!(z(27).nth_root_floor(3).unwrap(), z(3));
        assert_eq!(z(-27).nth_root_floor(3).unwrap(), z(-3));
        assert_eq!(z(-26).nth_root_floor(3).unwrap(), z(-3));
        assert!(z(-4).nth_root_floor(2).is_err());
        assert!(z(4).nth_root_floor(0).is_err());
    }

    #[test]
    fn test_exact_nth_root() {
        let big = z(12345).pow(7);
        assert_eq!(big.exact_nth_root(7), Some(z(12345)));
        assert_eq!((big + z(1)).exact_nth_root(7), None);
    }

    #[test]
    fn test_sign_and_size() {
        assert_eq!(z(-3).signum(), -1);
        assert_eq!(z(0).signum(), 0);
        assert!(z(-6).is_even());
        assert_eq!(z(255).bit_len(), 8);
        assert_eq!(z(0).decimal_digits(), 1);
        assert_eq!(z(-999).decimal_digits(), 3);
        assert_eq!(Integer::ten_pow(12).decimal_digits(), 13);
        assert_eq!((Integer::ten_pow(40) - z(1)).decimal_digits(), 40);
        assert_eq!(z(2).pow(200).bit_len(), 201);
    }

    #[test]
    fn test_nth_root_of_large_index() {
        let x = z(3).pow(50);
        assert_eq!(x.nth_root_floor(20_000).unwrap(), z(1));
        assert_eq!((-&x).nth_root_floor(20_001).unwrap(), z(-2));
        assert_eq!(z(2).pow(20_000).exact_nth_root(20_000), Some(z(2)));
        assert_eq!(z(0).nth_root_floor(7).unwrap(), z(0));
    }

    #[test]
    fn test_debug_names_the_type() {
        assert_eq!(format!("{:?}", z(-42)), "Integer(-42)");
        assert_eq!(format!("{:?}", vec![z(1), z(2)]), "[Integer(1), Integer(2)]");
    }
}
