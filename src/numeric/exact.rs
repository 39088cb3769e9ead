// ============================================================================
// Exact Coefficient Arithmetic
// Wide intermediates so digits are dropped once, by the context's rounding
// ============================================================================

use super::context::{RoundingMode, MAX_SCALE};
use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Largest coefficient a [`Decimal`] can carry (2^96 - 1).
pub(super) const MAX_COEFFICIENT: u128 = (1 << 96) - 1;

// ============================================================================
// 192-bit Unsigned Integer
// ============================================================================

/// Unsigned integer with three 64-bit limbs, least significant first.
///
/// Large enough for the product of two coefficients and for a coefficient
/// aligned up by `10^28`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Wide([u64; 3]);

impl Wide {
    pub(super) fn from_u128(value: u128) -> Self {
        Self([value as u64, (value >> 64) as u64, 0])
    }

    /// `lhs × rhs` for operands below 2^96
    pub(super) fn product(lhs: u128, rhs: u128) -> Self {
        debug_assert!(lhs <= MAX_COEFFICIENT && rhs <= MAX_COEFFICIENT);

        let a = [lhs as u64, (lhs >> 64) as u64];
        let b = [rhs as u64, (rhs >> 64) as u64];
        let mut limbs = [0u64; 4];

        for i in 0..2 {
            let mut carry = 0u128;
            for j in 0..2 {
                let cur = u128::from(limbs[i + j]) + u128::from(a[i]) * u128::from(b[j]) + carry;
                limbs[i + j] = cur as u64;
                carry = cur >> 64;
            }
            limbs[i + 2] = carry as u64;
        }

        Self([limbs[0], limbs[1], limbs[2]])
    }

    pub(super) fn add(self, other: Self) -> Self {
        let mut limbs = [0u64; 3];
        let mut carry = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let (sum, c1) = self.0[i].overflowing_add(other.0[i]);
            let (sum, c2) = sum.overflowing_add(u64::from(carry));
            *limb = sum;
            carry = c1 || c2;
        }
        Self(limbs)
    }

    /// `self - other`; requires `self >= other`
    pub(super) fn sub(self, other: Self) -> Self {
        debug_assert!(self >= other);

        let mut limbs = [0u64; 3];
        let mut borrow = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let (diff, b1) = self.0[i].overflowing_sub(other.0[i]);
            let (diff, b2) = diff.overflowing_sub(u64::from(borrow));
            *limb = diff;
            borrow = b1 || b2;
        }
        Self(limbs)
    }

    /// Divide in place by a small divisor, returning the remainder
    fn div_rem_small(&mut self, divisor: u64) -> u64 {
        let divisor = u128::from(divisor);
        let mut rem = 0u128;
        for limb in self.0.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        rem as u64
    }

    fn to_u128(self) -> Option<u128> {
        if self.0[2] != 0 {
            return None;
        }
        Some(u128::from(self.0[0]) | (u128::from(self.0[1]) << 64))
    }
}

impl PartialOrd for Wide {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wide {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

// ============================================================================
// Rounding
// ============================================================================

impl RoundingMode {
    /// Whether a kept coefficient moves one unit away from zero, given how the
    /// dropped tail compares to half a unit.
    pub(super) fn rounds_up(self, tail: Ordering, odd: bool) -> bool {
        match self {
            RoundingMode::TowardZero => false,
            RoundingMode::HalfUp => tail != Ordering::Less,
            RoundingMode::HalfEven => {
                tail == Ordering::Greater || (tail == Ordering::Equal && odd)
            }
        }
    }
}

/// Round the exact magnitude `wide × 10^-scale` into a [`Decimal`].
///
/// Low digits are dropped until the coefficient fits 96 bits and the scale
/// fits 28; the dropped tail is resolved by `mode`.
///
/// # Errors
/// Returns `Overflow` when the integer part alone does not fit.
pub(super) fn round_wide(
    mut wide: Wide,
    mut scale: u32,
    negative: bool,
    mode: RoundingMode,
) -> NumericResult<Decimal> {
    let mut last = 0u64;
    let mut sticky = false;

    let coefficient = loop {
        if scale <= MAX_SCALE {
            if let Some(fits) = wide.to_u128().filter(|c| *c <= MAX_COEFFICIENT) {
                break fits;
            }
        }
        if scale == 0 {
            return Err(NumericError::Overflow);
        }
        sticky |= last != 0;
        last = wide.div_rem_small(10);
        scale -= 1;
    };

    let tail = last.cmp(&5).then(if sticky {
        Ordering::Greater
    } else {
        Ordering::Equal
    });

    finish(coefficient, scale as i32, negative, tail, mode)
}

/// Apply `mode` to a kept coefficient and build the value
/// `±coefficient × 10^-exponent`.
pub(super) fn finish(
    coefficient: u128,
    exponent: i32,
    negative: bool,
    tail: Ordering,
    mode: RoundingMode,
) -> NumericResult<Decimal> {
    let mut coefficient = coefficient;
    if mode.rounds_up(tail, coefficient % 2 == 1) {
        coefficient += 1;
    }

    let (coefficient, scale) = if exponent < 0 {
        let widened = 10u128
            .checked_pow(exponent.unsigned_abs())
            .and_then(|factor| coefficient.checked_mul(factor))
            .ok_or(NumericError::Overflow)?;
        (widened, 0)
    } else {
        (coefficient, exponent as u32)
    };

    if coefficient > MAX_COEFFICIENT || scale > MAX_SCALE {
        return Err(NumericError::Overflow);
    }

    let signed = if negative {
        -(coefficient as i128)
    } else {
        coefficient as i128
    };

    Decimal::try_from_i128_with_scale(signed, scale)
        .map(|value| value.normalize())
        .map_err(|_| NumericError::Overflow)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_spans_limbs() {
        let product = Wide::product(MAX_COEFFICIENT, MAX_COEFFICIENT);
        // (2^96 - 1)^2 = 2^192 - 2^97 + 1
        assert_eq!(product.0, [1, u64::MAX << 33, u64::MAX]);
        assert!(product.to_u128().is_none());
    }

    #[test]
    fn test_add_and_sub() {
        let a = Wide::from_u128(u128::MAX);
        let b = Wide::from_u128(1);

        let sum = a.add(b);
        assert_eq!(sum.0, [0, 0, 1]);
        assert_eq!(sum.sub(b), a);
        assert!(sum > a);
    }

    #[test]
    fn test_div_rem_small() {
        let mut wide = Wide::from_u128(1234);
        assert_eq!(wide.div_rem_small(10), 4);
        assert_eq!(wide.to_u128(), Some(123));
    }

    #[test]
    fn test_rounds_up() {
        use Ordering::*;

        assert!(!RoundingMode::TowardZero.rounds_up(Greater, true));
        assert!(RoundingMode::HalfUp.rounds_up(Equal, false));
        assert!(!RoundingMode::HalfUp.rounds_up(Less, true));
        assert!(!RoundingMode::HalfEven.rounds_up(Equal, false));
        assert!(RoundingMode::HalfEven.rounds_up(Equal, true));
        assert!(RoundingMode::HalfEven.rounds_up(Greater, false));
    }

    #[test]
    fn test_round_wide_truncates_to_max_scale() {
        // 0.3333333333333333333² = 0.11111111111111111108888888888888888889
        let third = 3_333_333_333_333_333_333u128;
        let value = round_wide(
            Wide::product(third, third),
            38,
            false,
            RoundingMode::TowardZero,
        )
        .unwrap();
        assert_eq!(value.to_string(), "0.1111111111111111110888888888");
    }

    #[test]
    fn test_round_wide_overflow() {
        let huge = Wide::product(MAX_COEFFICIENT, 10);
        assert_eq!(
            round_wide(huge, 0, false, RoundingMode::TowardZero),
            Err(NumericError::Overflow)
        );
    }
}
