// ============================================================================
// Decimal Context
// Parsing and arithmetic bound to an explicit rounding configuration
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::exact::{finish, round_wide, Wide, MAX_COEFFICIENT};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fractional digits kept by division when no scale is configured.
pub const DEFAULT_DIVISION_SCALE: u32 = 20;

/// Largest fractional scale a [`Decimal`] can carry.
pub const MAX_SCALE: u32 = 28;

/// Rounding rule applied whenever a value loses fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Truncate toward zero (`1.239 -> 1.23`, `-1.239 -> -1.23`)
    #[default]
    TowardZero,
    /// Round to nearest, ties away from zero
    HalfUp,
    /// Round to nearest, ties to even (banker's rounding)
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::TowardZero => RoundingStrategy::ToZero,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Decimal arithmetic with a fixed rounding configuration.
///
/// Every operation that can lose digits applies the context's
/// [`RoundingMode`] exactly once, to the exact result. Division and
/// [`round_dp`] lose digits by design. Addition, multiplication and summation
/// are exact until a result needs more than 28 fractional digits or a 96-bit
/// coefficient, and fail with `Overflow` when the integer part cannot fit.
///
/// All results are normalized, so values that are mathematically equal
/// always print the same way (`"8"`, never `"8.0"`).
///
/// # Example
/// ```
/// use market_stats::numeric::DecimalContext;
///
/// let ctx = DecimalContext::default();
/// let a = ctx.parse("10")?;
/// let b = ctx.parse("3")?;
/// let q = ctx.div(a, b)?;
/// assert_eq!(ctx.round_dp(q, 2).to_string(), "3.33");
/// # Ok::<(), market_stats::numeric::NumericError>(())
/// ```
///
/// [`round_dp`]: DecimalContext::round_dp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalContext {
    rounding: RoundingMode,
    division_scale: u32,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::TowardZero,
            division_scale: DEFAULT_DIVISION_SCALE,
        }
    }
}

impl DecimalContext {
    /// Create a context with the given rounding mode and division scale.
    ///
    /// # Errors
    /// Returns `InvalidScale` if `division_scale` exceeds 28.
    pub fn new(rounding: RoundingMode, division_scale: u32) -> NumericResult<Self> {
        if division_scale > MAX_SCALE {
            return Err(NumericError::InvalidScale(division_scale));
        }
        Ok(Self {
            rounding,
            division_scale,
        })
    }

    #[inline]
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    #[inline]
    pub fn division_scale(&self) -> u32 {
        self.division_scale
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse a decimal string such as `"1234.567"` or `"-0.001"`.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    /// Returns `InvalidDecimal` carrying the original input.
    pub fn parse(&self, input: &str) -> NumericResult<Decimal> {
        parse_decimal(input)
    }

    #[inline]
    pub fn from_integer(&self, value: i64) -> Decimal {
        Decimal::from(value)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Addition.
    ///
    /// Exact whenever the result fits 28 fractional digits and a 96-bit
    /// coefficient; otherwise the lowest digits are dropped by the context's
    /// rounding mode.
    ///
    /// # Errors
    /// Returns `Overflow` if the integer part does not fit.
    pub fn add(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        let scale = lhs.scale().max(rhs.scale());
        let align = |value: Decimal| {
            Wide::product(value.mantissa().unsigned_abs(), 10u128.pow(scale - value.scale()))
        };
        let (a, b) = (align(lhs), align(rhs));

        let (magnitude, negative) = if lhs.is_sign_negative() == rhs.is_sign_negative() {
            (a.add(b), lhs.is_sign_negative())
        } else if a >= b {
            (a.sub(b), lhs.is_sign_negative())
        } else {
            (b.sub(a), rhs.is_sign_negative())
        };

        round_wide(magnitude, scale, negative, self.rounding)
    }

    /// Multiplication, rounded like [`add`](DecimalContext::add) when the
    /// exact product has more digits than a [`Decimal`] holds.
    ///
    /// # Errors
    /// Returns `Overflow` if the integer part does not fit.
    pub fn mul(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        let product = Wide::product(lhs.mantissa().unsigned_abs(), rhs.mantissa().unsigned_abs());
        let negative = lhs.is_sign_negative() != rhs.is_sign_negative();

        round_wide(product, lhs.scale() + rhs.scale(), negative, self.rounding)
    }

    /// Division rounded to `division_scale` fractional digits.
    ///
    /// The quotient is produced by long division on the coefficients, so the
    /// rounding mode sees the exact tail. When the integer part leaves no room
    /// for `division_scale` digits, the quotient is rounded at the last digit
    /// a [`Decimal`] can hold.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is exactly zero.
    pub fn div(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.division_scale > MAX_SCALE {
            return Err(NumericError::InvalidScale(self.division_scale));
        }

        let numerator = lhs.mantissa().unsigned_abs();
        let divisor = rhs.mantissa().unsigned_abs();
        let negative = lhs.is_sign_negative() != rhs.is_sign_negative();

        // lhs / rhs = (numerator / divisor) × 10^shift
        let shift = rhs.scale() as i32 - lhs.scale() as i32;
        let wanted = self.division_scale as i32 + shift;

        let mut coefficient = numerator / divisor;
        let mut remainder = numerator % divisor;

        if wanted < 0 {
            // Fewer digits than the integer quotient carries; at most 28 are dropped.
            let factor = 10u128.pow(wanted.unsigned_abs());
            let dropped = coefficient % factor;
            let tail = dropped.cmp(&(factor / 2)).then_with(|| remainder.cmp(&0));
            return finish(coefficient / factor, wanted - shift, negative, tail, self.rounding);
        }

        let mut digits = 0;
        while digits < wanted && remainder != 0 {
            let scaled = remainder * 10;
            let next = coefficient * 10 + scaled / divisor;
            if next > MAX_COEFFICIENT {
                break;
            }
            coefficient = next;
            remainder = scaled % divisor;
            digits += 1;
        }

        let tail = (remainder * 2).cmp(&divisor);
        finish(coefficient, digits - shift, negative, tail, self.rounding)
    }

    /// Sum of a sequence, folded with [`add`](DecimalContext::add). An empty
    /// sequence sums to zero.
    pub fn sum<I>(&self, values: I) -> NumericResult<Decimal>
    where
        I: IntoIterator<Item = Decimal>,
    {
        values
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, value| self.add(acc, value))
    }

    /// `(percentage / 100) × base`, dividing first.
    pub fn percent_of(&self, percentage: Decimal, base: Decimal) -> NumericResult<Decimal> {
        let fraction = self.div(percentage, self.from_integer(100))?;
        self.mul(fraction, base)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to `places` fractional digits using the context's mode.
    ///
    /// Values that already have `places` digits or fewer are returned
    /// unchanged (normalized).
    pub fn round_dp(&self, value: Decimal, places: u32) -> Decimal {
        value
            .round_dp_with_strategy(places, self.rounding.strategy())
            .normalize()
    }
}

/// Parse a decimal string independently of any rounding configuration.
pub(crate) fn parse_decimal(input: &str) -> NumericResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumericError::InvalidDecimal(input.to_string()));
    }
    Decimal::from_str(trimmed).map_err(|_| NumericError::InvalidDecimal(input.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.parse("123.456").unwrap(), dec("123.456"));
        assert_eq!(ctx.parse(" -0.001 ").unwrap(), dec("-0.001"));
        assert_eq!(ctx.parse("42").unwrap(), Decimal::from(42));
    }

    #[test]
    fn test_parse_invalid() {
        let ctx = DecimalContext::default();
        assert_eq!(
            ctx.parse("not_a_number"),
            Err(NumericError::InvalidDecimal("not_a_number".to_string()))
        );
        assert_eq!(
            ctx.parse(""),
            Err(NumericError::InvalidDecimal(String::new()))
        );
        assert!(ctx.parse("1.2.3").is_err());
    }

    #[test]
    fn test_new_rejects_large_scale() {
        assert_eq!(
            DecimalContext::new(RoundingMode::TowardZero, 29),
            Err(NumericError::InvalidScale(29))
        );
        assert!(DecimalContext::new(RoundingMode::HalfEven, 28).is_ok());
    }

    #[test]
    fn test_sum_is_exact() {
        let ctx = DecimalContext::default();
        let total = ctx
            .sum([dec("1.1"), dec("2.2"), dec("3.3")])
            .unwrap();
        assert_eq!(total.to_string(), "6.6");
        assert_eq!(ctx.sum(Vec::new()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_mul_normalizes() {
        let ctx = DecimalContext::default();
        let product = ctx.mul(dec("0.5"), dec("16")).unwrap();
        assert_eq!(product.to_string(), "8");
    }

    #[test]
    fn test_div_by_zero() {
        let ctx = DecimalContext::default();
        assert_eq!(
            ctx.div(Decimal::ONE, Decimal::ZERO),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            ctx.div(Decimal::ONE, dec("0.000")),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_truncates() {
        let ctx = DecimalContext::default();
        // 2/3 = 0.666..., never rounded up to ...67
        let q = ctx.div(Decimal::from(2), Decimal::from(3)).unwrap();
        assert_eq!(q.to_string(), "0.66666666666666666666");

        let neg = ctx.div(Decimal::from(-2), Decimal::from(3)).unwrap();
        assert_eq!(neg.to_string(), "-0.66666666666666666666");
    }

    #[test]
    fn test_div_truncates_large_quotient() {
        let ctx = DecimalContext::default();
        // The integer part leaves room for only 9 fractional digits
        let lhs = dec("200000000000000000000");
        let q = ctx.div(lhs, Decimal::from(3)).unwrap();
        assert_eq!(q.to_string(), "66666666666666666666.666666666");

        let neg = ctx.div(-lhs, Decimal::from(3)).unwrap();
        assert_eq!(neg.to_string(), "-66666666666666666666.666666666");
    }

    #[test]
    fn test_div_truncates_irt_price() {
        let ctx = DecimalContext::default();
        // (1 × 6425012345 + 2 × 6425012346) / 3
        let q = ctx.div(dec("19275037037"), Decimal::from(3)).unwrap();
        assert_eq!(q.to_string(), format!("6425012345.{}", "6".repeat(19)));
    }

    #[test]
    fn test_div_coarse_scale() {
        let ctx = DecimalContext::new(RoundingMode::TowardZero, 0).unwrap();
        assert_eq!(ctx.div(dec("9.99"), dec("0.001")).unwrap().to_string(), "9990");
        assert_eq!(ctx.div(dec("1.999"), Decimal::ONE).unwrap().to_string(), "1");

        let half_up = DecimalContext::new(RoundingMode::HalfUp, 0).unwrap();
        assert_eq!(half_up.div(dec("2.5"), Decimal::ONE).unwrap().to_string(), "3");

        let half_even = DecimalContext::new(RoundingMode::HalfEven, 0).unwrap();
        assert_eq!(half_even.div(dec("2.5"), Decimal::ONE).unwrap().to_string(), "2");
        assert_eq!(half_even.div(dec("2.5000001"), Decimal::ONE).unwrap().to_string(), "3");
    }

    #[test]
    fn test_mul_truncates_beyond_max_scale() {
        let ctx = DecimalContext::default();
        let third = dec("0.3333333333333333333");
        let product = ctx.mul(third, third).unwrap();
        assert_eq!(product.to_string(), "0.1111111111111111110888888888");

        let neg = ctx.mul(-third, third).unwrap();
        assert_eq!(neg.to_string(), "-0.1111111111111111110888888888");
    }

    #[test]
    fn test_mul_overflow() {
        let ctx = DecimalContext::default();
        assert_eq!(
            ctx.mul(Decimal::MAX, Decimal::from(2)),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_add_drops_digits_by_rounding_mode() {
        let lhs = dec(&format!("7.{}9", "0".repeat(27)));

        let truncated = DecimalContext::default().add(lhs, Decimal::ONE).unwrap();
        assert_eq!(truncated.to_string(), "8");

        let half_up = DecimalContext::new(RoundingMode::HalfUp, 20).unwrap();
        let rounded = half_up.add(lhs, Decimal::ONE).unwrap();
        assert_eq!(rounded.to_string(), format!("8.{}1", "0".repeat(26)));
    }

    #[test]
    fn test_add_mixed_signs() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.add(dec("1.5"), dec("-2.25")).unwrap().to_string(), "-0.75");
        assert_eq!(ctx.add(dec("-1.5"), dec("1.50")).unwrap(), Decimal::ZERO);
        assert_eq!(
            ctx.add(Decimal::MAX, Decimal::ONE),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_from_integer() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.from_integer(-42), dec("-42"));
        assert_eq!(ctx.from_integer(100), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_div_exact() {
        let ctx = DecimalContext::default();
        let q = ctx.div(Decimal::from(80), Decimal::from(5)).unwrap();
        assert_eq!(q.to_string(), "16");
    }

    #[test]
    fn test_div_with_half_up() {
        let ctx = DecimalContext::new(RoundingMode::HalfUp, 2).unwrap();
        let q = ctx.div(Decimal::from(2), Decimal::from(3)).unwrap();
        assert_eq!(q.to_string(), "0.67");
    }

    #[test]
    fn test_round_dp_truncates() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.round_dp(dec("1234.567"), 2).to_string(), "1234.56");
        assert_eq!(ctx.round_dp(dec("1234.567"), 0).to_string(), "1234");
        assert_eq!(ctx.round_dp(dec("-1.239"), 2).to_string(), "-1.23");
        assert_eq!(ctx.round_dp(dec("1.5"), 2).to_string(), "1.5");
    }

    #[test]
    fn test_equal_values_round_identically() {
        let ctx = DecimalContext::default();
        let a = ctx.add(dec("0.1"), dec("0.2")).unwrap();
        let b = ctx.add(dec("0.2"), dec("0.10")).unwrap();
        assert_eq!(ctx.round_dp(a, 1).to_string(), ctx.round_dp(b, 1).to_string());
        assert_eq!(a.to_string(), "0.3");
        assert_eq!(b.to_string(), "0.3");
    }

    #[test]
    fn test_percent_of() {
        let ctx = DecimalContext::default();
        let half = ctx.percent_of(dec("50"), dec("16")).unwrap();
        assert_eq!(half.to_string(), "8");

        let small = ctx.percent_of(dec("1.23"), dec("200")).unwrap();
        assert_eq!(small.to_string(), "2.46");
    }
}
