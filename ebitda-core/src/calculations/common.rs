//! Common helpers shared by the waterfall and the comparison table.
//!
//! Arithmetic here never panics: quotients that fall outside the `Decimal`
//! range come back as `None`, and differences that cannot be represented
//! are treated as out of tolerance.

use rust_decimal::{Decimal, RoundingStrategy};

/// Absolute tolerance under which two values are considered unchanged.
///
/// ```
/// use rust_decimal_macros::dec;
/// use ebitda_core::calculations::common::TOLERANCE;
///
/// assert_eq!(TOLERANCE, dec!(0.000000001));
/// ```
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// Divides `numerator` by `denominator`, treating a zero denominator as a
/// zero quotient.
///
/// # Arguments
///
/// * `numerator` - The value being divided
/// * `denominator` - The divisor; zero yields a zero quotient
///
/// # Returns
///
/// The quotient, or `None` when it is too large for a `Decimal` (a tiny
/// denominator under a large numerator).
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use ebitda_core::calculations::common::checked_divide_or_zero;
///
/// assert_eq!(checked_divide_or_zero(dec!(49500), dec!(1100)), Some(dec!(45)));
/// assert_eq!(checked_divide_or_zero(dec!(49500), Decimal::ZERO), Some(Decimal::ZERO));
/// assert_eq!(checked_divide_or_zero(Decimal::MAX, dec!(0.001)), None);
/// ```
pub fn checked_divide_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Option<Decimal> {
    if denominator.is_zero() {
        Some(Decimal::ZERO)
    } else {
        numerator.checked_div(denominator)
    }
}

/// The `Decimal` bound a quotient of `numerator` over `denominator` saturates
/// to when [`checked_divide_or_zero`] overflows.
pub fn saturated_quotient(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if numerator.is_sign_negative() != denominator.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Returns `true` when `a` and `b` differ by no more than [`TOLERANCE`].
///
/// Values too far apart for their difference to be represented are never
/// within tolerance.
pub fn within_tolerance(
    a: Decimal,
    b: Decimal,
) -> bool {
    a.checked_sub(b)
        .is_some_and(|difference| difference.abs() <= TOLERANCE)
}

/// Rounds to `dp` decimal places, with midpoints going to the even digit.
///
/// # Arguments
///
/// * `value` - The decimal value to round
/// * `dp` - Decimal places to keep
///
/// # Returns
///
/// The rounded value. Exact halves land on the even neighbour, so
/// `75.25` shows as `75.2` and `2.5` as `2`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ebitda_core::calculations::common::round_half_even;
///
/// assert_eq!(round_half_even(dec!(136.818), 0), dec!(137));
/// assert_eq!(round_half_even(dec!(75.25), 1), dec!(75.2));
/// assert_eq!(round_half_even(dec!(75.35), 1), dec!(75.4));
/// assert_eq!(round_half_even(dec!(-0.5), 0), dec!(0));
/// ```
pub fn round_half_even(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}
