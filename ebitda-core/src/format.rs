//! Display formatting for money and percentage values.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_even;
use crate::models::MetricFormat;

/// Formats whole currency units with a dollar sign and thousands separators.
///
/// Negative amounts keep the sign after the dollar sign. Exact halves round
/// to the even whole unit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ebitda_core::format::money;
///
/// assert_eq!(money(dec!(200000)), "$200,000");
/// assert_eq!(money(dec!(136.818)), "$137");
/// assert_eq!(money(dec!(-16500)), "$-16,500");
/// assert_eq!(money(dec!(2.5)), "$2");
/// ```
pub fn money(value: Decimal) -> String {
    let rounded = round_half_even(value, 0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("${sign}{}", group_thousands(&digits))
}

/// Formats a fraction as a percentage with one decimal place.
///
/// A fraction too large to scale by 100 is shown as a bound, `>7.9e28%` or
/// `<-7.9e28%`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use ebitda_core::format::percent;
///
/// assert_eq!(percent(dec!(0.1525)), "15.2%");
/// assert_eq!(percent(dec!(0)), "0.0%");
/// assert_eq!(percent(Decimal::MAX), ">7.9e28%");
/// ```
pub fn percent(fraction: Decimal) -> String {
    match fraction.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => format!("{:.1}%", round_half_even(scaled, 1)),
        None if fraction.is_sign_negative() => "<-7.9e28%".to_string(),
        None => ">7.9e28%".to_string(),
    }
}

/// Formats `value` the way `format` asks for.
pub fn metric_value(
    format: MetricFormat,
    value: Decimal,
) -> String {
    match format {
        MetricFormat::Money => money(value),
        MetricFormat::Percent => percent(value),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
