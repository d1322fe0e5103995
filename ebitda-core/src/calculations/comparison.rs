//! Current-versus-original comparison table.
//!
//! Each row pairs a metric's current value with its value in the frozen
//! baseline and the variance between them. Rows carry an [`Emphasis`] for
//! the current and variance columns so a renderer can colour them.
//!
//! The emphasis is directional only: a value that went up is
//! [`Emphasis::Favorable`] and a value that went down is
//! [`Emphasis::Unfavorable`], whatever the metric. A rising Variable Cost is
//! therefore shown the same way as a rising EBITDA.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::within_tolerance;
use crate::models::{Metric, Results};

/// Display emphasis for one cell of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    /// Unchanged within tolerance.
    Neutral,
    /// Higher than the reference.
    Favorable,
    /// Lower than the reference.
    Unfavorable,
}

impl Emphasis {
    /// Classifies `value` against `reference`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ebitda_core::Emphasis;
    ///
    /// assert_eq!(Emphasis::relative_to(dec!(14000), dec!(30500)), Emphasis::Unfavorable);
    /// assert_eq!(Emphasis::relative_to(dec!(66000), dec!(49500)), Emphasis::Favorable);
    /// assert_eq!(Emphasis::relative_to(dec!(10), dec!(10.0000000001)), Emphasis::Neutral);
    /// ```
    pub fn relative_to(
        value: Decimal,
        reference: Decimal,
    ) -> Self {
        if within_tolerance(value, reference) {
            Self::Neutral
        } else if value < reference {
            Self::Unfavorable
        } else {
            Self::Favorable
        }
    }

    /// Classifies a signed difference against zero.
    pub fn of_change(delta: Decimal) -> Self {
        Self::relative_to(delta, Decimal::ZERO)
    }
}

/// One row of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub current: Decimal,
    pub baseline: Decimal,
    /// `current - baseline`, saturating at the `Decimal` bounds.
    pub variance: Decimal,
}

impl ComparisonRow {
    pub fn current_emphasis(&self) -> Emphasis {
        Emphasis::relative_to(self.current, self.baseline)
    }

    /// The baseline column is the reference, so it is never emphasized.
    pub fn baseline_emphasis(&self) -> Emphasis {
        Emphasis::Neutral
    }

    pub fn variance_emphasis(&self) -> Emphasis {
        Emphasis::of_change(self.variance)
    }
}

/// Builds the comparison rows for [`Metric::COMPARED`], in that order.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use ebitda_core::{Emphasis, InputField, Inputs, Metric, compare, compute};
///
/// let baseline = compute(&Inputs::defaults());
/// let current = compute(&Inputs::defaults().with(InputField::EnergyPerTon, dec!(30)));
///
/// let rows = compare(&current, &baseline);
/// let ebitda = rows.iter().find(|row| row.metric == Metric::Ebitda).unwrap();
///
/// assert_eq!(ebitda.variance, dec!(-16500));
/// assert_eq!(ebitda.current_emphasis(), Emphasis::Unfavorable);
/// ```
pub fn compare(
    current: &Results,
    baseline: &Results,
) -> Vec<ComparisonRow> {
    Metric::COMPARED
        .into_iter()
        .map(|metric| {
            let current = current.get(metric);
            let baseline = baseline.get(metric);
            ComparisonRow {
                metric,
                current,
                baseline,
                variance: current.saturating_sub(baseline),
            }
        })
        .collect()
}
