//! Revenue to EBITDA waterfall.
//!
//! # Calculation Order
//!
//! | Step | Result | Formula |
//! |------|--------|---------|
//! | 1 | Revenue | Unit price × Net saleable tons |
//! | 2 | Var cost per processed ton | Energy + Labor + Other |
//! | 3 | Variable Cost | Processed tons × Step 2 |
//! | 4 | Contribution | Revenue − Variable Cost |
//! | 5 | EBITDA | Contribution − Fixed cost |
//! | 6 | Var Cost / Processed Ton | Variable Cost ÷ Processed tons |
//! | 7 | Contribution % | Contribution ÷ Revenue |
//! | 8 | EBITDA % | EBITDA ÷ Revenue |
//! | 9 | Contribution / Processed Ton | Contribution ÷ Processed tons |
//!
//! Steps 6 to 9 yield zero when their denominator is zero. A line that leaves
//! the `Decimal` range saturates in [`compute`] and is an error in
//! [`try_compute`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ebitda_core::{Inputs, compute};
//!
//! let results = compute(&Inputs::defaults());
//!
//! assert_eq!(results.revenue, dec!(200000));
//! assert_eq!(results.variable_cost, dec!(49500));
//! assert_eq!(results.ebitda, dec!(30500));
//! assert_eq!(results.ebitda_pct, dec!(0.1525));
//! ```

use std::convert::Infallible;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{checked_divide_or_zero, saturated_quotient};
use crate::models::{Inputs, Metric, Results};

/// A waterfall line whose value lies outside the `Decimal` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} is too large to represent", .metric.label())]
pub struct OverflowError {
    /// The first line that overflowed, in calculation order.
    pub metric: Metric,
}

/// One line of the waterfall: the exact value when it fits, and the bound it
/// saturates to when it does not.
struct Line {
    exact: Option<Decimal>,
    saturated: Decimal,
}

fn product(
    a: Decimal,
    b: Decimal,
) -> Line {
    Line {
        exact: a.checked_mul(b),
        saturated: a.saturating_mul(b),
    }
}

fn sum(
    a: Decimal,
    b: Decimal,
) -> Line {
    Line {
        exact: a.checked_add(b),
        saturated: a.saturating_add(b),
    }
}

fn difference(
    a: Decimal,
    b: Decimal,
) -> Line {
    Line {
        exact: a.checked_sub(b),
        saturated: a.saturating_sub(b),
    }
}

fn quotient(
    numerator: Decimal,
    denominator: Decimal,
) -> Line {
    Line {
        exact: checked_divide_or_zero(numerator, denominator),
        saturated: saturated_quotient(numerator, denominator),
    }
}

/// Runs the nine steps, asking `on_overflow` what to do whenever a line does
/// not fit. `Ok(())` keeps going with the saturated value.
fn evaluate<E>(
    inputs: &Inputs,
    mut on_overflow: impl FnMut(Metric) -> Result<(), E>,
) -> Result<Results, E> {
    let mut fit = |metric: Metric, line: Line| match line.exact {
        Some(value) => Ok(value),
        None => on_overflow(metric).map(|()| line.saturated),
    };

    let revenue = fit(Metric::Revenue, product(inputs.unit_price, inputs.net_saleable_tons))?;

    let energy_and_labor = fit(
        Metric::VarCostComponents,
        sum(inputs.energy_per_ton, inputs.labor_per_ton),
    )?;
    let var_cost_per_processed_ton = fit(
        Metric::VarCostComponents,
        sum(energy_and_labor, inputs.other_per_ton),
    )?;

    let variable_cost = fit(
        Metric::VariableCost,
        product(inputs.processed_tons, var_cost_per_processed_ton),
    )?;
    let contribution = fit(Metric::Contribution, difference(revenue, variable_cost))?;
    let ebitda = fit(Metric::Ebitda, difference(contribution, inputs.fixed_cost))?;

    if inputs.processed_tons.is_zero() {
        debug!("processed tons is zero; per-ton metrics reported as zero");
    }
    if revenue.is_zero() {
        debug!("revenue is zero; margin percentages reported as zero");
    }

    let var_cost_per_ton = fit(
        Metric::VarCostPerTon,
        quotient(variable_cost, inputs.processed_tons),
    )?;
    let contribution_pct = fit(Metric::ContributionPct, quotient(contribution, revenue))?;
    let ebitda_pct = fit(Metric::EbitdaPct, quotient(ebitda, revenue))?;
    let contrib_per_ton = fit(
        Metric::ContribPerTon,
        quotient(contribution, inputs.processed_tons),
    )?;

    Ok(Results {
        revenue,
        variable_cost,
        contribution,
        fixed_cost: inputs.fixed_cost,
        ebitda,
        var_cost_per_ton,
        contrib_per_ton,
        contribution_pct,
        ebitda_pct,
        var_cost_per_processed_ton,
    })
}

/// Evaluates the waterfall for `inputs`.
///
/// Pure and infallible: the same inputs always produce the same results,
/// and zero denominators produce zero ratios rather than errors.
///
/// # Arguments
///
/// * `inputs` - The seven business inputs; any values are accepted
///
/// # Returns
///
/// The nine reported metrics plus the per-ton cost components. A line that
/// falls outside the `Decimal` range saturates at [`Decimal::MAX`] or
/// [`Decimal::MIN`]; use [`try_compute`] to detect that instead.
pub fn compute(inputs: &Inputs) -> Results {
    let Ok(results) = evaluate(inputs, |metric| {
        warn!(metric = metric.label(), "result out of range; saturated");
        Ok::<(), Infallible>(())
    });
    results
}

/// Evaluates the waterfall, failing instead of saturating.
///
/// # Errors
///
/// Returns [`OverflowError`] naming the first line, in calculation order,
/// whose value does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use ebitda_core::{InputField, Inputs, Metric, try_compute};
///
/// let inputs = Inputs::defaults().with(InputField::UnitPrice, Decimal::MAX);
/// let err = try_compute(&inputs).unwrap_err();
///
/// assert_eq!(err.metric, Metric::Revenue);
/// assert!(try_compute(&Inputs::defaults()).is_ok());
/// ```
pub fn try_compute(inputs: &Inputs) -> Result<Results, OverflowError> {
    evaluate(inputs, |metric| Err(OverflowError { metric }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_even;
    use crate::models::{InputField, Metric};

    fn reference_inputs() -> Inputs {
        Inputs {
            unit_price: dec!(200),
            net_saleable_tons: dec!(1000),
            processed_tons: dec!(1100),
            energy_per_ton: dec!(15),
            labor_per_ton: dec!(20),
            other_per_ton: dec!(10),
            fixed_cost: dec!(120000),
        }
    }

    // =========================================================================
    // Reference case
    // =========================================================================

    #[test]
    fn reference_case_waterfall() {
        let results = compute(&reference_inputs());

        assert_eq!(results.revenue, dec!(200000));
        assert_eq!(results.var_cost_per_processed_ton, dec!(45));
        assert_eq!(results.variable_cost, dec!(49500));
        assert_eq!(results.contribution, dec!(150500));
        assert_eq!(results.fixed_cost, dec!(120000));
        assert_eq!(results.ebitda, dec!(30500));
    }

    #[test]
    fn reference_case_ratios() {
        let results = compute(&reference_inputs());

        assert_eq!(results.contribution_pct, dec!(0.7525));
        assert_eq!(results.ebitda_pct, dec!(0.1525));
        assert_eq!(results.var_cost_per_ton, dec!(45));
        assert_eq!(round_half_even(results.contrib_per_ton, 2), dec!(136.82));
    }

    #[test]
    fn energy_spike_raises_variable_cost() {
        let inputs = reference_inputs().with(InputField::EnergyPerTon, dec!(30));

        let results = compute(&inputs);

        assert_eq!(results.variable_cost, dec!(66000));
        assert_eq!(results.ebitda, dec!(14000));
    }

    #[test]
    fn fixed_cost_is_passed_through() {
        let inputs = reference_inputs().with(InputField::FixedCost, dec!(98765.43));

        assert_eq!(compute(&inputs).get(Metric::FixedCost), dec!(98765.43));
    }

    // =========================================================================
    // Zero guards
    // =========================================================================

    #[test]
    fn zero_processed_tons_zeroes_per_ton_metrics() {
        let inputs = reference_inputs().with(InputField::ProcessedTons, Decimal::ZERO);

        let results = compute(&inputs);

        assert_eq!(results.variable_cost, Decimal::ZERO);
        assert_eq!(results.var_cost_per_ton, Decimal::ZERO);
        assert_eq!(results.contrib_per_ton, Decimal::ZERO);
        // Percentages still have a revenue denominator
        assert_eq!(results.contribution_pct, Decimal::ONE);
    }

    #[test]
    fn zero_unit_price_zeroes_revenue_and_percentages() {
        let inputs = reference_inputs().with(InputField::UnitPrice, Decimal::ZERO);

        let results = compute(&inputs);

        assert_eq!(results.revenue, Decimal::ZERO);
        assert_eq!(results.contribution_pct, Decimal::ZERO);
        assert_eq!(results.ebitda_pct, Decimal::ZERO);
        assert_eq!(results.contribution, dec!(-49500));
    }

    #[test]
    fn zero_saleable_tons_zeroes_revenue_and_percentages() {
        let inputs = reference_inputs().with(InputField::NetSaleableTons, Decimal::ZERO);

        let results = compute(&inputs);

        assert_eq!(results.revenue, Decimal::ZERO);
        assert_eq!(results.contribution_pct, Decimal::ZERO);
        assert_eq!(results.ebitda_pct, Decimal::ZERO);
    }

    #[test]
    fn all_zero_inputs_produce_all_zero_results() {
        let zeros = Inputs {
            unit_price: Decimal::ZERO,
            net_saleable_tons: Decimal::ZERO,
            processed_tons: Decimal::ZERO,
            energy_per_ton: Decimal::ZERO,
            labor_per_ton: Decimal::ZERO,
            other_per_ton: Decimal::ZERO,
            fixed_cost: Decimal::ZERO,
        };

        let results = compute(&zeros);

        for metric in Metric::REPORTED {
            assert_eq!(results.get(metric), Decimal::ZERO, "{}", metric.label());
        }
    }

    // =========================================================================
    // Permissive inputs
    // =========================================================================

    #[test]
    fn negative_inputs_propagate_arithmetically() {
        let inputs = reference_inputs()
            .with(InputField::UnitPrice, dec!(-10))
            .with(InputField::LaborPerTon, dec!(-20));

        let results = compute(&inputs);

        assert_eq!(results.revenue, dec!(-10000));
        assert_eq!(results.var_cost_per_processed_ton, dec!(5));
        assert_eq!(results.variable_cost, dec!(5500));
        assert_eq!(results.contribution, dec!(-15500));
        assert_eq!(results.ebitda, dec!(-135500));
        assert_eq!(results.ebitda_pct, dec!(13.55));
    }

    #[test]
    fn fractional_inputs_are_accepted() {
        let inputs = reference_inputs().with(InputField::UnitPrice, dec!(199.5));

        assert_eq!(compute(&inputs).revenue, dec!(199500));
    }

    #[test]
    fn compute_is_deterministic() {
        let inputs = reference_inputs().with(InputField::ProcessedTons, dec!(1234));

        assert_eq!(compute(&inputs), compute(&inputs));
    }

    // =========================================================================
    // Range limits
    // =========================================================================

    #[test]
    fn revenue_at_decimal_max_still_fits() {
        let inputs = reference_inputs()
            .with(InputField::UnitPrice, Decimal::MAX)
            .with(InputField::NetSaleableTons, Decimal::ONE);

        let results = try_compute(&inputs).unwrap();

        assert_eq!(results.revenue, Decimal::MAX);
        assert_eq!(results.contribution, Decimal::MAX - dec!(49500));
        assert_eq!(compute(&inputs), results);
    }

    #[test]
    fn revenue_past_decimal_max_saturates() {
        let inputs = reference_inputs().with(InputField::UnitPrice, Decimal::MAX);

        assert_eq!(
            try_compute(&inputs),
            Err(OverflowError {
                metric: Metric::Revenue
            })
        );
        assert_eq!(compute(&inputs).revenue, Decimal::MAX);
    }

    #[test]
    fn negative_overflow_saturates_at_decimal_min() {
        let inputs = reference_inputs()
            .with(InputField::UnitPrice, Decimal::from_scientific("1e20").unwrap())
            .with(InputField::NetSaleableTons, Decimal::from_scientific("-1e10").unwrap());

        let results = compute(&inputs);

        assert_eq!(results.revenue, Decimal::MIN);
        assert_eq!(results.contribution, Decimal::MIN);
        assert_eq!(results.ebitda, Decimal::MIN);
    }

    #[test]
    fn fixed_cost_at_decimal_min_overflows_ebitda() {
        let inputs = reference_inputs().with(InputField::FixedCost, Decimal::MIN);

        let err = try_compute(&inputs).unwrap_err();

        assert_eq!(err.metric, Metric::Ebitda);
        assert_eq!(compute(&inputs).ebitda, Decimal::MAX);
    }

    #[test]
    fn cost_components_overflow_is_reported() {
        let inputs = reference_inputs()
            .with(InputField::EnergyPerTon, Decimal::MAX)
            .with(InputField::LaborPerTon, Decimal::MAX);

        let err = try_compute(&inputs).unwrap_err();

        assert_eq!(err.metric, Metric::VarCostComponents);
    }

    #[test]
    fn tiny_revenue_overflows_margin_ratios() {
        let inputs = reference_inputs()
            .with(InputField::UnitPrice, dec!(0.0000000000000000000000001))
            .with(InputField::NetSaleableTons, dec!(0.001));

        let err = try_compute(&inputs).unwrap_err();
        let results = compute(&inputs);

        assert_eq!(err.metric, Metric::ContributionPct);
        assert_eq!(results.revenue, Decimal::new(1, 28));
        assert_eq!(results.contribution_pct, Decimal::MIN);
        assert_eq!(results.ebitda_pct, Decimal::MIN);
    }

    #[test]
    fn smallest_processed_tons_overflows_per_ton_contribution() {
        let inputs = reference_inputs().with(InputField::ProcessedTons, Decimal::new(1, 28));

        let err = try_compute(&inputs).unwrap_err();
        let results = compute(&inputs);

        assert_eq!(err.metric, Metric::ContribPerTon);
        assert_eq!(results.var_cost_per_ton, dec!(45));
        assert_eq!(results.contrib_per_ton, Decimal::MAX);
    }
}
