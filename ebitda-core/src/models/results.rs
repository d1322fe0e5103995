use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of one waterfall evaluation.
///
/// Always derived from an [`Inputs`](crate::Inputs) value by
/// [`compute`](crate::calculations::compute); never edited on its own.
/// Percentage metrics are stored as fractions (`0.7525`, not `75.25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    pub revenue: Decimal,
    pub variable_cost: Decimal,
    pub contribution: Decimal,
    /// Passed through from the inputs unchanged.
    pub fixed_cost: Decimal,
    pub ebitda: Decimal,
    /// Variable cost divided by processed tons, or zero when no tons were processed.
    pub var_cost_per_ton: Decimal,
    /// Contribution divided by processed tons, or zero when no tons were processed.
    pub contrib_per_ton: Decimal,
    /// Contribution over revenue, or zero when there is no revenue.
    pub contribution_pct: Decimal,
    /// EBITDA over revenue, or zero when there is no revenue.
    pub ebitda_pct: Decimal,
    /// Energy + labor + other, before multiplying by processed tons.
    pub var_cost_per_processed_ton: Decimal,
}

impl Results {
    /// Reads one metric.
    ///
    /// # Arguments
    ///
    /// * `metric` - The value to read
    ///
    /// # Returns
    ///
    /// The stored value. Percent metrics come back as fractions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ebitda_core::{Inputs, Metric, compute};
    ///
    /// let results = compute(&Inputs::defaults());
    ///
    /// assert_eq!(results.get(Metric::Contribution), dec!(150500));
    /// assert_eq!(results.get(Metric::ContributionPct), dec!(0.7525));
    /// ```
    pub fn get(
        &self,
        metric: Metric,
    ) -> Decimal {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::VariableCost => self.variable_cost,
            Metric::Contribution => self.contribution,
            Metric::FixedCost => self.fixed_cost,
            Metric::Ebitda => self.ebitda,
            Metric::VarCostPerTon => self.var_cost_per_ton,
            Metric::ContribPerTon => self.contrib_per_ton,
            Metric::ContributionPct => self.contribution_pct,
            Metric::EbitdaPct => self.ebitda_pct,
            Metric::VarCostComponents => self.var_cost_per_processed_ton,
        }
    }
}

/// How a metric is meant to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricFormat {
    /// Whole currency units with thousands separators.
    Money,
    /// A fraction rendered as a percentage.
    Percent,
}

/// Names one value of a [`Results`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Revenue,
    VariableCost,
    Contribution,
    FixedCost,
    Ebitda,
    VarCostPerTon,
    ContribPerTon,
    ContributionPct,
    EbitdaPct,
    /// The per-ton cost components summed, shown while learning variable cost.
    VarCostComponents,
}

impl Metric {
    /// The nine reported results, in display order.
    pub const REPORTED: [Metric; 9] = [
        Metric::Revenue,
        Metric::VariableCost,
        Metric::Contribution,
        Metric::FixedCost,
        Metric::Ebitda,
        Metric::VarCostPerTon,
        Metric::ContribPerTon,
        Metric::ContributionPct,
        Metric::EbitdaPct,
    ];

    /// The rows of the current-versus-original table, in display order.
    pub const COMPARED: [Metric; 5] = [
        Metric::Revenue,
        Metric::VariableCost,
        Metric::Contribution,
        Metric::FixedCost,
        Metric::Ebitda,
    ];

    /// Row label used by the lesson panel, the comparison table, and CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::VariableCost => "Variable Cost",
            Self::Contribution => "Contribution",
            Self::FixedCost => "Fixed Cost",
            Self::Ebitda => "EBITDA",
            Self::VarCostPerTon => "Var Cost / Processed Ton",
            Self::ContribPerTon => "Contribution / Processed Ton",
            Self::ContributionPct => "Contribution %",
            Self::EbitdaPct => "EBITDA %",
            Self::VarCostComponents => "Var cost per processed ton",
        }
    }

    /// Display kind: the two margin ratios are percentages, the rest money.
    pub fn format(&self) -> MetricFormat {
        match self {
            Self::ContributionPct | Self::EbitdaPct => MetricFormat::Percent,
            _ => MetricFormat::Money,
        }
    }
}
