//! The six-step guided lesson.
//!
//! Each [`Step`] is one state of a linear state machine. A step carries its
//! lesson payload (heading, formula, highlighted metrics) and the set of
//! input fields the learner may edit while it is active.
//!
//! | Step | Lesson | Editable fields |
//! |------|-------------------|----------------------------------------------|
//! | 1 | Revenue | unit price |
//! | 2 | Variable Cost | energy, labor, other per ton |
//! | 3 | Contribution | net saleable tons |
//! | 4 | Fixed Cost | fixed cost |
//! | 5 | EBITDA | labor per ton |
//! | 6 | Unit Economics | other per ton, processed tons |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InputField, Metric};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("step must be between 1 and 6, got {0}")]
    OutOfRange(i64),

    #[error("'{0}' is not a step number")]
    NotANumber(String),
}

/// A labelled metric shown in a step's lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub label: &'static str,
    pub metric: Metric,
}

impl Highlight {
    const fn new(
        label: &'static str,
        metric: Metric,
    ) -> Self {
        Self { label, metric }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    Revenue,
    VariableCost,
    Contribution,
    FixedCost,
    Ebitda,
    UnitEconomics,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Revenue,
        Step::VariableCost,
        Step::Contribution,
        Step::FixedCost,
        Step::Ebitda,
        Step::UnitEconomics,
    ];

    pub const FIRST: Step = Step::Revenue;
    pub const LAST: Step = Step::UnitEconomics;

    /// 1-based position in the lesson.
    pub fn number(&self) -> u8 {
        match self {
            Self::Revenue => 1,
            Self::VariableCost => 2,
            Self::Contribution => 3,
            Self::FixedCost => 4,
            Self::Ebitda => 5,
            Self::UnitEconomics => 6,
        }
    }

    pub fn from_number(number: i64) -> Result<Self, StepError> {
        match number {
            1 => Ok(Self::Revenue),
            2 => Ok(Self::VariableCost),
            3 => Ok(Self::Contribution),
            4 => Ok(Self::FixedCost),
            5 => Ok(Self::Ebitda),
            6 => Ok(Self::UnitEconomics),
            other => Err(StepError::OutOfRange(other)),
        }
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(i64::from(self.number()) + 1).ok()
    }

    /// The preceding step, or `None` on the first one.
    pub fn prev(&self) -> Option<Self> {
        Self::from_number(i64::from(self.number()) - 1).ok()
    }

    /// Short name used in navigation, e.g. `"4) Fixed Cost"`.
    pub fn title(&self) -> String {
        let name = match self {
            Self::Revenue => "Revenue",
            Self::VariableCost => "Variable Cost",
            Self::Contribution => "Contribution",
            Self::FixedCost => "Fixed Cost",
            Self::Ebitda => "EBITDA",
            Self::UnitEconomics => "Unit Economics",
        };
        format!("{}) {name}", self.number())
    }

    /// Lesson heading, e.g. `"Step 5: Full EBITDA Formula"`.
    pub fn heading(&self) -> String {
        let topic = match self {
            Self::Revenue => "Revenue",
            Self::VariableCost => "Variable Cost",
            Self::Contribution => "Contribution",
            Self::FixedCost => "EBITDA",
            Self::Ebitda => "Full EBITDA Formula",
            Self::UnitEconomics => "Unit Economics",
        };
        format!("Step {}: {topic}", self.number())
    }

    pub fn formula(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue = Unit Price × Net Saleable Tons",
            Self::VariableCost => "Variable Cost = Processed Tons × (Energy + Labor + Other)",
            Self::Contribution => "Contribution = Revenue − Variable Cost",
            Self::FixedCost => "EBITDA = Contribution − Fixed Cost",
            Self::Ebitda => {
                "EBITDA = (Unit Price × Net Saleable Tons) − (Processed Tons × Variable Cost per Ton) − Fixed Cost"
            }
            Self::UnitEconomics => {
                "Variable Cost per Processed Ton = Variable Cost ÷ Processed Tons"
            }
        }
    }

    /// Metrics the lesson puts front and centre.
    pub fn highlights(&self) -> &'static [Highlight] {
        const REVENUE: &[Highlight] = &[Highlight::new("Revenue", Metric::Revenue)];
        const VARIABLE_COST: &[Highlight] = &[
            Highlight::new("Variable Cost", Metric::VariableCost),
            Highlight::new("Var cost per processed ton", Metric::VarCostComponents),
        ];
        const CONTRIBUTION: &[Highlight] = &[
            Highlight::new("Contribution", Metric::Contribution),
            Highlight::new("Contribution %", Metric::ContributionPct),
        ];
        const FIXED_COST: &[Highlight] = &[
            Highlight::new("Fixed Cost", Metric::FixedCost),
            Highlight::new("EBITDA", Metric::Ebitda),
        ];
        const EBITDA: &[Highlight] = &[
            Highlight::new("EBITDA", Metric::Ebitda),
            Highlight::new("EBITDA %", Metric::EbitdaPct),
        ];
        const UNIT_ECONOMICS: &[Highlight] = &[
            Highlight::new("Var cost / processed ton", Metric::VarCostPerTon),
            Highlight::new("Contribution / processed ton", Metric::ContribPerTon),
        ];

        match self {
            Self::Revenue => REVENUE,
            Self::VariableCost => VARIABLE_COST,
            Self::Contribution => CONTRIBUTION,
            Self::FixedCost => FIXED_COST,
            Self::Ebitda => EBITDA,
            Self::UnitEconomics => UNIT_ECONOMICS,
        }
    }

    /// Input fields left editable while this step is active.
    pub fn unlocked_fields(&self) -> &'static [InputField] {
        match self {
            Self::Revenue => &[InputField::UnitPrice],
            Self::VariableCost => &[
                InputField::EnergyPerTon,
                InputField::LaborPerTon,
                InputField::OtherPerTon,
            ],
            Self::Contribution => &[InputField::NetSaleableTons],
            Self::FixedCost => &[InputField::FixedCost],
            Self::Ebitda => &[InputField::LaborPerTon],
            Self::UnitEconomics => &[InputField::OtherPerTon, InputField::ProcessedTons],
        }
    }

    pub fn unlocks(
        &self,
        field: InputField,
    ) -> bool {
        self.unlocked_fields().contains(&field)
    }
}

impl std::str::FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: i64 = s
            .trim()
            .parse()
            .map_err(|_| StepError::NotANumber(s.to_string()))?;
        Self::from_number(number)
    }
}

impl TryFrom<u8> for Step {
    type Error = StepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(i64::from(value))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}
