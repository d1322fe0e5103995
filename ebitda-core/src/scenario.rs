//! Named input presets.
//!
//! | Scenario | Changes from the defaults |
//! |----------------|----------------------------------------------|
//! | Base case | none |
//! | Energy spike | energy per ton 30 |
//! | Price pressure | unit price 160 |
//! | Lower yield | processed tons 1,200, net saleable tons 950 |

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InputField, Inputs};

/// Error returned when a name matches no entry in the scenario catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario '{name}'; available: {available}")]
pub struct UnknownScenarioError {
    pub name: String,
    available: String,
}

impl UnknownScenarioError {
    fn new(name: &str) -> Self {
        let available = Scenario::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            name: name.to_string(),
            available,
        }
    }
}

/// A preset from the fixed scenario catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    #[default]
    BaseCase,
    EnergySpike,
    PricePressure,
    LowerYield,
}

impl Scenario {
    /// Catalog order, as offered to the user.
    pub const ALL: [Scenario; 4] = [
        Scenario::BaseCase,
        Scenario::EnergySpike,
        Scenario::PricePressure,
        Scenario::LowerYield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BaseCase => "Base case",
            Self::EnergySpike => "Energy spike",
            Self::PricePressure => "Price pressure",
            Self::LowerYield => "Lower yield",
        }
    }

    /// Kebab-case identifier, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BaseCase => "base-case",
            Self::EnergySpike => "energy-spike",
            Self::PricePressure => "price-pressure",
            Self::LowerYield => "lower-yield",
        }
    }

    /// One-line description of what the scenario teaches.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::BaseCase => {
                "Baseline operations. Learn how price, volume, and costs roll into Revenue, Contribution, and EBITDA."
            }
            Self::EnergySpike => {
                "Energy rates jump. Watch Variable Cost rise and EBITDA fall if price stays constant."
            }
            Self::PricePressure => "Selling price drops. Watch Revenue and margins tighten.",
            Self::LowerYield => {
                "Net saleable tons drop while processed tons stay high. See how margin can shrink even when running hard."
            }
        }
    }

    /// The fields this preset sets, applied on top of [`Inputs::defaults`].
    pub fn overrides(&self) -> &'static [(InputField, i64)] {
        match self {
            Self::BaseCase => &[],
            Self::EnergySpike => &[(InputField::EnergyPerTon, 30)],
            Self::PricePressure => &[(InputField::UnitPrice, 160)],
            Self::LowerYield => &[
                (InputField::ProcessedTons, 1200),
                (InputField::NetSaleableTons, 950),
            ],
        }
    }

    /// The complete input set: defaults with this preset's overrides merged in.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ebitda_core::{Inputs, Scenario};
    ///
    /// let inputs = Scenario::EnergySpike.inputs();
    ///
    /// assert_eq!(inputs.energy_per_ton, dec!(30));
    /// assert_eq!(inputs.labor_per_ton, Inputs::defaults().labor_per_ton);
    /// ```
    pub fn inputs(&self) -> Inputs {
        self.overrides()
            .iter()
            .fold(Inputs::defaults(), |inputs, &(field, value)| {
                inputs.with(field, Decimal::from(value))
            })
    }
}

impl fmt::Display for Scenario {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scenario {
    type Err = UnknownScenarioError;

    /// Matches the label or the key, ignoring case and treating spaces,
    /// hyphens, and underscores alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |text: &str| text.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.key() == wanted)
            .ok_or_else(|| UnknownScenarioError::new(s))
    }
}
