use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The seven editable business inputs that drive the waterfall.
///
/// Values are not validated. Zero and negative amounts are accepted and
/// simply flow through the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    /// Selling price per net saleable ton.
    pub unit_price: Decimal,
    /// Tons actually sold.
    pub net_saleable_tons: Decimal,
    /// Tons run through the plant; variable cost is incurred on these.
    pub processed_tons: Decimal,
    pub energy_per_ton: Decimal,
    pub labor_per_ton: Decimal,
    pub other_per_ton: Decimal,
    /// Period fixed cost, independent of volume.
    pub fixed_cost: Decimal,
}

impl Inputs {
    /// The reference defaults every session starts from.
    pub fn defaults() -> Self {
        Self {
            unit_price: Decimal::from(200),
            net_saleable_tons: Decimal::from(1000),
            processed_tons: Decimal::from(1100),
            energy_per_ton: Decimal::from(15),
            labor_per_ton: Decimal::from(20),
            other_per_ton: Decimal::from(10),
            fixed_cost: Decimal::from(120_000),
        }
    }

    /// Reads one field.
    ///
    /// # Arguments
    ///
    /// * `field` - The input to read
    ///
    /// # Returns
    ///
    /// The field's current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ebitda_core::{InputField, Inputs};
    ///
    /// assert_eq!(Inputs::defaults().get(InputField::ProcessedTons), dec!(1100));
    /// ```
    pub fn get(
        &self,
        field: InputField,
    ) -> Decimal {
        match field {
            InputField::UnitPrice => self.unit_price,
            InputField::NetSaleableTons => self.net_saleable_tons,
            InputField::ProcessedTons => self.processed_tons,
            InputField::EnergyPerTon => self.energy_per_ton,
            InputField::LaborPerTon => self.labor_per_ton,
            InputField::OtherPerTon => self.other_per_ton,
            InputField::FixedCost => self.fixed_cost,
        }
    }

    /// Overwrites one field in place. No validation is applied.
    ///
    /// # Arguments
    ///
    /// * `field` - The input to change
    /// * `value` - Its new value; zero and negative amounts are accepted
    pub fn set(
        &mut self,
        field: InputField,
        value: Decimal,
    ) {
        let slot = match field {
            InputField::UnitPrice => &mut self.unit_price,
            InputField::NetSaleableTons => &mut self.net_saleable_tons,
            InputField::ProcessedTons => &mut self.processed_tons,
            InputField::EnergyPerTon => &mut self.energy_per_ton,
            InputField::LaborPerTon => &mut self.labor_per_ton,
            InputField::OtherPerTon => &mut self.other_per_ton,
            InputField::FixedCost => &mut self.fixed_cost,
        };
        *slot = value;
    }

    /// Returns a copy with `field` replaced, leaving `self` untouched.
    pub fn with(
        mut self,
        field: InputField,
        value: Decimal,
    ) -> Self {
        self.set(field, value);
        self
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Names one of the seven [`Inputs`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    UnitPrice,
    NetSaleableTons,
    ProcessedTons,
    EnergyPerTon,
    LaborPerTon,
    OtherPerTon,
    FixedCost,
}

impl InputField {
    /// All fields in input-panel order.
    pub const ALL: [InputField; 7] = [
        InputField::UnitPrice,
        InputField::NetSaleableTons,
        InputField::ProcessedTons,
        InputField::EnergyPerTon,
        InputField::LaborPerTon,
        InputField::OtherPerTon,
        InputField::FixedCost,
    ];

    /// Stable snake_case identifier, matching the serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::UnitPrice => "unit_price",
            Self::NetSaleableTons => "net_saleable_tons",
            Self::ProcessedTons => "processed_tons",
            Self::EnergyPerTon => "energy_per_ton",
            Self::LaborPerTon => "labor_per_ton",
            Self::OtherPerTon => "other_per_ton",
            Self::FixedCost => "fixed_cost",
        }
    }

    /// Human-readable name shown in the input panel and in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnitPrice => "Unit price",
            Self::NetSaleableTons => "Net saleable tons",
            Self::ProcessedTons => "Processed tons",
            Self::EnergyPerTon => "Energy per ton",
            Self::LaborPerTon => "Labor per ton",
            Self::OtherPerTon => "Other per ton",
            Self::FixedCost => "Fixed cost",
        }
    }

    /// Step size used when nudging the field up or down.
    pub fn increment(&self) -> Decimal {
        match self {
            Self::FixedCost => Decimal::from(1000),
            _ => Decimal::ONE,
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string names none of the seven input fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for InputField {
    type Err = UnknownFieldError;

    /// Accepts the snake_case key, a kebab-case variant of it, or the label,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|field| {
                field.key() == wanted
                    || field.label().to_ascii_lowercase().replace(' ', "_") == wanted
            })
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let inputs = Inputs::defaults();

        assert_eq!(inputs.unit_price, dec!(200));
        assert_eq!(inputs.net_saleable_tons, dec!(1000));
        assert_eq!(inputs.processed_tons, dec!(1100));
        assert_eq!(inputs.energy_per_ton, dec!(15));
        assert_eq!(inputs.labor_per_ton, dec!(20));
        assert_eq!(inputs.other_per_ton, dec!(10));
        assert_eq!(inputs.fixed_cost, dec!(120000));
    }

    #[test]
    fn set_then_get_touches_only_the_named_field() {
        let mut inputs = Inputs::defaults();
        inputs.set(InputField::LaborPerTon, dec!(25.5));

        assert_eq!(inputs.get(InputField::LaborPerTon), dec!(25.5));
        assert_eq!(
            inputs.with(InputField::LaborPerTon, dec!(20)),
            Inputs::defaults()
        );
    }

    #[test]
    fn fixed_cost_moves_in_thousands() {
        assert_eq!(InputField::FixedCost.increment(), dec!(1000));
        assert_eq!(InputField::UnitPrice.increment(), dec!(1));
    }

    #[test]
    fn parses_keys_labels_and_kebab_case() {
        assert_eq!("unit_price".parse::<InputField>(), Ok(InputField::UnitPrice));
        assert_eq!("Processed tons".parse::<InputField>(), Ok(InputField::ProcessedTons));
        assert_eq!("fixed-cost".parse::<InputField>(), Ok(InputField::FixedCost));
        assert_eq!("  ENERGY_PER_TON ".parse::<InputField>(), Ok(InputField::EnergyPerTon));
    }

    #[test]
    fn rejects_unknown_field_names() {
        let err = "tons".parse::<InputField>().unwrap_err();

        assert_eq!(err, UnknownFieldError("tons".to_string()));
    }

    #[test]
    fn every_key_round_trips_through_from_str() {
        for field in InputField::ALL {
            assert_eq!(field.key().parse::<InputField>(), Ok(field));
        }
    }
}
