//! Scaled nutritional values
//!
//! Output of the value calculator. Values are kept at full precision so that
//! several portions can be totalled; rounding happens on display.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Decimal places shown to users
pub const DISPLAY_PRECISION: u32 = 2;

/// Round to display precision (half-to-even) and render with exactly two decimals
pub fn display_2dp(value: Decimal) -> String {
    let mut rounded = round_2dp(value);
    rounded.rescale(DISPLAY_PRECISION);
    rounded.to_string()
}

fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_PRECISION, RoundingStrategy::MidpointNearestEven)
}

fn serialize_2dp<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&display_2dp(*value))
}

/// Nutritional values for a given amount of an ingredient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionalValues {
    #[serde(serialize_with = "serialize_2dp")]
    pub sodium: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub energy: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub energy_kilojoule: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub fat: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub carbohydrates_sugar: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub fat_saturated: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub fibres: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub protein: Decimal,
    #[serde(serialize_with = "serialize_2dp")]
    pub carbohydrates: Decimal,
}

impl NutritionalValues {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Copy with every field rounded to display precision
    pub fn rounded(&self) -> Self {
        Self {
            sodium: round_2dp(self.sodium),
            energy: round_2dp(self.energy),
            energy_kilojoule: round_2dp(self.energy_kilojoule),
            fat: round_2dp(self.fat),
            carbohydrates_sugar: round_2dp(self.carbohydrates_sugar),
            fat_saturated: round_2dp(self.fat_saturated),
            fibres: round_2dp(self.fibres),
            protein: round_2dp(self.protein),
            carbohydrates: round_2dp(self.carbohydrates),
        }
    }

    /// The nine fields as two-decimal strings, keyed by field name
    pub fn to_display_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("sodium", display_2dp(self.sodium)),
            ("energy", display_2dp(self.energy)),
            ("energy_kilojoule", display_2dp(self.energy_kilojoule)),
            ("fat", display_2dp(self.fat)),
            ("carbohydrates_sugar", display_2dp(self.carbohydrates_sugar)),
            ("fat_saturated", display_2dp(self.fat_saturated)),
            ("fibres", display_2dp(self.fibres)),
            ("protein", display_2dp(self.protein)),
            ("carbohydrates", display_2dp(self.carbohydrates)),
        ])
    }

    pub fn add(&self, other: &NutritionalValues) -> Self {
        Self {
            sodium: self.sodium + other.sodium,
            energy: self.energy + other.energy,
            energy_kilojoule: self.energy_kilojoule + other.energy_kilojoule,
            fat: self.fat + other.fat,
            carbohydrates_sugar: self.carbohydrates_sugar + other.carbohydrates_sugar,
            fat_saturated: self.fat_saturated + other.fat_saturated,
            fibres: self.fibres + other.fibres,
            protein: self.protein + other.protein,
            carbohydrates: self.carbohydrates + other.carbohydrates,
        }
    }
}

impl std::ops::Add for NutritionalValues {
    type Output = NutritionalValues;

    fn add(self, other: NutritionalValues) -> NutritionalValues {
        NutritionalValues::add(&self, &other)
    }
}

impl std::iter::Sum for NutritionalValues {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionalValues::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_display_pads_and_rounds() {
        assert_eq!(display_2dp(Decimal::ZERO), "0.00");
        assert_eq!(display_2dp(d("1.5")), "1.50");
        assert_eq!(display_2dp(d("0.00547")), "0.01");
        assert_eq!(display_2dp(d("821.06816")), "821.07");
    }

    #[test]
    fn test_display_rounds_half_to_even() {
        assert_eq!(display_2dp(d("0.125")), "0.12");
        assert_eq!(display_2dp(d("0.135")), "0.14");
    }

    #[test]
    fn test_serializes_as_strings() {
        let values = NutritionalValues {
            energy: d("1.76"),
            protein: d("0.2563"),
            ..Default::default()
        };
        let json = serde_json::to_value(values).unwrap();
        assert_eq!(json["energy"], "1.76");
        assert_eq!(json["protein"], "0.26");
        assert_eq!(json["fibres"], "0.00");
        assert_eq!(json.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_sum_keeps_precision_until_display() {
        let portion = NutritionalValues {
            protein: d("0.004"),
            ..Default::default()
        };
        let total: NutritionalValues = vec![portion; 3].into_iter().sum();
        assert_eq!(total.protein, d("0.012"));
        assert_eq!(total.rounded().protein, d("0.01"));
        assert_eq!(total.to_display_map()["protein"], "0.01");
    }
}
