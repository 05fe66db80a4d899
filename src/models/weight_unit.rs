//! Unit conversion model
//!
//! Maps an ingredient to an alternate measurement ("1 slice", "1 cup") and the
//! grams it represents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::nutrition::units::grams_per_unit;

/// An alternate unit for an ingredient
///
/// One `name` weighs `gram` grams; the record stands for `amount` of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub id: Option<i64>,
    pub ingredient_id: Option<i64>,
    pub name: String,
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    pub gram: Decimal,
}

fn default_amount() -> Decimal {
    Decimal::ONE
}

impl UnitConversion {
    pub fn new(name: impl Into<String>, amount: Decimal, gram: Decimal) -> Self {
        Self {
            id: None,
            ingredient_id: None,
            name: name.into(),
            amount,
            gram,
        }
    }

    /// Conversion for a standard weight unit such as "oz" or "kg"
    pub fn from_weight_unit(unit: &str) -> Option<Self> {
        grams_per_unit(unit).map(|gram| Self::new(unit.trim().to_lowercase(), Decimal::ONE, gram))
    }

    /// Grams represented by one of this unit; `None` if too large to represent
    pub fn grams_per_unit(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.gram)
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
    fn test_grams_per_unit_multiplies_amount() {
        let half_cup = UnitConversion::new("cup", d("0.5"), d("223"));
        assert_eq!(half_cup.grams_per_unit(), Some(d("111.5")));
    }

    #[test]
    fn test_from_weight_unit() {
        let oz = UnitConversion::from_weight_unit("OZ").unwrap();
        assert_eq!(oz.name, "oz");
        assert_eq!(oz.grams_per_unit(), Some(d("28.3495")));
        assert!(UnitConversion::from_weight_unit("slice").is_none());
    }

    #[test]
    fn test_deserialize_defaults_amount() {
        let unit: UnitConversion =
            serde_json::from_str(r#"{"id": 2, "ingredient_id": 1, "name": "slice", "gram": "28"}"#)
                .unwrap();
        assert_eq!(unit.amount, Decimal::ONE);
        assert_eq!(unit.grams_per_unit(), Some(d("28")));
    }

    #[test]
    fn test_grams_per_unit_overflow() {
        let unit = UnitConversion::new("crate", Decimal::MAX, d("2"));
        assert_eq!(unit.grams_per_unit(), None);
    }
}
