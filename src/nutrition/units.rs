//! Standard weight units
//!
//! Gram factors for weight units that need no ingredient-specific conversion.

use rust_decimal::Decimal;

/// Grams per milligram
pub const G_PER_MG: Decimal = Decimal::from_parts(1, 0, 0, false, 3);
/// Grams per kilogram
pub const G_PER_KG: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
/// Grams per ounce
pub const G_PER_OZ: Decimal = Decimal::from_parts(283495, 0, 0, false, 4);
/// Grams per pound
pub const G_PER_LB: Decimal = Decimal::from_parts(453592, 0, 0, false, 3);

/// Get the conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<Decimal> {
    let lower = unit.to_lowercase();

    match lower.trim() {
        "g" | "gram" | "grams" => Some(Decimal::ONE),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(grams_per_unit("g"), Some(Decimal::ONE));
        assert_eq!(grams_per_unit(" Grams "), Some(Decimal::ONE));
        assert_eq!(grams_per_unit("oz"), Some(Decimal::from_str("28.3495").unwrap()));
        assert_eq!(grams_per_unit("lb"), Some(Decimal::from_str("453.592").unwrap()));
        assert_eq!(grams_per_unit("mg"), Some(Decimal::from_str("0.001").unwrap()));
        assert_eq!(grams_per_unit("slice"), None);
    }
}
