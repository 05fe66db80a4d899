//! Nutrient value calculator
//!
//! Scales an ingredient's per-100 g values to a requested amount, optionally
//! given in an alternate unit.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use super::energy::KJ_PER_KCAL;
use crate::models::{Ingredient, NutritionalValues, UnitConversion};

/// Calculation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Amount must be a positive number (got '{0}')")]
    InvalidAmount(String),

    #[error("Unit '{name}' must represent a positive weight (got {grams}g)")]
    InvalidUnit { name: String, grams: Decimal },

    #[error("Ingredient '{ingredient}' has no value for '{field}'")]
    MissingField { ingredient: String, field: &'static str },

    #[error("Value for '{field}' is too large to calculate")]
    Overflow { field: &'static str },
}

/// Result type for calculations
pub type CalcResult<T> = Result<T, CalcError>;

/// Parse a requested amount, e.g. from a query string
pub fn parse_amount(raw: &str) -> CalcResult<Decimal> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| CalcError::InvalidAmount(raw.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: Decimal) -> CalcResult<()> {
    if amount <= Decimal::ZERO {
        return Err(CalcError::InvalidAmount(amount.to_string()));
    }
    Ok(())
}

/// Multiplier applied to per-100 g values
///
/// Without a unit the amount is in grams; with one it counts units.
pub fn scaling_factor(amount: Decimal, unit: Option<&UnitConversion>) -> CalcResult<Decimal> {
    check_amount(amount)?;

    let grams = match unit {
        None => amount,
        Some(unit) => {
            let per_unit = unit
                .grams_per_unit()
                .ok_or(CalcError::Overflow { field: "unit" })?;
            if per_unit <= Decimal::ZERO {
                return Err(CalcError::InvalidUnit {
                    name: unit.name.clone(),
                    grams: per_unit,
                });
            }
            amount
                .checked_mul(per_unit)
                .ok_or(CalcError::Overflow { field: "amount" })?
        }
    };

    grams
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(CalcError::Overflow { field: "amount" })
}

fn scale(field: &'static str, value: Decimal, factor: Decimal) -> CalcResult<Decimal> {
    value.checked_mul(factor).ok_or(CalcError::Overflow { field })
}

/// Nutritional values for `amount` of `ingredient`
///
/// Values are returned at full precision; use [`NutritionalValues::rounded`]
/// or the display helpers for two-decimal output.
pub fn compute_values(
    ingredient: &Ingredient,
    amount: Decimal,
    unit: Option<&UnitConversion>,
) -> CalcResult<NutritionalValues> {
    let factor = scaling_factor(amount, unit)?;

    let required = |field: &'static str, value: Option<Decimal>| {
        value.ok_or_else(|| CalcError::MissingField {
            ingredient: ingredient.name.clone(),
            field,
        })
    };

    let energy = scale("energy", required("energy", ingredient.energy)?, factor)?;
    let protein = scale("protein", required("protein", ingredient.protein)?, factor)?;
    let carbohydrates = scale(
        "carbohydrates",
        required("carbohydrates", ingredient.carbohydrates)?,
        factor,
    )?;
    let fat = scale("fat", required("fat", ingredient.fat)?, factor)?;

    let optional = |field: &'static str, value: Option<Decimal>| {
        scale(field, value.unwrap_or(Decimal::ZERO), factor)
    };

    Ok(NutritionalValues {
        sodium: optional("sodium", ingredient.sodium)?,
        energy,
        energy_kilojoule: scale("energy_kilojoule", energy, KJ_PER_KCAL)?,
        fat,
        carbohydrates_sugar: optional("carbohydrates_sugar", ingredient.carbohydrates_sugar)?,
        fat_saturated: optional("fat_saturated", ingredient.fat_saturated)?,
        fibres: optional("fibres", ingredient.fibres)?,
        protein,
        carbohydrates,
    })
}
