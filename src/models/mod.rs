//! Data models
//!
//! Plain records exchanged with the embedding application.

mod ingredient;
mod nutrition;
mod validation;
mod weight_unit;

pub use ingredient::{
    Ingredient, IngredientCreate, IngredientStatus, IngredientUpdate, SubmitterTier,
    MAX_ENERGY_PER_100G, NAME_MAX_LENGTH, NAME_MIN_LENGTH,
};
pub use nutrition::{display_2dp, NutritionalValues, DISPLAY_PRECISION};
pub use validation::{ValidationError, ValidationErrors};
pub use weight_unit::UnitConversion;
