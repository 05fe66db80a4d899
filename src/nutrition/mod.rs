//! Nutrition calculation module
//!
//! Value scaling, energy plausibility and weight unit factors.

pub mod calculator;
pub mod energy;
pub mod units;

pub use calculator::{compute_values, parse_amount, scaling_factor, CalcError, CalcResult};
pub use energy::{calculated_energy, validate_energy, ENERGY_TOLERANCE_PERCENT, KJ_PER_KCAL};
pub use units::grams_per_unit;
